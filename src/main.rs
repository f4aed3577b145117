use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::Path;
use std::process;
use tracing::{error, info, warn, Level};
use turtlekeys::config::EngineConfig;
use turtlekeys::engine::KeyboardEngine;
use turtlekeys::error::TkResult;
use turtlekeys::geometry::{olpc_layout, LayoutDescription};
use turtlekeys::keymap::StaticKeymap;
use turtlekeys::lettermap::LetterMap;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Layout description (JSON). Defaults to the built-in OLPC layout.
    #[arg(global = true, short, long)]
    layout: Option<String>,

    /// Recorded letter map (JSON).
    #[arg(global = true, short = 'm', long)]
    letter_map: Option<String>,

    /// Letter map replayed as the platform keymap, for the fallback path.
    #[arg(global = true, long)]
    keymap: Option<String>,

    /// Engine configuration (JSON). Flags typed on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the resolved keys of the layout.
    Inspect(cmd::inspect::InspectArgs),
    /// Show which key and modifiers type each character.
    Hint(cmd::hint::HintArgs),
    /// Check, extend and save a letter map.
    Letters(cmd::letters::LettersArgs),
}

fn load_letters(path: Option<&str>, strict: bool) -> TkResult<LetterMap> {
    let Some(path) = path else {
        return Ok(LetterMap::new());
    };
    if !Path::new(path).exists() {
        info!("Letter map '{}' does not exist yet, starting empty", path);
        return Ok(LetterMap::new());
    }
    match LetterMap::load_from_file(path) {
        Ok(map) => Ok(map),
        Err(e) if !strict => {
            warn!("Ignoring letter map '{}': {}", path, e);
            Ok(LetterMap::new())
        }
        Err(e) => Err(e),
    }
}

fn run(cli: Cli, config: EngineConfig) -> TkResult<()> {
    let levels = config.levels()?;

    let layout = match &cli.layout {
        Some(path) => {
            info!("Loading layout: {}", path);
            LayoutDescription::load_from_file(path)?
        }
        None => olpc_layout(),
    };

    let strict = matches!(cli.command, Commands::Letters(_));
    let letters = load_letters(cli.letter_map.as_deref(), strict)?;

    let keymap = match &cli.keymap {
        Some(path) => StaticKeymap::from_letter_map(&LetterMap::load_from_file(path)?, levels),
        None => StaticKeymap::new(levels),
    };

    let mut engine = KeyboardEngine::with_letter_map(letters).with_levels(levels);
    engine.set_layout(&layout);

    match &cli.command {
        Commands::Inspect(args) => cmd::inspect::run(args, &config, &engine, &keymap),
        Commands::Hint(args) => cmd::hint::run(args, &engine, &keymap),
        Commands::Letters(args) => cmd::letters::run(args, &mut engine, cli.letter_map.as_deref()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let cli_config = match &cli.command {
        Commands::Inspect(args) => &args.config,
        Commands::Hint(args) => &args.config,
        Commands::Letters(args) => &args.config,
    };

    let config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            let mut file_config = EngineConfig::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            if let Some((_, sub_matches)) = matches.subcommand() {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };

    if let Err(e) = run(cli, config) {
        error!("{}", e);
        process::exit(1);
    }
}
