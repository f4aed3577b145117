use crate::reports;
use clap::Args;
use std::fs::File;
use tracing::info;
use turtlekeys::config::EngineConfig;
use turtlekeys::engine::KeyboardEngine;
use turtlekeys::error::TkResult;
use turtlekeys::keymap::PlatformKeymap;
use turtlekeys::keysig::Modifiers;
use turtlekeys::screen;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Show key captions as if SHIFT were held.
    #[arg(long, default_value_t = false)]
    pub shift: bool,

    /// Show key captions as if ALTGR were held.
    #[arg(long, default_value_t = false)]
    pub altgr: bool,

    /// Input group used for key captions.
    #[arg(short, long, default_value_t = 0)]
    pub group: u8,

    /// Print screen pixels instead of layout units.
    #[arg(long, default_value_t = false)]
    pub screen: bool,

    /// Write scaled key geometry to this CSV file.
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run<K: PlatformKeymap>(
    args: &InspectArgs,
    config: &EngineConfig,
    engine: &KeyboardEngine,
    keymap: &K,
) -> TkResult<()> {
    let mut modifiers = Modifiers::NONE;
    if args.shift {
        modifiers |= Modifiers::SHIFT;
    }
    if args.altgr {
        modifiers |= Modifiers::ALTGR;
    }

    let scaled = screen::scale_keys(engine.keys(), config.screen_width, config.screen_height);

    println!(
        "\nLayout: {} keys in {} groups ({})",
        engine.keys().len(),
        engine.group_count(),
        if args.screen {
            format!("{}x{} px", config.screen_width, config.screen_height)
        } else {
            "layout units".to_string()
        }
    );
    reports::print_key_table(
        engine,
        keymap,
        modifiers,
        args.group,
        args.screen.then_some(scaled.as_slice()),
    );

    if let Some(path) = &args.csv {
        screen::write_csv(&scaled, File::create(path)?)?;
        info!("Wrote key geometry to {}", path);
    }
    Ok(())
}
