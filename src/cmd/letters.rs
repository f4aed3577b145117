use crate::reports;
use clap::Args;
use tracing::{info, warn};
use turtlekeys::config::EngineConfig;
use turtlekeys::engine::KeyboardEngine;
use turtlekeys::error::{TkResult, TurtleError};
use turtlekeys::keysig::KeySignature;

#[derive(Args, Debug, Clone)]
pub struct LettersArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Record an observed letter, written `SIGNATURE=CHAR` (e.g. "scan38 shift=A").
    #[arg(long)]
    pub record: Vec<String>,

    /// Write the letter map back to its file after recording.
    #[arg(long, default_value_t = false)]
    pub save: bool,
}

fn parse_record(entry: &str) -> TkResult<(KeySignature, char)> {
    let (sig, letter) = entry
        .split_once('=')
        .ok_or_else(|| TurtleError::Validation(format!("'{}' is not SIGNATURE=CHAR", entry)))?;

    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok((sig.parse::<KeySignature>()?, c)),
        _ => Err(TurtleError::Validation(format!(
            "'{}' must map to exactly one character",
            entry
        ))),
    }
}

pub fn run(args: &LettersArgs, engine: &mut KeyboardEngine, path: Option<&str>) -> TkResult<()> {
    for entry in &args.record {
        let (sig, c) = parse_record(entry)?;
        if !engine.record_observed(sig.scan_code, sig.modifiers, sig.group, c) {
            warn!("'{}' is already mapped, keeping the recorded letter", sig);
        }
    }

    reports::print_letters(engine);

    if args.save {
        let path = path.ok_or_else(|| {
            TurtleError::Config("--save needs --letter-map".to_string())
        })?;
        engine.letter_map().save_to_file(path)?;
        info!("Letter map saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtlekeys::keysig::Modifiers;

    #[test]
    fn parses_record_with_equals_letter() {
        let (sig, c) = parse_record("scan21 shift==").unwrap();
        assert_eq!(sig, KeySignature::new(21, Modifiers::SHIFT, 0));
        assert_eq!(c, '=');
    }

    #[test]
    fn rejects_record_without_letter() {
        assert!(parse_record("scan21").is_err());
    }
}
