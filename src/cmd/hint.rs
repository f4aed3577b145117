use crate::reports;
use clap::Args;
use turtlekeys::config::EngineConfig;
use turtlekeys::engine::KeyboardEngine;
use turtlekeys::error::TkResult;
use turtlekeys::hands::{HandHint, HandImages};
use turtlekeys::keymap::PlatformKeymap;
use turtlekeys::keysig::KeySignature;

#[derive(Args, Debug, Clone)]
pub struct HintArgs {
    #[command(flatten)]
    pub config: EngineConfig,

    /// Text to explain, one row per character.
    pub text: String,
}

pub fn run<K: PlatformKeymap>(args: &HintArgs, engine: &KeyboardEngine, keymap: &K) -> TkResult<()> {
    let images = HandImages::default();
    let mut rows = Vec::new();
    let mut missing = 0;

    for c in args.text.chars() {
        let found = engine.key_for_char(c, keymap).map(|h| {
            let label = if h.key.label().is_empty() {
                format!("{}#{}", h.key.props.group_name, h.key.key_index)
            } else {
                h.key.label().to_string()
            };
            (KeySignature::new(h.key.scan_code(), h.modifiers, h.group), label)
        });
        if found.is_none() {
            missing += 1;
        }
        rows.push((c, found, HandHint::for_letter(engine, c, keymap, &images)));
    }

    reports::print_hints(&rows);
    if missing > 0 {
        println!("{} characters have no key on this layout", missing);
    }
    Ok(())
}
