pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hands;
pub mod keymap;
pub mod keysig;
pub mod lettermap;
pub mod screen;
pub mod tracker;

pub use engine::{KeyHint, KeyboardEngine, ResolvedKey};
pub use error::{TkResult, TurtleError};
pub use keysig::{KeySignature, Modifiers, ScanCode};
pub use lettermap::LetterMap;
