pub mod hint;
pub mod inspect;
pub mod letters;
