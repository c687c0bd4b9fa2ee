pub mod constants;
pub mod tokens;

pub use constants::*;
pub use tokens::{write_token, Token};
