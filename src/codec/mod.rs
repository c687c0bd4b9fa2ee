pub mod decoder;
pub mod encoder;

pub use decoder::{DecodeReport, DecodeWarning, Decoder};
pub use encoder::Encoder;
