use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Invalid window size: {size} (must be 1..={max})")]
    InvalidWindowSize { size: usize, max: usize },

    #[error("Invalid lookahead size: {size} (must be at least {min})")]
    InvalidLookahead { size: usize, min: usize },

    // Bit stream errors
    #[error("End of bit stream")]
    EndOfStream,

    #[error("Insufficient bits: requested {requested}, only {available} remain")]
    InsufficientBits { requested: u8, available: usize },

    // Token format errors
    #[error("Back-reference distance {distance} exceeds available output {available}")]
    InvalidBackReference { distance: u16, available: usize },

    #[error("Value {value} does not fit in the {width}-bit {field} field")]
    FieldOverflow { field: &'static str, value: u32, width: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
