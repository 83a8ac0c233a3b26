use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

/// Error type for message construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Missing recipients in envelope
    MissingTo,
    /// Can only be one from when no sender is set
    TooManyFrom,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::MissingTo => f.write_str("missing destination address, invalid envelope"),
            Error::TooManyFrom => f.write_str("there can only be one source address"),
        }
    }
}

impl StdError for Error {}
