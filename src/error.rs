use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("Hex input is empty")]
    EmptyHex,
    #[error("Invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit { position: usize, found: char },
    #[error("Cannot convert hex digits: {0}")]
    Hex(#[from] ::hex::FromHexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(Error::EmptyHex.to_string(), "Hex input is empty");
        let err = Error::InvalidHexDigit {
            position: 3,
            found: 'z',
        };
        assert_eq!(err.to_string(), "Invalid hex digit 'z' at position 3");
        let err = Error::from(::hex::FromHexError::OddLength);
        assert!(err.to_string().starts_with("Cannot convert hex digits"));
    }
}
