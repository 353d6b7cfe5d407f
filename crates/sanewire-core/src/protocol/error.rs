use thiserror::Error;

use crate::source::SourceError;

/// Errors returned while decoding a daemon response.
///
/// # Examples
/// ```
/// use sanewire_core::DecodeError;
///
/// let err = DecodeError::Truncated { context: "string", needed: 5, actual: 2 };
/// assert!(err.to_string().contains("truncated input while reading string"));
/// ```
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("truncated input while reading {context}: need {needed} bytes, got {actual}")]
    Truncated {
        context: &'static str,
        needed: usize,
        actual: usize,
    },
    #[error("protocol consistency violation: {message}")]
    ProtocolConsistency { message: String },
    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl DecodeError {
    pub(crate) fn from_source(context: &'static str, err: SourceError) -> Self {
        match err {
            SourceError::Truncated { needed, actual } => DecodeError::Truncated {
                context,
                needed,
                actual,
            },
            SourceError::Io(err) => DecodeError::Io(err),
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

impl From<SourceError> for DecodeError {
    fn from(value: SourceError) -> Self {
        DecodeError::from_source("response", value)
    }
}

/// Errors returned while encoding values into wire form.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("character {ch:?} is outside Latin-1")]
    Unencodable { ch: char },
    #[error("value too long for a word length prefix: {len} bytes")]
    TooLong { len: usize },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::DecodeError;
    use crate::source::SourceError;

    #[test]
    fn source_truncation_keeps_counts() {
        let err = DecodeError::from_source(
            "word",
            SourceError::Truncated {
                needed: 4,
                actual: 1,
            },
        );
        assert!(err.is_truncated());
        assert_eq!(
            err.to_string(),
            "truncated input while reading word: need 4 bytes, got 1"
        );
    }

    #[test]
    fn source_io_stays_io() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: DecodeError = SourceError::Io(io).into();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
