//! Byte sources feeding the wire decoders.
//!
//! Decoders never own the connection. They borrow something that can hand
//! out exactly `n` bytes or fail, and they consume precisely what one response
//! needs so the next read on the same stream stays aligned.

mod stream;

pub use stream::StreamSource;

use thiserror::Error;

/// Upper bound on a single allocation step when pulling a long byte run.
pub const READ_CHUNK: usize = 64 * 1024;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("stream ended early: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
}

/// Ordered, exclusive access to bytes arriving from a daemon connection.
///
/// Implementations block until the requested bytes arrive or the stream ends.
pub trait ByteSource {
    /// Fill `buf` completely or fail with [`SourceError::Truncated`].
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), SourceError>;

    /// Read exactly `len` bytes into a fresh buffer.
    ///
    /// The buffer grows in [`READ_CHUNK`] steps, so a bogus length on a short
    /// stream fails without reserving the claimed size up front.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, SourceError> {
        let mut out = Vec::with_capacity(len.min(READ_CHUNK));
        while out.len() < len {
            let start = out.len();
            let step = (len - start).min(READ_CHUNK);
            out.resize(start + step, 0);
            if let Err(err) = self.read_exact_into(&mut out[start..]) {
                return Err(match err {
                    SourceError::Truncated { actual, .. } => SourceError::Truncated {
                        needed: len,
                        actual: start + actual,
                    },
                    other => other,
                });
            }
        }
        Ok(out)
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        (**self).read_exact_into(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSource, READ_CHUNK, SourceError, StreamSource};

    #[test]
    fn read_vec_spans_chunks() {
        let data = vec![7u8; READ_CHUNK + 10];
        let mut source = StreamSource::new(data.as_slice());
        let out = source.read_vec(READ_CHUNK + 10).unwrap();
        assert_eq!(out.len(), READ_CHUNK + 10);
        assert_eq!(source.consumed(), (READ_CHUNK + 10) as u64);
    }

    #[test]
    fn read_vec_reports_total_progress_on_truncation() {
        let data = vec![1u8; READ_CHUNK + 3];
        let mut source = StreamSource::new(data.as_slice());
        let err = source.read_vec(READ_CHUNK * 2).unwrap_err();
        match err {
            SourceError::Truncated { needed, actual } => {
                assert_eq!(needed, READ_CHUNK * 2);
                assert_eq!(actual, READ_CHUNK + 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn huge_length_on_short_stream_is_truncated() {
        let data = [1u8, 2, 3];
        let mut source = StreamSource::new(&data[..]);
        let err = source.read_vec(u32::MAX as usize).unwrap_err();
        assert!(matches!(err, SourceError::Truncated { actual: 3, .. }));
    }
}
