use std::io::{ErrorKind, Read};

use super::{ByteSource, SourceError};

/// [`ByteSource`] over any blocking reader, counting bytes handed out.
///
/// # Examples
/// ```
/// use sanewire_core::{ByteSource, StreamSource};
///
/// let mut source = StreamSource::new(&[0u8, 0, 0, 1][..]);
/// let mut buf = [0u8; 4];
/// source.read_exact_into(&mut buf)?;
/// assert_eq!(source.consumed(), 4);
/// # Ok::<(), sanewire_core::SourceError>(())
/// ```
pub struct StreamSource<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Total bytes successfully delivered to callers so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Drain whatever the reader still holds and return its length.
    pub fn drain_remaining(&mut self) -> Result<u64, SourceError> {
        let drained = std::io::copy(&mut self.inner, &mut std::io::sink())?;
        Ok(drained)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.consumed += filled as u64;
                    return Err(SourceError::Truncated {
                        needed: buf.len(),
                        actual: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.consumed += filled as u64;
                    return Err(SourceError::Io(err));
                }
            }
        }
        self.consumed += filled as u64;
        Ok(())
    }
}
