use crate::source::ByteSource;

use super::error::DecodeError;
use super::layout;
use super::options::DecodeOptions;
use super::word::Word;

/// Positional reader over a borrowed byte source.
///
/// Holds no state besides the borrow, so dropping it between responses is
/// free and the next response starts exactly where this one stopped.
pub struct WireReader<'a, S: ByteSource + ?Sized> {
    source: &'a mut S,
    options: DecodeOptions,
}

impl<'a, S: ByteSource + ?Sized> WireReader<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self::with_options(source, DecodeOptions::default())
    }

    pub fn with_options(source: &'a mut S, options: DecodeOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Read one big-endian word.
    ///
    /// # Errors
    /// Returns `DecodeError::Truncated` when fewer than four bytes remain.
    pub fn read_word(&mut self) -> Result<Word, DecodeError> {
        self.read_word_as("word")
    }

    pub(crate) fn read_word_as(&mut self, context: &'static str) -> Result<Word, DecodeError> {
        let mut buf = [0u8; layout::WORD_LEN];
        self.source
            .read_exact_into(&mut buf)
            .map_err(|err| DecodeError::from_source(context, err))?;
        let word = Word::from_be_bytes(buf);
        tracing::trace!(context, value = word.as_u32(), "read word");
        Ok(word)
    }

    /// Read a pointer marker; `true` when non-null.
    pub fn read_pointer(&mut self) -> Result<bool, DecodeError> {
        let marker = self.read_word_as("pointer")?;
        Ok(marker.as_i32() != layout::NULL_POINTER)
    }

    /// Read a length-prefixed, zero-terminated Latin-1 string.
    ///
    /// The length word counts the terminator. A length of zero consumes no
    /// further bytes; the terminator byte is dropped without inspection.
    ///
    /// # Errors
    /// Returns `DecodeError::Truncated` when the stream ends inside the
    /// length word or the string body.
    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        self.read_string_as("string")
    }

    pub(crate) fn read_string_as(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let len = self.read_word_as("string length")?.as_u32() as usize;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self
            .source
            .read_vec(len)
            .map_err(|err| DecodeError::from_source(context, err))?;
        Ok(latin1_to_string(&bytes[..len - layout::STRING_TERMINATOR_LEN]))
    }
}

fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
