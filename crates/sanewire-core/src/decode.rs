use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::{
    DecodeError, DecodeOptions, DeviceRecord, FrameParameters, Status, WireReader, Word,
    read_device_list, read_parameters, read_status,
};
use crate::source::{ByteSource, SourceError, StreamSource};
use crate::{DecodeReport, make_report};

/// Which response layout to expect at the current stream position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Word,
    String,
    Status,
    DeviceList,
    Parameters,
}

impl ResponseKind {
    pub const ALL: [ResponseKind; 5] = [
        ResponseKind::Word,
        ResponseKind::String,
        ResponseKind::Status,
        ResponseKind::DeviceList,
        ResponseKind::Parameters,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseKind::Word => "word",
            ResponseKind::String => "string",
            ResponseKind::Status => "status",
            ResponseKind::DeviceList => "device_list",
            ResponseKind::Parameters => "parameters",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded response, tagged by kind when serialized.
///
/// # Examples
/// ```
/// use sanewire_core::DecodedValue;
///
/// let value = DecodedValue::String("abcd".to_string());
/// let json = serde_json::to_string(&value).unwrap();
/// assert_eq!(json, r#"{"kind":"string","value":"abcd"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DecodedValue {
    Word(Word),
    String(String),
    Status(Status),
    DeviceList(Vec<DeviceRecord>),
    Parameters(FrameParameters),
}

impl DecodedValue {
    pub fn kind(&self) -> ResponseKind {
        match self {
            DecodedValue::Word(_) => ResponseKind::Word,
            DecodedValue::String(_) => ResponseKind::String,
            DecodedValue::Status(_) => ResponseKind::Status,
            DecodedValue::DeviceList(_) => ResponseKind::DeviceList,
            DecodedValue::Parameters(_) => ResponseKind::Parameters,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Decode error ({kind}): {source}")]
    Decode {
        kind: ResponseKind,
        #[source]
        source: DecodeError,
    },
}

/// Decode one response of `kind` from the current position of `source`.
///
/// Nothing past the response is read, so several responses can be decoded
/// back to back from one stream.
///
/// # Examples
/// ```
/// use sanewire_core::{DecodeOptions, DecodedValue, ResponseKind, StreamSource, decode_response};
///
/// let bytes = [0u8, 0, 0, 0, 0, 0, 0, 1];
/// let mut source = StreamSource::new(&bytes[..]);
/// let value = decode_response(ResponseKind::DeviceList, &mut source, DecodeOptions::default())?;
/// assert_eq!(value, DecodedValue::DeviceList(Vec::new()));
/// # Ok::<(), sanewire_core::DecodeError>(())
/// ```
pub fn decode_response<S: ByteSource + ?Sized>(
    kind: ResponseKind,
    source: &mut S,
    options: DecodeOptions,
) -> Result<DecodedValue, DecodeError> {
    let mut reader = WireReader::with_options(source, options);
    let value = match kind {
        ResponseKind::Word => DecodedValue::Word(reader.read_word()?),
        ResponseKind::String => DecodedValue::String(reader.read_string()?),
        ResponseKind::Status => DecodedValue::Status(read_status(&mut reader)?),
        ResponseKind::DeviceList => DecodedValue::DeviceList(read_device_list(&mut reader)?),
        ResponseKind::Parameters => DecodedValue::Parameters(read_parameters(&mut reader)?),
    };
    Ok(value)
}

/// Decode a captured response file into a report.
pub fn decode_file(
    path: &Path,
    kind: ResponseKind,
    options: DecodeOptions,
) -> Result<DecodeReport, DecodeFileError> {
    let file = File::open(path)?;
    let bytes = file.metadata()?.len();
    tracing::info!(path = %path.display(), %kind, bytes, "decoding response file");

    let mut source = StreamSource::new(BufReader::new(file));
    decode_source(path, bytes, kind, &mut source, options)
}

/// Decode from an already-open source and report what was left unread.
pub fn decode_source<R: std::io::Read>(
    path: &Path,
    bytes: u64,
    kind: ResponseKind,
    source: &mut StreamSource<R>,
    options: DecodeOptions,
) -> Result<DecodeReport, DecodeFileError> {
    let response = decode_response(kind, &mut *source, options)
        .map_err(|source| DecodeFileError::Decode { kind, source })?;
    let consumed = source.consumed();
    let unconsumed = source.drain_remaining()?;
    if unconsumed > 0 {
        tracing::warn!(unconsumed, %kind, "bytes left after response");
    }

    let mut report = make_report(&path.display().to_string(), bytes, response);
    report.consumed_bytes = consumed;
    report.unconsumed_bytes = unconsumed;
    Ok(report)
}
