//! sanewire core library: decoding SANE network daemon responses.
//!
//! A daemon reply is an untagged run of big-endian words, length-prefixed
//! Latin-1 strings and pointer markers. Meaning comes from position alone, so
//! every decoder here consumes exactly the bytes its response occupies and
//! nothing more; a single misread word would misalign every later reply on the
//! same connection.
//!
//! Layers:
//! - `source`: the "read N bytes or fail" capability decoders borrow
//! - `protocol`: word/string primitives and the response decoders
//! - `decode`: dispatch by response kind and file-level reports
//!
//! Invariants:
//! - Decoders hold no state between calls.
//! - Truncation is always an error, never padding.
//! - An empty device list is exactly two words; a non-empty one ends with an
//!   extra trailing word.
//!
//! Connection setup, request encoding, option negotiation and image transfer
//! belong to the session layer and are not handled here.
//!
//! # Examples
//! ```
//! use sanewire_core::{StreamSource, WireReader, read_parameters};
//!
//! let words: [i32; 6] = [1, 1, 100, 50, 20, 8];
//! let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
//! let mut source = StreamSource::new(bytes.as_slice());
//! let params = read_parameters(&mut WireReader::new(&mut source))?;
//! assert!(params.last_frame);
//! assert_eq!(params.depth, 8);
//! # Ok::<(), sanewire_core::DecodeError>(())
//! ```

use serde::{Deserialize, Serialize};

mod decode;
pub mod protocol;
mod source;

pub use decode::{
    DecodeFileError, DecodedValue, ResponseKind, decode_file, decode_response, decode_source,
};
pub use protocol::{
    DecodeError, DecodeOptions, DeviceHandle, DeviceRecord, EncodeError, FrameParameters,
    FrameType, NullPointerPolicy, SessionId, Status, WireReader, WireWriter, Word,
    read_device_list, read_device_record, read_parameters, read_status,
};
pub use source::{ByteSource, READ_CHUNK, SourceError, StreamSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Result of decoding one captured response.
///
/// # Examples
/// ```
/// use sanewire_core::{DecodedValue, make_report};
///
/// let report = make_report("reply.bin", 4, DecodedValue::String(String::new()));
/// assert_eq!(report.report_version, sanewire_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    pub input: InputInfo,
    /// Bytes the decoder read for the response.
    pub consumed_bytes: u64,
    /// Bytes left in the input after the response.
    pub unconsumed_bytes: u64,
    pub response: DecodedValue,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Build a report with base fields filled and zero byte counters.
pub fn make_report(input_path: &str, input_bytes: u64, response: DecodedValue) -> DecodeReport {
    DecodeReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "sanewire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        consumed_bytes: 0,
        unconsumed_bytes: 0,
        response,
    }
}

impl DecodeReport {
    pub fn fully_consumed(&self) -> bool {
        self.unconsumed_bytes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_json_shape() {
        let mut report = make_report(
            "reply.bin",
            24,
            DecodedValue::Parameters(FrameParameters {
                frame: 0,
                last_frame: false,
                bytes_per_line: 10,
                pixels_per_line: 10,
                lines: -1,
                depth: 1,
            }),
        );
        report.consumed_bytes = 24;

        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["tool"]["name"], "sanewire");
        assert_eq!(value["consumed_bytes"], 24);
        assert_eq!(value["response"]["kind"], "parameters");
        assert_eq!(value["response"]["value"]["lines"], -1);
        assert!(report.fully_consumed());
    }

    #[test]
    fn device_type_field_name() {
        let report = make_report(
            "reply.bin",
            0,
            DecodedValue::DeviceList(vec![DeviceRecord {
                name: "net:a".to_string(),
                vendor: "Acme".to_string(),
                model: "X".to_string(),
                kind: "flatbed scanner".to_string(),
            }]),
        );
        let value = serde_json::to_value(&report).expect("report json");
        let device = &value["response"]["value"][0];
        assert_eq!(device["type"], "flatbed scanner");
        assert!(device.get("kind").is_none());
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = make_report("reply.bin", 4, DecodedValue::Status(Status::Jammed));
        let json = serde_json::to_string(&report).unwrap();
        let back: DecodeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
