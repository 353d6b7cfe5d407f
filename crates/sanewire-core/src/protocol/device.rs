use serde::{Deserialize, Serialize};

use crate::source::ByteSource;

use super::error::DecodeError;
use super::layout;
use super::options::NullPointerPolicy;
use super::reader::WireReader;

/// One scanner as listed by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    pub vendor: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Opaque identifier of the session a device listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

/// A decoded device tied to the session that can open it.
///
/// The session is referenced by id only; resolving it is up to whoever owns
/// the sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceHandle {
    pub session: SessionId,
    pub record: DeviceRecord,
}

impl DeviceRecord {
    pub fn bind(self, session: SessionId) -> DeviceHandle {
        DeviceHandle {
            session,
            record: self,
        }
    }
}

/// Decode a device-list response.
///
/// Layout: status word, biased count word, then per element a pointer word
/// and a four-string record, then one trailing word. When the unbiased count
/// is not positive nothing after the count word is read, trailing word
/// included.
///
/// # Errors
/// - `DecodeError::Truncated` when the stream ends inside any field.
/// - `DecodeError::ProtocolConsistency` when a null pointer is met under
///   [`NullPointerPolicy::Reject`].
pub fn read_device_list<S: ByteSource + ?Sized>(
    reader: &mut WireReader<'_, S>,
) -> Result<Vec<DeviceRecord>, DecodeError> {
    let status = reader.read_word_as("device list status")?;
    tracing::debug!(status = status.as_i32(), "discarding device list status");

    let raw_count = reader.read_word_as("device list count")?.as_i32();
    let count = i64::from(raw_count) - layout::ARRAY_COUNT_BIAS;
    if count <= 0 {
        tracing::debug!(raw_count, "empty device list");
        return Ok(Vec::new());
    }

    let policy = reader.options().null_pointer;
    let mut devices = Vec::new();
    for index in 0..count {
        let device = read_device_pointer(reader, policy, index)?.ok_or_else(|| {
            DecodeError::ProtocolConsistency {
                message: format!("null device pointer at index {index} when not expected"),
            }
        })?;
        devices.push(device);
    }

    let trailing = reader.read_word_as("device list trailer")?;
    tracing::debug!(
        devices = devices.len(),
        trailer = trailing.as_i32(),
        "decoded device list"
    );
    Ok(devices)
}

fn read_device_pointer<S: ByteSource + ?Sized>(
    reader: &mut WireReader<'_, S>,
    policy: NullPointerPolicy,
    index: i64,
) -> Result<Option<DeviceRecord>, DecodeError> {
    if !reader.read_pointer()? {
        match policy {
            NullPointerPolicy::Decode => {
                tracing::warn!(index, "null device pointer, decoding record anyway");
            }
            NullPointerPolicy::Reject => return Ok(None),
        }
    }
    read_device_record(reader).map(Some)
}

/// Decode the four strings of one device record.
pub fn read_device_record<S: ByteSource + ?Sized>(
    reader: &mut WireReader<'_, S>,
) -> Result<DeviceRecord, DecodeError> {
    let [name, vendor, model, kind] = layout::DEVICE_RECORD_FIELDS;
    let name = reader.read_string_as(name)?;
    let vendor = reader.read_string_as(vendor)?;
    let model = reader.read_string_as(model)?;
    let kind = reader.read_string_as(kind)?;
    Ok(DeviceRecord {
        name,
        vendor,
        model,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::{DeviceRecord, SessionId, read_device_list};
    use crate::protocol::error::DecodeError;
    use crate::protocol::options::{DecodeOptions, NullPointerPolicy};
    use crate::protocol::reader::WireReader;
    use crate::source::StreamSource;

    fn word(out: &mut Vec<u8>, value: i32) {
        out.extend_from_slice(&value.to_be_bytes());
    }

    fn string(out: &mut Vec<u8>, value: &str) {
        word(out, value.len() as i32 + 1);
        out.extend_from_slice(value.as_bytes());
        out.push(0);
    }

    fn record(out: &mut Vec<u8>, pointer: i32, fields: [&str; 4]) {
        word(out, pointer);
        for field in fields {
            string(out, field);
        }
    }

    fn decode(
        bytes: &[u8],
        options: DecodeOptions,
    ) -> (Result<Vec<DeviceRecord>, DecodeError>, u64) {
        let mut source = StreamSource::new(bytes);
        let result = read_device_list(&mut WireReader::with_options(&mut source, options));
        (result, source.consumed())
    }

    #[test]
    fn empty_list_skips_trailer() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 1);
        word(&mut bytes, 0x5555);
        let (devices, consumed) = decode(&bytes, DecodeOptions::default());
        assert!(devices.unwrap().is_empty());
        assert_eq!(consumed, 8);
    }

    #[test]
    fn zero_and_negative_counts_are_empty() {
        for raw in [0, -1, i32::MIN] {
            let mut bytes = Vec::new();
            word(&mut bytes, 0);
            word(&mut bytes, raw);
            let (devices, consumed) = decode(&bytes, DecodeOptions::default());
            assert!(devices.unwrap().is_empty());
            assert_eq!(consumed, 8);
        }
    }

    #[test]
    fn two_devices_in_order() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 3);
        record(&mut bytes, 1, ["net:a", "Acme", "Flat 1", "flatbed scanner"]);
        record(&mut bytes, 1, ["net:b", "Acme", "Sheet 2", "sheetfed scanner"]);
        word(&mut bytes, 0);
        let (devices, consumed) = decode(&bytes, DecodeOptions::default());
        let devices = devices.unwrap();
        assert_eq!(consumed, bytes.len() as u64);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "net:a");
        assert_eq!(devices[0].model, "Flat 1");
        assert_eq!(devices[1].name, "net:b");
        assert_eq!(devices[1].kind, "sheetfed scanner");
    }

    #[test]
    fn zero_marker_still_decodes_record_by_default() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 2);
        record(&mut bytes, 0, ["test:0", "Noname", "frontend-tester", "virtual device"]);
        word(&mut bytes, 0);
        let (devices, consumed) = decode(&bytes, DecodeOptions::default());
        assert_eq!(
            devices.unwrap(),
            vec![DeviceRecord {
                name: "test:0".to_string(),
                vendor: "Noname".to_string(),
                model: "frontend-tester".to_string(),
                kind: "virtual device".to_string(),
            }]
        );
        assert_eq!(consumed, bytes.len() as u64);
    }

    #[test]
    fn zero_marker_rejected_when_configured() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 2);
        record(&mut bytes, 0, ["a", "b", "c", "d"]);
        word(&mut bytes, 0);
        let options = DecodeOptions::default().with_null_pointer(NullPointerPolicy::Reject);
        let (result, consumed) = decode(&bytes, options);
        let err = result.unwrap_err();
        assert!(matches!(err, DecodeError::ProtocolConsistency { .. }));
        assert!(err.to_string().contains("index 0"));
        assert_eq!(consumed, 12);
    }

    #[test]
    fn missing_trailer_is_truncation() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 2);
        record(&mut bytes, 1, ["a", "b", "c", "d"]);
        let (result, _) = decode(&bytes, DecodeOptions::default());
        assert!(matches!(
            result.unwrap_err(),
            DecodeError::Truncated {
                context: "device list trailer",
                ..
            }
        ));
    }

    #[test]
    fn truncated_inside_record() {
        let mut bytes = Vec::new();
        word(&mut bytes, 0);
        word(&mut bytes, 2);
        word(&mut bytes, 1);
        string(&mut bytes, "net:a");
        word(&mut bytes, 9);
        bytes.extend_from_slice(b"Ac");
        let (result, _) = decode(&bytes, DecodeOptions::default());
        assert!(matches!(
            result.unwrap_err(),
            DecodeError::Truncated {
                context: "vendor",
                needed: 9,
                actual: 2
            }
        ));
    }

    #[test]
    fn bind_attaches_session_id() {
        let handle = DeviceRecord {
            name: "net:a".to_string(),
            vendor: String::new(),
            model: String::new(),
            kind: String::new(),
        }
        .bind(SessionId(7));
        assert_eq!(handle.session, SessionId(7));
        assert_eq!(handle.record.name, "net:a");
    }
}
