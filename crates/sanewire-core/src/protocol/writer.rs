use std::io::Write;

use super::device::DeviceRecord;
use super::error::EncodeError;
use super::layout;
use super::parameters::FrameParameters;
use super::status::Status;
use super::word::Word;

/// Writes values in the daemon's wire form.
///
/// Mirrors the decoders, including the count bias, the trailing word after a
/// non-empty device list, and its absence after an empty one.
///
/// # Examples
/// ```
/// use sanewire_core::WireWriter;
///
/// let mut out = Vec::new();
/// WireWriter::new(&mut out).write_string("abcd")?;
/// assert_eq!(out, [0, 0, 0, 5, b'a', b'b', b'c', b'd', 0]);
/// # Ok::<(), sanewire_core::EncodeError>(())
/// ```
pub struct WireWriter<W> {
    inner: W,
}

impl<W: Write> WireWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_word(&mut self, word: impl Into<Word>) -> Result<(), EncodeError> {
        self.inner.write_all(&word.into().to_be_bytes())?;
        Ok(())
    }

    pub fn write_pointer(&mut self, present: bool) -> Result<(), EncodeError> {
        let marker = if present {
            layout::PRESENT_POINTER
        } else {
            layout::NULL_POINTER
        };
        self.write_word(marker)
    }

    /// Empty strings are sent as a bare zero length.
    pub fn write_string(&mut self, value: &str) -> Result<(), EncodeError> {
        if value.is_empty() {
            return self.write_word(0u32);
        }
        let mut bytes = string_to_latin1(value)?;
        bytes.push(0);
        let len = u32::try_from(bytes.len())
            .map_err(|_| EncodeError::TooLong { len: bytes.len() })?;
        self.write_word(len)?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    pub fn write_status(&mut self, status: Status) -> Result<(), EncodeError> {
        self.write_word(status.to_word())
    }

    pub fn write_device_record(&mut self, device: &DeviceRecord) -> Result<(), EncodeError> {
        self.write_string(&device.name)?;
        self.write_string(&device.vendor)?;
        self.write_string(&device.model)?;
        self.write_string(&device.kind)
    }

    pub fn write_device_list(
        &mut self,
        status: Status,
        devices: &[DeviceRecord],
    ) -> Result<(), EncodeError> {
        let count = i64::try_from(devices.len())
            .ok()
            .and_then(|len| i32::try_from(len + layout::ARRAY_COUNT_BIAS).ok())
            .ok_or(EncodeError::TooLong { len: devices.len() })?;
        self.write_status(status)?;
        self.write_word(count)?;
        if devices.is_empty() {
            return Ok(());
        }
        for device in devices {
            self.write_pointer(true)?;
            self.write_device_record(device)?;
        }
        self.write_word(0u32)
    }

    pub fn write_parameters(&mut self, params: &FrameParameters) -> Result<(), EncodeError> {
        self.write_word(params.frame)?;
        self.write_word(params.last_frame)?;
        self.write_word(params.bytes_per_line)?;
        self.write_word(params.pixels_per_line)?;
        self.write_word(params.lines)?;
        self.write_word(params.depth)
    }
}

fn string_to_latin1(value: &str) -> Result<Vec<u8>, EncodeError> {
    value
        .chars()
        .map(|ch| u8::try_from(ch).map_err(|_| EncodeError::Unencodable { ch }))
        .collect()
}
