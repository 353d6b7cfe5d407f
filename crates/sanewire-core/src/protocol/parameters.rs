use serde::{Deserialize, Serialize};

use crate::source::ByteSource;

use super::error::DecodeError;
use super::layout;
use super::reader::WireReader;

/// Geometry of one scan frame as reported before pixel data flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameParameters {
    /// Raw frame-type word; see [`FrameParameters::frame_type`].
    pub frame: i32,
    pub last_frame: bool,
    pub bytes_per_line: i32,
    pub pixels_per_line: i32,
    /// `-1` when the backend cannot tell in advance.
    pub lines: i32,
    pub depth: i32,
}

/// Known frame formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    Gray,
    Rgb,
    Red,
    Green,
    Blue,
}

impl FrameType {
    pub fn from_word(value: i32) -> Option<Self> {
        match value {
            0 => Some(FrameType::Gray),
            1 => Some(FrameType::Rgb),
            2 => Some(FrameType::Red),
            3 => Some(FrameType::Green),
            4 => Some(FrameType::Blue),
            _ => None,
        }
    }

    pub fn to_word(self) -> i32 {
        match self {
            FrameType::Gray => 0,
            FrameType::Rgb => 1,
            FrameType::Red => 2,
            FrameType::Green => 3,
            FrameType::Blue => 4,
        }
    }
}

impl FrameParameters {
    pub fn frame_type(&self) -> Option<FrameType> {
        FrameType::from_word(self.frame)
    }

    pub fn known_lines(&self) -> Option<u32> {
        u32::try_from(self.lines).ok()
    }

    /// Bytes in the whole frame, when the line count is known.
    pub fn frame_size_bytes(&self) -> Option<u64> {
        let per_line = u64::try_from(self.bytes_per_line).ok()?;
        let lines = u64::from(self.known_lines()?);
        per_line.checked_mul(lines)
    }
}

/// Decode the six words of a frame-parameters response.
///
/// # Errors
/// Returns `DecodeError::Truncated` naming the field that ran out of bytes.
pub fn read_parameters<S: ByteSource + ?Sized>(
    reader: &mut WireReader<'_, S>,
) -> Result<FrameParameters, DecodeError> {
    let [frame, last_frame, bytes_per_line, pixels_per_line, lines, depth] =
        layout::PARAMETER_FIELDS;
    let frame = reader.read_word_as(frame)?.as_i32();
    let last_frame = reader.read_word_as(last_frame)?.as_i32() == layout::LAST_FRAME_TRUE;
    let bytes_per_line = reader.read_word_as(bytes_per_line)?.as_i32();
    let pixels_per_line = reader.read_word_as(pixels_per_line)?.as_i32();
    let lines = reader.read_word_as(lines)?.as_i32();
    let depth = reader.read_word_as(depth)?.as_i32();

    Ok(FrameParameters {
        frame,
        last_frame,
        bytes_per_line,
        pixels_per_line,
        lines,
        depth,
    })
}
