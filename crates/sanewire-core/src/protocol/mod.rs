//! Wire decoding for daemon responses.
//!
//! Every response is an untagged run of words, strings and pointer markers
//! whose meaning comes from position alone. The layering follows the rest of
//! the crate:
//! - `layout`: wire constants and field order (source of truth)
//! - `reader`: word, string and pointer primitives over a byte source
//! - `device`, `parameters`, `status`: response-level decoders
//! - `writer`: the encoding inverse, used for fixtures and round trips
//! - `error`: explicit decode/encode errors
//!
//! Decoders are stateless between calls and read exactly the bytes one
//! response occupies.

pub mod device;
pub mod error;
pub mod layout;
pub mod options;
pub mod parameters;
pub mod reader;
pub mod status;
pub mod word;
pub mod writer;

pub use device::{DeviceHandle, DeviceRecord, SessionId, read_device_list, read_device_record};
pub use error::{DecodeError, EncodeError};
pub use options::{DecodeOptions, NullPointerPolicy};
pub use parameters::{FrameParameters, FrameType, read_parameters};
pub use reader::WireReader;
pub use status::{Status, read_status};
pub use word::Word;
pub use writer::WireWriter;
