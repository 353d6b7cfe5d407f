/// Every integer on the wire is one 4-byte big-endian word.
pub const WORD_LEN: usize = 4;

/// Wire array counts include one extra unit beyond the elements present.
pub const ARRAY_COUNT_BIAS: i64 = 1;

/// Strings occupy `len` bytes, the last of which is the terminator.
pub const STRING_TERMINATOR_LEN: usize = 1;

/// Field order of a device record.
pub const DEVICE_RECORD_FIELDS: [&str; 4] = ["name", "vendor", "model", "type"];

/// Word order of a frame-parameters response.
pub const PARAMETER_FIELDS: [&str; 6] = [
    "frame",
    "last_frame",
    "bytes_per_line",
    "pixels_per_line",
    "lines",
    "depth",
];

/// The only `last_frame` value meaning "true".
pub const LAST_FRAME_TRUE: i32 = 1;

/// Pointer markers are words; zero is the null pointer.
pub const NULL_POINTER: i32 = 0;
/// Marker written in front of every present record.
pub const PRESENT_POINTER: i32 = 1;
