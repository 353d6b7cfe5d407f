use serde::{Deserialize, Serialize};

/// What to do when a device pointer marker is zero.
///
/// The daemon has been observed sending zero markers in front of records that
/// are really present, so the default keeps decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPointerPolicy {
    /// Decode the record that follows regardless of the marker.
    #[default]
    Decode,
    /// Fail with a protocol consistency error before reading the record.
    Reject,
}

/// Decoder tuning shared by every response kind.
///
/// # Examples
/// ```
/// use sanewire_core::{DecodeOptions, NullPointerPolicy};
///
/// let options = DecodeOptions::default();
/// assert_eq!(options.null_pointer, NullPointerPolicy::Decode);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub null_pointer: NullPointerPolicy,
}

impl DecodeOptions {
    pub fn with_null_pointer(mut self, policy: NullPointerPolicy) -> Self {
        self.null_pointer = policy;
        self
    }
}
