use serde::{Deserialize, Serialize};

use crate::source::ByteSource;

use super::error::DecodeError;
use super::reader::WireReader;

/// Status codes carried in the first word of most daemon replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Good,
    Unsupported,
    Cancelled,
    DeviceBusy,
    Invalid,
    Eof,
    Jammed,
    NoDocs,
    CoverOpen,
    IoError,
    NoMem,
    AccessDenied,
    Unknown(i32),
}

impl Status {
    pub fn from_word(value: i32) -> Self {
        match value {
            0 => Status::Good,
            1 => Status::Unsupported,
            2 => Status::Cancelled,
            3 => Status::DeviceBusy,
            4 => Status::Invalid,
            5 => Status::Eof,
            6 => Status::Jammed,
            7 => Status::NoDocs,
            8 => Status::CoverOpen,
            9 => Status::IoError,
            10 => Status::NoMem,
            11 => Status::AccessDenied,
            other => Status::Unknown(other),
        }
    }

    pub fn to_word(self) -> i32 {
        match self {
            Status::Good => 0,
            Status::Unsupported => 1,
            Status::Cancelled => 2,
            Status::DeviceBusy => 3,
            Status::Invalid => 4,
            Status::Eof => 5,
            Status::Jammed => 6,
            Status::NoDocs => 7,
            Status::CoverOpen => 8,
            Status::IoError => 9,
            Status::NoMem => 10,
            Status::AccessDenied => 11,
            Status::Unknown(value) => value,
        }
    }

    pub fn is_good(self) -> bool {
        self == Status::Good
    }
}

pub fn read_status<S: ByteSource + ?Sized>(
    reader: &mut WireReader<'_, S>,
) -> Result<Status, DecodeError> {
    let word = reader.read_word_as("status")?;
    Ok(Status::from_word(word.as_i32()))
}
