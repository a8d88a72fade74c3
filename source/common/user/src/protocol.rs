//! Text stream emitted by the sensor image over the serial line.
//!
//! After reset the device sends [`BANNER`] and then one record per sample:
//! `Raw Sensor Value: <decimal>\r\n`.

use crate::values::RawSample;
use core::{fmt, str};
use derive_more::Display;

pub const LINE_END: &str = "\r\n";

pub const BANNER_TITLE: &str = "Capacitive Soil Moisture Sensor Test (AVR C)";
pub const BANNER_RULE: &str = "--------------------------------------------";
pub const BANNER: [&str; 2] = [BANNER_TITLE, BANNER_RULE];

pub const RECORD_PREFIX: &str = "Raw Sensor Value: ";

/// Longest line the device ever produces, banner included.
pub const MAX_LINE_LEN: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Display)]
pub enum ParseError {
    #[display(fmt = "line does not start with record prefix")]
    MissingPrefix,
    #[display(fmt = "record value is not a decimal number")]
    InvalidNumber,
    #[display(fmt = "record value exceeds 10 bits")]
    OutOfRange,
    #[display(fmt = "line exceeds {} bytes", MAX_LINE_LEN)]
    LineTooLong,
    #[display(fmt = "line is not valid utf-8")]
    InvalidUtf8,
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Writes a complete record line, terminator included.
pub fn write_record<W: fmt::Write>(w: &mut W, sample: RawSample) -> fmt::Result {
    write!(w, "{}{}{}", RECORD_PREFIX, sample, LINE_END)
}

/// Parses a record line, with or without the trailing CRLF.
pub fn parse_record(line: &str) -> Result<RawSample, ParseError> {
    let line = line.strip_suffix(LINE_END).unwrap_or(line);
    let digits = line
        .strip_prefix(RECORD_PREFIX)
        .ok_or(ParseError::MissingPrefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber);
    }
    let value: u32 = digits.parse().map_err(|_| ParseError::OutOfRange)?;
    u16::try_from(value)
        .ok()
        .and_then(|v| RawSample::try_from(v).ok())
        .ok_or(ParseError::OutOfRange)
}

pub fn is_banner_line(index: usize, line: &str) -> bool {
    BANNER.get(index).map_or(false, |expected| *expected == line)
}

/// Splits a byte stream into CRLF-terminated lines.
pub struct LineDecoder {
    buffer: [u8; MAX_LINE_LEN],
    len: usize,
    overflow: bool,
    complete: bool,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub const fn new() -> Self {
        Self {
            buffer: [0; MAX_LINE_LEN],
            len: 0,
            overflow: false,
            complete: false,
        }
    }

    /// Feeds one byte. Returns a line without its terminator once `\r\n` is seen.
    ///
    /// An overlong line is reported once at its terminator and then discarded.
    pub fn push(&mut self, byte: u8) -> Option<Result<&str, ParseError>> {
        if self.complete {
            self.len = 0;
            self.overflow = false;
            self.complete = false;
        }

        if byte == b'\n' && self.len > 0 && self.buffer[self.len - 1] == b'\r' {
            self.complete = true;
            if self.overflow {
                return Some(Err(ParseError::LineTooLong));
            }
            let line = &self.buffer[..self.len - 1];
            return Some(str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8));
        }

        if self.len < MAX_LINE_LEN {
            self.buffer[self.len] = byte;
            self.len += 1;
        } else {
            self.overflow = true;
            // Keep the last byte so that a CR split from its LF is still detected.
            self.buffer[MAX_LINE_LEN - 1] = byte;
        }
        None
    }

    /// Bytes of the current unterminated line.
    pub fn pending(&self) -> usize {
        if self.complete {
            0
        } else {
            self.len
        }
    }
}
