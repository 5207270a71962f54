pub mod lzw;
pub mod bits;
pub mod dict;
pub mod table;
pub mod width;
mod ratio;

pub use lzw::{LZW, RunStats};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of input symbols (one per byte value).
pub const R: u32 = 256;
/// Terminal codeword of every stream. Never assigned to an entry.
pub const EOF: u32 = R;
/// Absolute dictionary size.
pub const CODEBOOK_MAX: u32 = 65536;
pub const MIN_WIDTH: u32 = 9;
pub const MAX_WIDTH: u32 = 16;
/// Degradation factor past which the monitored codebook is rebuilt.
pub const MONITOR_RATIO: f64 = 1.1;


#[derive(Debug, Error)]
pub enum CompressorError {
    #[error("unknown codebook method: {0:?} (expected n, r or m)")]
    InvalidMethod(String),
    #[error("invalid stream: unknown codebook method tag {0:#04x}")]
    UnknownMethodTag(u8),
    #[error("invalid stream: missing codebook method tag")]
    MissingTag,
    #[error("invalid stream: codeword {code} is not defined (next entry is {next})")]
    DecompressErrorWithCode { code: u32, next: u32 },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// What happens to the codebook once it holds `CODEBOOK_MAX` codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Freeze the codebook and keep using it.
    Fixed,
    /// Rebuild the codebook every time it fills up.
    Reset,
    /// Rebuild the codebook only when the compression ratio has degraded.
    Monitor,
}

impl Method {
    pub fn tag(self) -> u8 {
        match self {
            Method::Fixed => b'n',
            Method::Reset => b'r',
            Method::Monitor => b'm',
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, CompressorError> {
        match tag {
            b'n' => Ok(Method::Fixed),
            b'r' => Ok(Method::Reset),
            b'm' => Ok(Method::Monitor),
            other => Err(CompressorError::UnknownMethodTag(other)),
        }
    }
}

impl FromStr for Method {
    type Err = CompressorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" | "fixed" => Ok(Method::Fixed),
            "r" | "reset" => Ok(Method::Reset),
            "m" | "monitor" => Ok(Method::Monitor),
            other => Err(CompressorError::InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Fixed => "fixed",
            Method::Reset => "reset",
            Method::Monitor => "monitor",
        };
        f.write_str(name)
    }
}

pub trait Compressor: Send + Sync {
    fn compress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError>;
    fn decompress(&self, src: &[u8]) -> Result<Vec<u8>, CompressorError>;
}
