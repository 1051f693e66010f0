//! Compression codecs wrapping the dump pipeline

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Compression applied to the dump stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionCodec {
    #[default]
    None,
    Gzip,
    Bzip2,
    Zstd,
}

impl CompressionCodec {
    /// All supported codecs
    pub const ALL: [CompressionCodec; 4] = [
        CompressionCodec::None,
        CompressionCodec::Gzip,
        CompressionCodec::Bzip2,
        CompressionCodec::Zstd,
    ];

    /// Canonical codec name
    pub fn name(&self) -> &'static str {
        match self {
            CompressionCodec::None => "none",
            CompressionCodec::Gzip => "gzip",
            CompressionCodec::Bzip2 => "bzip2",
            CompressionCodec::Zstd => "zstd",
        }
    }

    /// Compressor binary the pipeline pipes through
    pub fn program(&self) -> Option<&'static str> {
        match self {
            CompressionCodec::None => None,
            CompressionCodec::Gzip => Some("gzip"),
            CompressionCodec::Bzip2 => Some("bzip2"),
            CompressionCodec::Zstd => Some("zstd"),
        }
    }

    /// Compressed-file suffix appended after `.sql`
    fn suffix(&self) -> &'static str {
        match self {
            CompressionCodec::None => "",
            CompressionCodec::Gzip => ".gz",
            CompressionCodec::Bzip2 => ".bz2",
            CompressionCodec::Zstd => ".zst",
        }
    }

    /// Full file extension of a dump written with this codec
    pub fn extension(&self) -> String {
        format!(".sql{}", self.suffix())
    }

    /// Wrap a command line so its output is compressed
    pub fn compressing_command(&self, command: &str) -> String {
        match self.program() {
            None => command.to_string(),
            Some(program) => format!("{} | {} -c ", command, program),
        }
    }

    /// Fix up a file name so it carries this codec's extension
    pub fn file_name(&self, file_name: &str) -> String {
        if file_name.is_empty() {
            return String::new();
        }

        let suffix = self.suffix();
        if !suffix.is_empty() && file_name.ends_with(suffix) {
            file_name.to_string()
        } else if file_name.ends_with(".sql") {
            format!("{}{}", file_name, suffix)
        } else {
            format!("{}{}", file_name, self.extension())
        }
    }
}

impl FromStr for CompressionCodec {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(CompressionCodec::None),
            "gzip" | "gz" => Ok(CompressionCodec::Gzip),
            "bzip2" | "bz2" => Ok(CompressionCodec::Bzip2),
            "zstd" | "zst" => Ok(CompressionCodec::Zstd),
            _ => Err(Error::UnknownCompression {
                codec: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
