//! Windows path operations

use crate::error::{Error, Result};
use crate::platform::traits::PathOps;
use std::path::PathBuf;

pub struct WindowsPaths;

impl WindowsPaths {
    pub fn new() -> Self {
        Self
    }
}

impl PathOps for WindowsPaths {
    fn config_dir(&self) -> Result<PathBuf> {
        // Use AppData\Roaming on Windows
        dirs::config_dir().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}
