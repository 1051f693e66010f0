//! Platform abstraction layer
//!
//! This module provides a unified interface for platform-specific operations,
//! abstracting away differences between Unix and Windows.

mod traits;
#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

pub use traits::*;

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific filesystem operations
    pub fn filesystem() -> Box<dyn FilesystemOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixFilesystem::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsFilesystem::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific path operations
    pub fn paths() -> Box<dyn PathOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixPaths::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsPaths::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }

    /// Get the platform-specific shell operations
    pub fn shell() -> Box<dyn ShellOps> {
        #[cfg(unix)]
        {
            Box::new(unix::UnixShell::new())
        }

        #[cfg(windows)]
        {
            Box::new(windows::WindowsShell::new())
        }

        #[cfg(not(any(unix, windows)))]
        {
            compile_error!("Unsupported platform");
        }
    }
}
