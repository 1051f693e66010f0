//! Windows shell operations

use crate::platform::traits::ShellOps;
use std::env;
use std::path::PathBuf;

pub struct WindowsShell;

impl WindowsShell {
    pub fn new() -> Self {
        Self
    }
}

impl ShellOps for WindowsShell {
    fn command_shell(&self) -> PathBuf {
        env::var_os("ComSpec")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows\System32\cmd.exe"))
    }

    fn command_flag(&self) -> &'static str {
        "/C"
    }

    fn pipefail_prelude(&self) -> Option<&'static str> {
        // cmd.exe has no equivalent; only the last stage's status counts
        None
    }
}
