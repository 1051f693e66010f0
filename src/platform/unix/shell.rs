//! Unix shell operations

use super::UnixFilesystem;
use crate::platform::traits::{FilesystemOps, ShellOps};
use std::path::PathBuf;

/// Enables `pipefail` when the shell knows it; the subshell probe keeps a
/// POSIX `sh` without the option from aborting
const PIPEFAIL_PRELUDE: &str = "if (set -o pipefail) 2>/dev/null; then set -o pipefail; fi; ";

pub struct UnixShell;

impl UnixShell {
    pub fn new() -> Self {
        Self
    }
}

impl ShellOps for UnixShell {
    fn command_shell(&self) -> PathBuf {
        // bash always supports pipefail, /bin/sh only on newer systems
        match UnixFilesystem::new().find_command("bash") {
            Ok(Some(bash)) => bash,
            _ => PathBuf::from("/bin/sh"),
        }
    }

    fn command_flag(&self) -> &'static str {
        "-c"
    }

    fn pipefail_prelude(&self) -> Option<&'static str> {
        Some(PIPEFAIL_PRELUDE)
    }
}
