//! Unix filesystem operations

use crate::error::Result;
use crate::platform::traits::FilesystemOps;
use std::env;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub struct UnixFilesystem;

impl UnixFilesystem {
    pub fn new() -> Self {
        Self
    }

    fn is_executable(path: &Path) -> bool {
        path.metadata()
            .map(|metadata| metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }
}

impl FilesystemOps for UnixFilesystem {
    fn find_command(&self, command: &str) -> Result<Option<PathBuf>> {
        // Paths are checked as given, bare names are looked up in PATH
        if command.contains('/') {
            let path = PathBuf::from(command);
            return Ok(Self::is_executable(&path).then_some(path));
        }

        let Some(path_env) = env::var_os("PATH") else {
            return Ok(None);
        };

        Ok(env::split_paths(&path_env)
            .map(|dir| dir.join(command))
            .find(|candidate| Self::is_executable(candidate)))
    }
}
