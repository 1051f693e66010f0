//! Windows filesystem operations

use crate::error::Result;
use crate::platform::traits::FilesystemOps;
use std::env;
use std::path::{Path, PathBuf};

const EXECUTABLE_EXTENSIONS: [&str; 5] = ["", ".exe", ".bat", ".cmd", ".com"];

pub struct WindowsFilesystem;

impl WindowsFilesystem {
    pub fn new() -> Self {
        Self
    }

    fn candidates(base: &Path) -> impl Iterator<Item = PathBuf> + '_ {
        EXECUTABLE_EXTENSIONS.iter().map(move |ext| {
            let mut name = base.as_os_str().to_os_string();
            name.push(ext);
            PathBuf::from(name)
        })
    }
}

impl FilesystemOps for WindowsFilesystem {
    fn find_command(&self, command: &str) -> Result<Option<PathBuf>> {
        let direct = Path::new(command);
        if direct.components().count() > 1 {
            return Ok(Self::candidates(direct).find(|path| path.is_file()));
        }

        let Some(path_env) = env::var_os("PATH") else {
            return Ok(None);
        };

        for dir in env::split_paths(&path_env) {
            let base = dir.join(command);
            if let Some(found) = Self::candidates(&base).find(|path| path.is_file()) {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }
}
