//! Windows-specific platform implementations

mod filesystem;
mod paths;
mod shell;

pub use filesystem::WindowsFilesystem;
pub use paths::WindowsPaths;
pub use shell::WindowsShell;
