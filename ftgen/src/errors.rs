use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned by the migration generator.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Wrong argument count or an unusable migration name.
    #[error("usage: {message}")]
    Usage { message: String },

    /// Neither the working directory nor a child of it is the module directory.
    #[error("could not find the '{module_dir}' module directory from {}", start.display())]
    ModuleRootNotFound { module_dir: String, start: PathBuf },

    /// The descriptor source returned nothing for the configured namespace.
    #[error("no indexable types registered under namespace '{namespace}'")]
    NoDescriptors { namespace: String },

    /// A filesystem operation failed.
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The second script could not be written after the first one was.
    #[error(
        "wrote {} but failed to write {}: {source} (the first script was not removed)",
        written.display(),
        path.display()
    )]
    PartialEmit {
        written: PathBuf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An existing script's version is at or beyond the largest representable version.
    #[error("{} leaves no next migration version (limit is V{})", path.display(), u32::MAX)]
    VersionOverflow { path: PathBuf },

    /// Configuration file is unreadable, malformed or references an unset variable.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A source file could not be read or parsed while building the manifest.
    #[error("failed to scan {}: {message}", path.display())]
    Scan { path: PathBuf, message: String },
}

impl GenerateError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Process exit code for this failure. Usage errors follow the clap convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::Usage { .. } => 2,
            _ => 1,
        }
    }
}

pub type GenerateResult<T> = Result<T, GenerateError>;
