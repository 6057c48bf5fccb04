//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", .file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("empty url in {}", .file_path.display())]
    EmptyUrl { file_path: PathBuf },
    #[error("did not find expected version tag (\"version\") in {}", .0.display())]
    DidNotFindExpectedVersionTag(PathBuf),
    #[error("unsupported configuration version {version} in {}", .file_path.display())]
    UnsupportedVersion { file_path: PathBuf, version: String },

    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when turning a parsed configuration into a runtime one.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("missing environment variable when processing {}: {message}", .file_path.display())]
    MissingEnvironmentVariable { file_path: PathBuf, message: String },
    #[error("invalid url \"{url}\": {message}")]
    InvalidUrl { url: String, message: String },
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("unable to serialize configuration: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
