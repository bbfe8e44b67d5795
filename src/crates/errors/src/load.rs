use thiserror::Error;

/// Fatal, startup-time errors raised while walking the mapping directory.
///
/// Every variant here aborts the load: the loader never exposes a partially
/// populated catalogue.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read mapping file {path}: {message}")]
    ReadFile { path: String, message: String },

    #[error("failed to decode mapping document {path}: {message}")]
    Decode { path: String, message: String },

    #[error("failed to compile pattern for {field} in {path}: {message}")]
    InvalidPattern {
        path: String,
        field: String,
        message: String,
    },

    #[error("failed to parse json path for {field} in {path}: {message}")]
    InvalidJsonPath {
        path: String,
        field: String,
        message: String,
    },

    #[error("failed to read response body file {path} referenced from {mapping_path}: {message}")]
    ReadResponseBody {
        path: String,
        mapping_path: String,
        message: String,
    },
}
