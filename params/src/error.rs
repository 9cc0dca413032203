use thiserror::Error;

/// Errors raised while reconstructing or rendering a parameter vector.
#[derive(Error, Debug)]
pub enum ParamsError {
    /// A token that must be a decimal integer is not
    #[error("line {line}: expected an integer, found '{token}'")]
    MalformedNumber { line: usize, token: String },

    /// A `param`, `to` or `Iteration` marker ended the line
    #[error("line {line}: missing integer after '{after}'")]
    MissingNumber { line: usize, after: &'static str },

    #[error("line {line}: param index {index} is too large")]
    ParamIndexTooLarge { line: usize, index: usize },

    #[error("array '{name}' has unsupported shape {dims:?} (expected 0, 1 or 3 dimensions)")]
    UnsupportedDimensionality { name: String, dims: Vec<usize> },

    #[error("array '{name}' at offset {offset} needs {missing} more value(s) than the vector holds")]
    IndexOutOfRange {
        name: String,
        offset: usize,
        missing: usize,
    },

    #[error("invalid array declaration: {0}")]
    InvalidDeclaration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

pub type ParamsResult<T> = Result<T, ParamsError>;
