use core::fmt;

/// Result alias for `hac`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engines and their collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Dimension mismatch (matrix rows, condensed length, bit vectors).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// Working storage for the matrix, heaps or registry could not be allocated.
    AllocationFailed {
        /// Size of the failed request.
        bytes: usize,
    },

    /// Reading a dataset failed.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Error::AllocationFailed { bytes } => {
                write!(f, "failed to allocate {bytes} bytes of working storage")
            }
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_counts() {
        let err = Error::InvalidClusterCount {
            requested: 5,
            n_items: 3,
        };
        assert_eq!(err.to_string(), "cannot create 5 clusters from 3 items");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.txt");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(ref m) if m.contains("missing.txt")));
    }
}
