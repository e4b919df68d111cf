//! Definition of errors.

use std::error::Error;
use std::fmt;

pub type Result<T, E = TaggerError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum TaggerError {
    InvalidModel(InvalidModelError),
    InvalidArgument(InvalidArgumentError),
    Optimization(OptimizationError),
    EmptySet(EmptySetError),
    DecodeError(bincode::error::DecodeError),
    EncodeError(bincode::error::EncodeError),
    IoError(std::io::Error),
}

impl TaggerError {
    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// Creates an optimization error.
    ///
    /// Public so that [`Optimizer`](crate::Optimizer) implementations outside
    /// this crate can report failures of their own.
    pub fn optimization<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::Optimization(OptimizationError { msg: msg.into() })
    }

    pub(crate) fn empty_set(operation: &'static str) -> Self {
        Self::EmptySet(EmptySetError { operation })
    }
}

impl fmt::Display for TaggerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::Optimization(e) => e.fmt(f),
            Self::EmptySet(e) => e.fmt(f),
            Self::DecodeError(e) => e.fmt(f),
            Self::EncodeError(e) => e.fmt(f),
            Self::IoError(e) => e.fmt(f),
        }
    }
}

impl Error for TaggerError {}

/// Error used when loaded model data does not have the expected shape.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the optimizer collaborator fails or does not converge.
#[derive(Debug)]
pub struct OptimizationError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for OptimizationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OptimizationError: {}", self.msg)
    }
}

impl Error for OptimizationError {}

/// Error used when an operation requiring training documents receives none.
#[derive(Debug)]
pub struct EmptySetError {
    /// Name of the rejected operation.
    pub(crate) operation: &'static str,
}

impl fmt::Display for EmptySetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "EmptySetError: {}: the training set contains no documents",
            self.operation
        )
    }
}

impl Error for EmptySetError {}

impl From<bincode::error::DecodeError> for TaggerError {
    fn from(error: bincode::error::DecodeError) -> Self {
        Self::DecodeError(error)
    }
}

impl From<bincode::error::EncodeError> for TaggerError {
    fn from(error: bincode::error::EncodeError) -> Self {
        Self::EncodeError(error)
    }
}

impl From<std::io::Error> for TaggerError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}
