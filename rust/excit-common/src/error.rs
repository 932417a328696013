use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn out_of_domain(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfDomain {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn not_supported(kind: impl Into<String>, operation: impl Into<String>) -> Error {
        Error(
            ErrorKind::NotSupported {
                kind: kind.into(),
                operation: operation.into(),
            }
            .into(),
        )
    }

    pub fn out_of_memory(context: impl Into<String>) -> Error {
        Error(
            ErrorKind::OutOfMemory {
                context: context.into(),
            }
            .into(),
        )
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn is_invalid_arg(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidArgument { .. })
    }

    pub fn is_out_of_domain(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfDomain { .. })
    }

    pub fn is_not_supported(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotSupported { .. })
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfMemory { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("{name} out of domain: {message}")]
    OutOfDomain { name: String, message: String },

    #[error("operation '{operation}' is not supported by {kind} iterators")]
    NotSupported { kind: String, operation: String },

    #[error("out of memory while allocating {context}")]
    OutOfMemory { context: String },

    #[error("invalid format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(e: std::collections::TryReserveError) -> Self {
        Error::out_of_memory(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::invalid_format("json", e.to_string())
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Self {
        Error::out_of_domain("integer conversion", e.to_string())
    }
}
