use serde::{Deserialize, Serialize};

/// Boxed inner cause carried by an [`Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification of every error produced by this crate.
///
/// Each kind renders as a fixed label. Errors built from a kind may wrap an
/// inner cause, in which case they render as `"<label>: <inner>"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum ErrorKind {
    /// Building, sending or decoding an HTTP request failed.
    #[error("http request failed")]
    HttpRequest,

    /// The API answered with `status: "Failed"`.
    #[error("api invocation failed")]
    ApiInvocation,

    /// The caller supplied an argument the API cannot accept.
    ///
    /// Always raised before any request is sent.
    #[error("illegal argument provided")]
    IllegalArgument,

    /// The client could not be constructed from the given options.
    #[error("invalid options provided")]
    InvalidOptions,

    /// A second set of credentials was configured.
    #[error("more than one kind of credentials specified")]
    MultipleCredentials,

    /// The API rejected a request sent without credentials.
    #[error("no credentials specified, unable to authenticate")]
    MissingCredentials,

    /// The configured credentials may not perform the requested operation.
    #[error("insufficient privileges for current api credentials")]
    InsufficientPrivileges,
}

impl ErrorKind {
    /// Wraps `inner` as the cause of a new error of this kind.
    pub fn wrap(self, inner: impl Into<BoxError>) -> Error {
        Error {
            kind: self,
            inner: Some(inner.into()),
        }
    }
}

/// Error type returned by all client operations.
///
/// Use [`Error::is`] to classify an error. The check walks the whole
/// [`source`](std::error::Error::source) chain, so a kind that was wrapped
/// by another kind is still detected.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: Option<BoxError>,
}

impl Error {
    /// Creates an error of `kind` without an inner cause.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, inner: None }
    }

    /// The outermost kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error or any error it wraps is of `kind`.
    ///
    /// An error in the chain matches when its message equals the label of
    /// `kind` or starts with `"<label>: "`.
    pub fn is(&self, kind: ErrorKind) -> bool {
        let label = kind.to_string();
        let prefix = format!("{label}: ");

        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(self);
        while let Some(err) = current {
            let message = err.to_string();
            if message == label || message.starts_with(&prefix) {
                return true;
            }
            current = err.source();
        }

        false
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Some(inner) => write!(f, "{}: {inner}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
