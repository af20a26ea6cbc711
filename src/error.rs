use core::fmt;

/// An error returned when constructing a codec or a value.
///
/// Encoding and decoding never fail for well-formed inputs; special
/// values simply map to their bit-pattern counterparts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    reason: &'static str,
}

impl Error {
    pub(crate) const fn new(kind: ErrorKind, reason: &'static str) -> Self {
        Self { kind, reason }
    }

    pub(crate) const fn invalid_parameter(reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidParameter, reason)
    }

    pub(crate) const fn invalid_sign(reason: &'static str) -> Self {
        Self::new(ErrorKind::InvalidSign, reason)
    }

    pub(crate) const fn category_mismatch(reason: &'static str) -> Self {
        Self::new(ErrorKind::CategoryMismatch, reason)
    }

    pub(crate) const fn not_finite(reason: &'static str) -> Self {
        Self::new(ErrorKind::NotFinite, reason)
    }

    /// Returns the kind of error.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

/// A categorization of [`Error`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A codec was constructed with an out-of-range bit count.
    InvalidParameter,
    /// A sign was neither positive nor negative, or disagreed with
    /// the sign of a nonzero magnitude.
    InvalidSign,
    /// A finite category was passed to a special-value constructor.
    CategoryMismatch,
    /// The magnitude of a non-finite value was requested.
    NotFinite,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid codec parameter"),
            Self::InvalidSign => write!(f, "invalid sign"),
            Self::CategoryMismatch => write!(f, "mismatched category"),
            Self::NotFinite => write!(f, "value is not finite"),
        }
    }
}
