//! Crate-wide error type.
//!
//! The [err_at] macro stamps the call-site (file and line) onto every error
//! so that a programmer error can be traced back without a backtrace
//! dependency.

use std::fmt;

/// Error variants produced by this crate.
///
/// There are no I/O or parsing errors here: the filter pipeline performs
/// pure in-memory computation on inputs that the legacy bridge has already
/// validated. The variants below cover the only two failure classes that
/// remain: an invariant a caller violated (`InvalidInput`), and a
/// width/sign conversion that cannot be represented (`FailConvert`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A precondition or invariant was violated by the caller or by an
    /// overlay/storage implementation. Carries `(location, message)`.
    InvalidInput(String, String),
    /// A numeric conversion (e.g. `usize -> u32`) could not be performed.
    /// Carries `(location, message)`.
    FailConvert(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidInput(loc, msg) => write!(f, "{} invalid-input: {}", loc, msg),
            Error::FailConvert(loc, msg) => write!(f, "{} fail-convert: {}", loc, msg),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Build an [Error] tagged with the call-site, in the style:
///
/// ```ignore
/// err_at!(InvalidInput, msg: "row {} out of range", row)?;
/// err_at!(FailConvert, usize::try_from(n))?;
/// ```
///
/// The first form constructs an `Err` directly from a format string. The
/// second wraps a `Result<T, E>` whose `E: ToString`, converting it into
/// `Result<T, Error>` while preserving the original message.
#[macro_export]
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let loc = format!("{}:{}", file!(), line!());
        Err($crate::Error::$v(loc, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let loc = format!("{}:{}", file!(), line!());
                Err($crate::Error::$v(loc, err.to_string()))
            }
        }
    }};
}
