//! The `Error` type shared by the Prism crates.
//!
//! Errors keep a causal chain and, when `RUST_BACKTRACE` is set, the backtrace of the place
//! they were constructed at. Outside of Prism it is best treated as an opaque
//! [`std::error::Error`].

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

#[cfg(feature = "backtrace")]
pub use backtrace::Backtrace;
use std::{
    borrow::Cow,
    env, error, fmt, result,
    sync::atomic::{self, AtomicUsize},
};

/// `std::result::Result` specialized to the Prism error.
pub type Result<T> = result::Result<T, Error>;

struct Inner {
    source: Option<Box<Error>>,
    #[cfg(feature = "backtrace")]
    backtrace: Option<Backtrace>,
    error: Box<dyn error::Error + Send + Sync>,
}

/// The error type used by Prism.
pub struct Error {
    inner: Box<Inner>,
}

impl Error {
    /// Wraps anything implementing `std::error::Error`.
    pub fn new<E>(error: E) -> Self
    where
        E: 'static + error::Error + Send + Sync,
    {
        Self::from_boxed(Box::new(error))
    }

    /// Construct a new error from a message.
    pub fn from_string<M>(message: M) -> Self
    where
        M: Into<Cow<'static, str>>,
    {
        #[derive(Debug)]
        struct Message(Cow<'static, str>);

        impl fmt::Display for Message {
            fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt.write_str(&self.0)
            }
        }

        impl error::Error for Message {}

        Self::from_boxed(Box::new(Message(message.into())))
    }

    fn from_boxed(error: Box<dyn error::Error + Send + Sync>) -> Self {
        Self {
            inner: Box::new(Inner {
                source: None,
                #[cfg(feature = "backtrace")]
                backtrace: new_backtrace(),
                error,
            }),
        }
    }

    /// Replace the source of this error.
    pub fn with_source<S>(mut self, source: S) -> Self
    where
        S: Into<Error>,
    {
        self.inner.source = Some(Box::new(source.into()));
        self
    }

    /// The backtrace captured when this error was created, if backtraces are enabled.
    #[cfg(feature = "backtrace")]
    pub fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace.as_ref()
    }

    /// The error this one was raised in the context of.
    pub fn source(&self) -> Option<&Error> {
        self.inner.source.as_deref()
    }

    /// Iterate over this error and all of its sources.
    ///
    /// ```rust
    /// use prism_error::{Error, ResultExt};
    ///
    /// let res: Result<(), Error> = Err(Error::from_string("inner"));
    /// let e = res.with_context(|_| Error::from_string("outer")).unwrap_err();
    ///
    /// let messages = e.causes().map(|e| e.to_string()).collect::<Vec<_>>();
    /// assert_eq!(vec!["outer", "inner"], messages);
    /// ```
    pub fn causes(&self) -> Causes<'_> {
        Causes {
            current: Some(self),
        }
    }

    /// The wrapped error as a plain `std::error::Error`.
    ///
    /// Only the top error is returned, sources are not part of it.
    pub fn as_error(&self) -> &(dyn error::Error + Send + Sync + 'static) {
        &*self.inner.error
    }

    /// Attempt to view the wrapped error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: 'static + error::Error,
    {
        self.inner.error.downcast_ref::<E>()
    }
}

impl<T> From<T> for Error
where
    T: 'static + error::Error + Send + Sync,
{
    fn from(value: T) -> Error {
        Error::new(value)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner.error, fmt)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Error")
            .field("error", &self.inner.error)
            .field("source", &self.inner.source)
            .finish()
    }
}

/// Extension methods for results that can be turned into `Error`.
pub trait ResultExt<T>
where
    Self: Sized,
{
    /// Replace the error with the one returned by `chain`, keeping the original as its source.
    fn with_context<C, D>(self, chain: C) -> Result<T>
    where
        C: FnOnce(&Error) -> D,
        D: Into<Error>;
}

impl<T, E> ResultExt<T> for result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context<C, D>(self, chain: C) -> Result<T>
    where
        C: FnOnce(&Error) -> D,
        D: Into<Error>,
    {
        self.map_err(|e| {
            let e = e.into();
            chain(&e).into().with_source(e)
        })
    }
}

/// Iterator over an error and its sources, created by [`Error::causes`].
#[derive(Debug, Clone)]
pub struct Causes<'a> {
    current: Option<&'a Error>,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.source();
        Some(current)
    }
}

/// Constructs an `Error` with `format!` syntax.
///
/// ```rust
/// #[macro_use] extern crate prism_error;
///
/// fn main() {
///     let err = format_err!("uniform {} missing", "u_color");
///     assert_eq!("uniform u_color missing", err.to_string());
/// }
/// ```
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => { $crate::Error::from_string(format!($($arg)*)) }
}

// 0: unchecked, 1: disabled, 2: enabled
#[cfg(feature = "backtrace")]
static BACKTRACE_STATUS: AtomicUsize = AtomicUsize::new(0);

#[cfg(feature = "backtrace")]
fn new_backtrace() -> Option<Backtrace> {
    let enabled = match BACKTRACE_STATUS.load(atomic::Ordering::Relaxed) {
        0 => {
            let enabled = matches!(env::var_os("RUST_BACKTRACE"), Some(ref val) if val != "0");
            BACKTRACE_STATUS.store(enabled as usize + 1, atomic::Ordering::Relaxed);
            enabled
        }
        1 => false,
        _ => true,
    };

    if enabled {
        Some(Backtrace::new())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ResultExt};
    use std::{error, fmt, io};

    #[derive(Debug, PartialEq)]
    struct Missing(&'static str);

    impl fmt::Display for Missing {
        fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(fmt, "missing {}", self.0)
        }
    }

    impl error::Error for Missing {}

    #[test]
    fn displays_message() {
        assert_eq!("foo", Error::from_string("foo").to_string());
        assert_eq!("missing bar", Error::new(Missing("bar")).to_string());
    }

    #[test]
    fn downcasts_to_wrapped_error() {
        let e: Error = Missing("uniform").into();
        assert_eq!(Some(&Missing("uniform")), e.downcast_ref::<Missing>());
        assert!(e.downcast_ref::<io::Error>().is_none());
    }

    #[test]
    fn context_keeps_source() {
        let res: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "wrapped"));
        let e = res
            .with_context(|_| Error::from_string("top"))
            .expect_err("no error");

        assert_eq!("top", e.to_string());
        assert_eq!("wrapped", e.source().expect("no source").to_string());
        assert_eq!(2, e.causes().count());
    }

    #[test]
    fn format_err_macro() {
        let e = format_err!("{} + {}", 1, 2);
        assert_eq!("1 + 2", e.to_string());
        assert!(e.source().is_none());
    }
}
