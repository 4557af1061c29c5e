//! Structural event logging.
//!
//! With the `tracing` feature these forward to the `tracing` crate; without it they
//! expand to nothing and the arguments are never evaluated.

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!($($arg)*);
        }
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!($($arg)*);
        }
    };
}

pub(crate) use {debug, trace};
