//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]), plus the non-fatal [`WriteStatus`] that
//! reports input too long for the display.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Pin acquisition and transfer errors
//! - [`InterfaceError`](crate::interface::InterfaceError) - Which bus line failed
//!
//! Unknown characters and out-of-range brightness levels are not errors: they
//! render blank and clamp respectively.
//!
//! ## Example
//!
//! ```
//! use tm1640::{Builder, BuilderError};
//!
//! let result = Builder::new().transition_delay_ns(5_000_000).build();
//! assert!(matches!(result, Err(BuilderError::TransitionDelayTooLong { .. })));
//! ```

use core::convert::Infallible;

use crate::segment7::DIGITS;

/// Longest inter-transition delay accepted by the [`Builder`](crate::Builder)
///
/// The TM1640 clocks at up to 1MHz; anything past a millisecond per edge is a
/// configuration mistake.
pub const MAX_TRANSITION_DELAY_NS: u32 = 1_000_000;

/// Errors that can occur when driving the display
///
/// Generic over the bus error type `E` so callers can match on the underlying
/// hardware error. `A` is the [`PinProvider`](crate::PinProvider) claim error;
/// it defaults to [`Infallible`] for a [`Display`](crate::Display) built over
/// pins the caller already owns.
#[derive(Debug, PartialEq)]
pub enum Error<E, A = Infallible> {
    /// A pin could not be claimed from the [`PinProvider`](crate::PinProvider)
    ///
    /// Fatal for the display instance; no retry is attempted.
    Acquisition {
        /// Identifier of the pin that failed
        pin: u8,
        /// Error reported by the provider
        source: A,
    },
    /// A pin state change failed mid-transfer
    ///
    /// The controller may be left mid-command. Call
    /// [`Display::reset`](crate::Display::reset) before trusting the display again.
    Interface(E),
}

impl<E> Error<E> {
    /// Recast a display error into one that can also carry a claim error
    pub fn widen<A>(self) -> Error<E, A> {
        match self {
            Self::Acquisition { source, .. } => match source {},
            Self::Interface(e) => Error::Interface(e),
        }
    }
}

impl<E: core::fmt::Debug, A: core::fmt::Debug> core::fmt::Display for Error<E, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Acquisition { pin, source } => {
                write!(f, "Failed to acquire pin {pin}: {source:?}")
            }
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<E: core::fmt::Debug, A: core::fmt::Debug> core::error::Error for Error<E, A> {}

/// Outcome of a segment write
///
/// The display has exactly [`DIGITS`] positions. Longer input is cut rather
/// than rejected; the write still happens and a warning is logged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteStatus {
    /// Everything fit on the display
    #[default]
    Complete,
    /// Input was longer than the display
    Truncated {
        /// Number of bytes or characters that were not written
        dropped: usize,
    },
}

impl WriteStatus {
    /// Returns true if part of the input was dropped
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }
}

impl core::fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Truncated { dropped } => {
                write!(f, "input exceeds {DIGITS} digits, dropped {dropped}")
            }
        }
    }
}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Transition delay above [`MAX_TRANSITION_DELAY_NS`]
    TransitionDelayTooLong {
        /// Requested delay in nanoseconds
        requested: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TransitionDelayTooLong { requested } => write!(
                f,
                "Transition delay {requested}ns exceeds maximum of {MAX_TRANSITION_DELAY_NS}ns"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
