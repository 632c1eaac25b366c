//! TM1640 LED Display Driver
//!
//! A bit-banged driver for the TM1640 controller, which drives up to sixteen
//! 7-segment digits (each with a decimal point) over a two-wire clock/data bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Text rendering with case-insensitive glyph lookup and decimal points
//! - Raw segment writes
//! - 8 brightness levels plus off
//! - Scoped pin acquisition for hosts that claim GPIO lines by number
//!
//! Key scanning and chained displays are not supported.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::digital::OutputPin;
//! use tm1640::{Builder, Display, Interface, NoDelay};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let clk = MockPin;
//! # let din = MockPin;
//! let interface = Interface::new(clk, din, NoDelay);
//! let config = match Builder::new().initial_brightness(4).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = match Display::new(interface, config) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! let _ = display.write_text("3.14159", 0);
//! let _ = display.write_bytes(&[0x76, 0x79, 0x38, 0x38, 0x3F], 11);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// TM1640 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Pin acquisition by identifier
pub mod provider;
/// 7-segment glyph encoding
pub mod segment7;

#[cfg(test)]
mod mock;

pub use config::{AddressMode, Builder, Config, MAX_TRANSITION_DELAY_NS};
pub use display::{Display, MAX_BRIGHTNESS};
pub use error::{BuilderError, Error, WriteStatus};
pub use interface::{BusInterface, Interface, InterfaceError, NoDelay};
pub use provider::{PinProvider, ProvidedDisplay, Session, with_display};
pub use segment7::{DECIMAL_POINT, DIGITS, Frame};
