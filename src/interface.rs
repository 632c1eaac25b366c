//! Hardware interface abstraction
//!
//! This module provides the [`BusInterface`] trait and the [`Interface`] struct
//! that bit-bangs the TM1640 two-wire protocol over two GPIO outputs.
//!
//! ## Hardware Requirements
//!
//! The TM1640 requires 2 GPIO output pins, both idling high:
//! - **CLK**: serial clock (SCLK)
//! - **DIN**: serial data
//!
//! The bus is not I2C: there is no device address and no acknowledge bit.
//!
//! ## Signalling
//!
//! Every pin change is followed by one call to the delay hook:
//!
//! ```text
//! start: CLK high, DIN high, DIN low           (DIN falls while CLK is high)
//! byte:  8x [CLK low, DIN = bit, CLK high]     (LSB first), then CLK low
//! end:   CLK low, DIN low, CLK high, DIN high  (DIN rises while CLK is high)
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use tm1640::{BusInterface, Interface, NoDelay};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = Interface::new(MockPin, MockPin, NoDelay);
//!
//! // Display control: on, brightest
//! let _ = interface.transfer(0x8F, &[]);
//!
//! // Address 0 followed by two digits
//! let _ = interface.transfer(0xC0, &[0x3F, 0x06]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the two-wire bus to the TM1640 controller
///
/// Abstracts the bit-level signalling so that [`Display`](crate::display::Display)
/// only deals in command bytes. Use the provided [`Interface`] unless the
/// board needs something unusual, such as inverted outputs.
pub trait BusInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Set the pause applied after every pin change, in nanoseconds
    fn set_transition_delay(&mut self, delay_ns: u32);

    /// Drive both lines to the idle (high) level
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn idle(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Emit a start condition: DIN falls while CLK is high
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn send_start(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Clock out one byte, least significant bit first
    ///
    /// Leaves CLK low.
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn send_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error>;

    /// Emit an end condition and return both lines to idle
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO write fails.
    fn send_end(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send one complete command: start, header, payload, end
    ///
    /// The payload is never split; it shares the header's start/end pair.
    ///
    /// # Errors
    ///
    /// Returns the first GPIO error. The transfer is abandoned at that point
    /// and no end condition is sent.
    fn transfer(&mut self, header: u8, payload: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send_start()?;
        self.send_byte(header)?;
        for &byte in payload {
            self.send_byte(byte)?;
        }
        self.send_end()
    }
}

/// Errors that can occur at the interface level
///
/// Records which line failed.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<PinErr> {
    /// Error on the clock line
    Clock(PinErr),
    /// Error on the data line
    Data(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Clock(e) => write!(f, "CLK pin error: {e:?}"),
            Self::Data(e) => write!(f, "DIN pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Delay hook that returns immediately
///
/// Pin writes through most HALs are already slower than the TM1640's 1MHz
/// clock limit, so no extra wait is needed by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Bit-banged hardware interface for the TM1640
///
/// Implements [`BusInterface`] for embedded-hal v1.0 GPIO and delay traits.
///
/// ## Type Parameters
///
/// * `CLK` - Clock pin implementing [`OutputPin`]
/// * `DIN` - Data pin implementing [`OutputPin`]
/// * `D` - Delay hook implementing [`DelayNs`], called after every pin change
pub struct Interface<CLK, DIN, D = NoDelay> {
    /// Serial clock
    clk: CLK,
    /// Serial data
    din: DIN,
    /// Called after every pin change
    delay: D,
    /// Pause passed to `delay`, in nanoseconds
    transition_delay_ns: u32,
}

impl<CLK, DIN, D, PinErr> Interface<CLK, DIN, D>
where
    CLK: OutputPin<Error = PinErr>,
    DIN: OutputPin<Error = PinErr>,
    D: DelayNs,
{
    /// Create a new Interface
    ///
    /// The pins are not touched until the first transfer;
    /// [`Display::new`](crate::Display::new) drives them to idle.
    pub fn new(clk: CLK, din: DIN, delay: D) -> Self {
        Self {
            clk,
            din,
            delay,
            transition_delay_ns: 0,
        }
    }

    /// Get the pause applied after every pin change, in nanoseconds
    pub fn transition_delay(&self) -> u32 {
        self.transition_delay_ns
    }

    /// Give back the pins and the delay hook
    pub fn release(self) -> (CLK, DIN, D) {
        (self.clk, self.din, self.delay)
    }

    fn pause(&mut self) {
        self.delay.delay_ns(self.transition_delay_ns);
    }

    fn set_clk(&mut self, state: PinState) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.clk.set_state(state).map_err(InterfaceError::Clock)?;
        self.pause();
        Ok(())
    }

    fn set_din(&mut self, state: PinState) -> InterfaceResult<(), InterfaceError<PinErr>> {
        self.din.set_state(state).map_err(InterfaceError::Data)?;
        self.pause();
        Ok(())
    }
}

impl<CLK, DIN, D, PinErr> BusInterface for Interface<CLK, DIN, D>
where
    CLK: OutputPin<Error = PinErr>,
    DIN: OutputPin<Error = PinErr>,
    D: DelayNs,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn set_transition_delay(&mut self, delay_ns: u32) {
        self.transition_delay_ns = delay_ns;
    }

    fn idle(&mut self) -> InterfaceResult<(), Self::Error> {
        self.set_clk(PinState::High)?;
        self.set_din(PinState::High)
    }

    fn send_start(&mut self) -> InterfaceResult<(), Self::Error> {
        self.set_clk(PinState::High)?;
        self.set_din(PinState::High)?;
        self.set_din(PinState::Low)
    }

    fn send_byte(&mut self, byte: u8) -> InterfaceResult<(), Self::Error> {
        for bit in 0..8 {
            self.set_clk(PinState::Low)?;
            self.set_din(PinState::from(byte & (1 << bit) != 0))?;
            self.set_clk(PinState::High)?;
        }
        self.set_clk(PinState::Low)
    }

    fn send_end(&mut self) -> InterfaceResult<(), Self::Error> {
        self.set_clk(PinState::Low)?;
        self.set_din(PinState::Low)?;
        self.set_clk(PinState::High)?;
        self.set_din(PinState::High)
    }
}
