//! Core display operations

use crate::command;
use crate::config::{AddressMode, Config};
use crate::error::{Error, WriteStatus};
use crate::interface::BusInterface;
use crate::segment7::{self, DIGITS, Frame};

type DisplayResult<I, T = ()> = core::result::Result<T, Error<<I as BusInterface>::Error>>;

/// Highest brightness level; 0 turns the display off
pub const MAX_BRIGHTNESS: u8 = 8;

/// Core display driver for TM1640
///
/// Owns the bus for its whole lifetime. Every method runs one or more complete
/// command transfers before returning, so the chip never sees a half-written
/// command unless a pin fails.
///
/// The driver keeps no copy of what is on screen; the chip's display RAM is
/// the only frame buffer.
pub struct Display<I>
where
    I: BusInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Last level sent; unknown until the first `set_brightness`
    brightness: Option<u8>,
}

impl<I> Display<I>
where
    I: BusInterface,
{
    /// Create a new Display instance
    ///
    /// Drives both lines to idle and sends the data command so the chip is in
    /// a known state. If the config carries an initial brightness, that is
    /// applied too.
    ///
    /// # Errors
    ///
    /// Returns `Error::Interface` if a pin write fails.
    pub fn new(mut interface: I, config: Config) -> DisplayResult<I, Self> {
        interface.set_transition_delay(config.transition_delay_ns);
        let mut display = Self {
            interface,
            config,
            brightness: None,
        };
        display.reset()?;
        log::debug!(
            "tm1640: initialised ({:?} addressing, {}ns transitions)",
            display.config.addressing,
            display.config.transition_delay_ns
        );
        if let Some(level) = display.config.initial_brightness {
            display.set_brightness(level)?;
        }
        Ok(display)
    }

    /// Return the lines to idle and resend the data command
    ///
    /// Recovers the chip after a transfer was interrupted by a pin error.
    pub fn reset(&mut self) -> DisplayResult<I> {
        self.interface.idle().map_err(Error::Interface)?;
        self.send_data_command()
    }

    /// Switch between auto-increment and fixed addressing
    pub fn set_addressing(&mut self, mode: AddressMode) -> DisplayResult<I> {
        self.config.addressing = mode;
        log::debug!("tm1640: addressing set to {mode:?}");
        self.send_data_command()
    }

    /// Get the last brightness level set, if any
    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    /// Set brightness from 0 (display off) to 8 (brightest)
    ///
    /// Levels outside 0-8 are clamped. Levels 1-8 select pulse widths from
    /// 1/16 up to 14/16.
    pub fn set_brightness(&mut self, level: i32) -> DisplayResult<I> {
        let level = level.clamp(0, i32::from(MAX_BRIGHTNESS)) as u8;
        self.brightness = Some(level);
        log::debug!("tm1640: brightness {level}");
        let header = command::display_control(level > 0, level.saturating_sub(1));
        self.send_command(header, &[])
    }

    /// Write raw segment bytes starting at `address` (0-15)
    ///
    /// Each byte drives one digit, bit 7 being the decimal point. Only the
    /// first 16 bytes are sent; the rest are dropped with a warning.
    pub fn write_bytes(&mut self, payload: &[u8], address: u8) -> DisplayResult<I, WriteStatus> {
        let (payload, status) = if payload.len() > DIGITS {
            let dropped = payload.len() - DIGITS;
            log::warn!(
                "tm1640: payload must be at most {DIGITS} bytes, received {}; dropping {dropped}",
                payload.len()
            );
            (&payload[..DIGITS], WriteStatus::Truncated { dropped })
        } else {
            (payload, WriteStatus::Complete)
        };
        self.send_command(command::address(address), payload)?;
        Ok(status)
    }

    /// Write text starting at `address` (0-15)
    ///
    /// Always sends a full 16-digit frame, so digits past the text are
    /// blanked. A `.` lights the decimal point of the preceding character.
    /// See [`segment7::encode_text`] for the exact rules.
    pub fn write_text(&mut self, text: &str, address: u8) -> DisplayResult<I, WriteStatus> {
        let (frame, status) = segment7::encode_text(text);
        if let WriteStatus::Truncated { dropped } = status {
            log::warn!("tm1640: text is longer than the display; dropping {dropped} characters");
        }
        self.write_frame(&frame, address)?;
        Ok(status)
    }

    /// Blank every digit
    pub fn clear(&mut self) -> DisplayResult<I> {
        log::debug!("tm1640: clear");
        self.write_frame(&[segment7::BLANK; DIGITS], 0)
    }

    /// Give back the interface
    ///
    /// Consumes the driver, so it cannot be released twice. The chip keeps
    /// showing whatever it was last sent.
    pub fn release(self) -> I {
        log::debug!("tm1640: released");
        self.interface
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn write_frame(&mut self, frame: &Frame, address: u8) -> DisplayResult<I> {
        self.send_command(command::address(address), frame)
    }

    fn send_data_command(&mut self) -> DisplayResult<I> {
        self.send_command(command::data(self.config.addressing.is_fixed()), &[])
    }

    /// Send a command to the display controller
    fn send_command(&mut self, header: u8, payload: &[u8]) -> DisplayResult<I> {
        log::trace!("tm1640: command {header:#010b} + {} bytes", payload.len());
        self.interface
            .transfer(header, payload)
            .map_err(Error::Interface)
    }
}

impl<I> core::fmt::Debug for Display<I>
where
    I: BusInterface,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Display")
            .field("config", &self.config)
            .field("brightness", &self.brightness)
            .finish_non_exhaustive()
    }
}
