//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_TRANSITION_DELAY_NS};

/// How the controller advances its address pointer between segment bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressMode {
    /// Each byte goes to the next digit
    #[default]
    AutoIncrement,
    /// Every byte goes to the addressed digit
    Fixed,
}

impl AddressMode {
    /// True for [`AddressMode::Fixed`]
    pub fn is_fixed(self) -> bool {
        self == Self::Fixed
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Pause after every pin change, in nanoseconds
    pub transition_delay_ns: u32,
    /// Address mode sent with the data command at start-up
    pub addressing: AddressMode,
    /// Brightness to set right after start-up; `None` leaves the chip alone
    pub initial_brightness: Option<i32>,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust
/// use tm1640::{AddressMode, Builder};
///
/// let config = match Builder::new()
///     .transition_delay_ns(1_000)
///     .addressing(AddressMode::AutoIncrement)
///     .initial_brightness(4)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.initial_brightness, Some(4));
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    transition_delay_ns: u32,
    addressing: AddressMode,
    initial_brightness: Option<i32>,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pause after every pin change
    ///
    /// Defaults to zero; most hosts toggle GPIO slower than the chip's limit.
    pub fn transition_delay_ns(mut self, delay_ns: u32) -> Self {
        self.transition_delay_ns = delay_ns;
        self
    }

    /// Set the address mode
    pub fn addressing(mut self, mode: AddressMode) -> Self {
        self.addressing = mode;
        self
    }

    /// Set a brightness (0-8) to apply at start-up
    pub fn initial_brightness(mut self, level: i32) -> Self {
        self.initial_brightness = Some(level);
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::TransitionDelayTooLong` if the delay exceeds
    /// [`MAX_TRANSITION_DELAY_NS`]
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.transition_delay_ns > MAX_TRANSITION_DELAY_NS {
            return Err(BuilderError::TransitionDelayTooLong {
                requested: self.transition_delay_ns,
            });
        }
        Ok(Config {
            transition_delay_ns: self.transition_delay_ns,
            addressing: self.addressing,
            initial_brightness: self.initial_brightness,
        })
    }
}
