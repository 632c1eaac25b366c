//! Pin acquisition by identifier
//!
//! On hosts such as a Raspberry Pi, GPIO lines are claimed from the operating
//! system by number and must be handed back when done. [`PinProvider`] models
//! that, and [`Session`] ties the claim to a scope: both lines are released
//! when the session is dropped, whether the work inside it succeeded, failed
//! or unwound.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tm1640::{Config, NoDelay, PinProvider, with_display};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Gpio;
//! # impl PinProvider for Gpio {
//! #     type Pin = MockPin;
//! #     type Error = Infallible;
//! #     fn claim(&mut self, _id: u8) -> Result<MockPin, Infallible> { Ok(MockPin) }
//! #     fn release(&mut self, _id: u8) {}
//! # }
//! # let mut gpio = Gpio;
//! let result = with_display(&mut gpio, 20, 21, NoDelay, Config::default(), |display| {
//!     display.set_brightness(3)?;
//!     display.write_text("12.34", 0)
//! });
//! // GPIO 20 and 21 are free again here
//! let _ = result;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::config::Config;
use crate::display::Display;
use crate::error::Error;
use crate::interface::{Interface, InterfaceError};

/// Source of output pins addressed by number
pub trait PinProvider {
    /// Pin type handed out
    type Pin: OutputPin;

    /// Error returned when a line cannot be claimed
    type Error: core::fmt::Debug;

    /// Claim the line `id` as an output
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or is already in use.
    fn claim(&mut self, id: u8) -> Result<Self::Pin, Self::Error>;

    /// Hand line `id` back
    ///
    /// Called only after the pin handle for `id` has been dropped. Must do
    /// nothing if `id` is not currently claimed.
    fn release(&mut self, id: u8);
}

type BusError<P> = InterfaceError<<<P as PinProvider>::Pin as ErrorType>::Error>;

/// Display driven over pins from a [`PinProvider`]
pub type ProvidedDisplay<P, D> =
    Display<Interface<<P as PinProvider>::Pin, <P as PinProvider>::Pin, D>>;

type SessionResult<P, T> =
    core::result::Result<T, Error<BusError<P>, <P as PinProvider>::Error>>;

/// Lines held from a provider, handed back on drop
struct Claim<'a, P: PinProvider> {
    provider: &'a mut P,
    clk_id: u8,
    din_id: Option<u8>,
}

impl<P: PinProvider> Drop for Claim<'_, P> {
    fn drop(&mut self) {
        if let Some(din_id) = self.din_id {
            self.provider.release(din_id);
            log::debug!("tm1640: released DIN={din_id}");
        }
        self.provider.release(self.clk_id);
        log::debug!("tm1640: released CLK={}", self.clk_id);
    }
}

/// A display whose pins go back to the provider on drop
pub struct Session<'a, P, D>
where
    P: PinProvider,
    D: DelayNs,
{
    // Dropped before `claim`: pin handles go before their lines are released
    display: ProvidedDisplay<P, D>,
    claim: Claim<'a, P>,
}

impl<'a, P, D> Session<'a, P, D>
where
    P: PinProvider,
    D: DelayNs,
{
    /// Claim both pins and initialise the display
    ///
    /// # Errors
    ///
    /// Returns `Error::Acquisition` with the provider's error if either pin
    /// cannot be claimed, or `Error::Interface` if initialisation fails. Any
    /// pin already claimed is dropped and released before returning.
    pub fn open(
        provider: &'a mut P,
        clk_id: u8,
        din_id: u8,
        delay: D,
        config: Config,
    ) -> SessionResult<P, Self> {
        let clk = provider.claim(clk_id).map_err(|source| Error::Acquisition {
            pin: clk_id,
            source,
        })?;
        let mut claim = Claim {
            provider,
            clk_id,
            din_id: None,
        };
        let din = match claim.provider.claim(din_id) {
            Ok(pin) => pin,
            Err(source) => {
                drop(clk);
                return Err(Error::Acquisition {
                    pin: din_id,
                    source,
                });
            }
        };
        claim.din_id = Some(din_id);

        let display = Display::new(Interface::new(clk, din, delay), config)
            .map_err(Error::widen::<P::Error>)?;
        log::debug!("tm1640: claimed CLK={clk_id} DIN={din_id}");
        Ok(Self { display, claim })
    }

    /// Access the display
    pub fn display(&mut self) -> &mut ProvidedDisplay<P, D> {
        &mut self.display
    }

    /// Release both pins now
    pub fn close(self) {
        drop(self);
    }
}

/// Run `f` against a display on pins `clk_id` and `din_id`
///
/// The pins are claimed for the duration of the call and released on every
/// exit path.
///
/// # Errors
///
/// Returns acquisition and initialisation errors, or whatever `f` returns.
pub fn with_display<P, D, R, F>(
    provider: &mut P,
    clk_id: u8,
    din_id: u8,
    delay: D,
    config: Config,
    f: F,
) -> SessionResult<P, R>
where
    P: PinProvider,
    D: DelayNs,
    F: FnOnce(&mut ProvidedDisplay<P, D>) -> Result<R, Error<BusError<P>>>,
{
    let mut session = Session::open(provider, clk_id, din_id, delay, config)?;
    f(session.display()).map_err(Error::widen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::NoDelay;
    use crate::mock::{self, MockError, MockProvider};
    use crate::WriteStatus;
    use alloc::vec;
    use core::convert::Infallible;

    struct InfalliblePin;

    impl ErrorType for InfalliblePin {
        type Error = Infallible;
    }

    impl OutputPin for InfalliblePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    /// Lines 0 to 27 exist; claims for anything else fail
    struct Header;

    impl PinProvider for Header {
        type Pin = InfalliblePin;
        type Error = &'static str;

        fn claim(&mut self, id: u8) -> Result<InfalliblePin, &'static str> {
            if id < 28 {
                Ok(InfalliblePin)
            } else {
                Err("no such line")
            }
        }

        fn release(&mut self, _id: u8) {}
    }

    const CLK: u8 = 20;
    const DIN: u8 = 21;

    #[test]
    fn test_session_claims_and_releases() {
        let mut provider = MockProvider::new(CLK);
        let log = provider.log.clone();
        {
            let mut session =
                Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).unwrap();
            session.display().set_brightness(2).unwrap();
        }
        assert!(provider.claimed.is_empty());
        assert_eq!(provider.released, vec![DIN, CLK]);

        let events = log.take();
        assert_eq!(mock::decode(&events[2..]), vec![vec![0x40], vec![0x89]]);
    }

    #[test]
    fn test_explicit_close() {
        let mut provider = MockProvider::new(CLK);
        let session = Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).unwrap();
        session.close();
        assert_eq!(provider.released, vec![DIN, CLK]);
    }

    #[test]
    fn test_pins_dropped_before_lines_released() {
        let mut provider = MockProvider::new(CLK);
        let session = Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).unwrap();
        assert_eq!(provider_live(&session), 2);
        session.close();
        assert_eq!(provider.live_at_release, vec![0, 0]);
        assert_eq!(provider.live.get(), 0);
    }

    fn provider_live<D: DelayNs>(session: &Session<'_, MockProvider, D>) -> usize {
        session.claim.provider.live.get()
    }

    #[test]
    fn test_release_of_unclaimed_pin_is_a_no_op() {
        let mut provider = MockProvider::new(CLK);
        let session = Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).unwrap();
        session.close();
        let log = provider.log.clone();
        log.take();

        provider.release(CLK);
        provider.release(DIN);
        assert_eq!(provider.released, vec![DIN, CLK]);
        assert!(log.take().is_empty());
    }

    #[test]
    fn test_clock_claim_failure() {
        let mut provider = MockProvider::new(CLK);
        provider.unavailable = Some(CLK);
        let result = Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).map(drop);
        assert!(matches!(
            result,
            Err(Error::Acquisition {
                pin: CLK,
                source: MockError
            })
        ));
        assert!(provider.claimed.is_empty());
    }

    #[test]
    fn test_data_claim_failure_releases_clock() {
        let mut provider = MockProvider::new(CLK);
        provider.unavailable = Some(DIN);
        let result = Session::open(&mut provider, CLK, DIN, NoDelay, Config::default()).map(drop);
        assert!(matches!(
            result,
            Err(Error::Acquisition {
                pin: DIN,
                source: MockError
            })
        ));
        assert!(provider.claimed.is_empty());
        assert_eq!(provider.released, vec![CLK]);
        assert_eq!(provider.live_at_release, vec![0]);
        assert!(provider.log.take().is_empty());
    }

    #[test]
    fn test_claim_error_independent_of_pin_error() {
        let result = Session::open(&mut Header, 5, 40, NoDelay, Config::default()).map(drop);
        assert_eq!(
            result,
            Err(Error::Acquisition {
                pin: 40,
                source: "no such line"
            })
        );

        let status = with_display(&mut Header, 5, 6, NoDelay, Config::default(), |d| {
            d.write_text("8.8.", 0)
        });
        assert_eq!(status, Ok(WriteStatus::Complete));
    }

    #[test]
    fn test_with_display_drops_pins_before_release() {
        let mut provider = MockProvider::new(CLK);
        let log = provider.log.clone();
        let result = with_display(&mut provider, CLK, DIN, NoDelay, Config::default(), |d| {
            d.clear()
        });
        assert_eq!(result, Ok(()));
        assert_eq!(provider.live_at_release, vec![0, 0]);
        assert!(!log.take().is_empty());
    }

    #[test]
    fn test_same_pin_twice_fails() {
        let mut provider = MockProvider::new(CLK);
        let result = Session::open(&mut provider, CLK, CLK, NoDelay, Config::default()).map(drop);
        assert!(matches!(result, Err(Error::Acquisition { pin: CLK, .. })));
        assert!(provider.claimed.is_empty());
    }

    #[test]
    fn test_with_display_returns_closure_result() {
        let mut provider = MockProvider::new(CLK);
        let status = with_display(&mut provider, CLK, DIN, NoDelay, Config::default(), |d| {
            d.write_text("0123456789abcdefg", 0)
        })
        .unwrap();
        assert_eq!(status, WriteStatus::Truncated { dropped: 1 });
        assert!(provider.claimed.is_empty());
    }

    #[test]
    fn test_with_display_releases_on_error() {
        let mut provider = MockProvider::new(CLK);
        let result: Result<(), _> =
            with_display(&mut provider, CLK, DIN, NoDelay, Config::default(), |_| {
                Err(Error::Interface(InterfaceError::Data(MockError)))
            });
        assert!(result.is_err());
        assert!(provider.claimed.is_empty());
        assert_eq!(provider.released, vec![DIN, CLK]);
    }
}
