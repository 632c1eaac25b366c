//! TM1640 command definitions
//!
//! The TM1640 understands three commands. Each is a single header byte whose
//! top two bits select the command, clocked out between a start and an end
//! condition:
//!
//! | Bits 7-6 | Command         | Payload                         |
//! |----------|-----------------|---------------------------------|
//! | `01`     | Data setting    | none                            |
//! | `11`     | Address setting | up to 16 segment bytes          |
//! | `10`     | Display control | none                            |
//!
//! A whole address command, header plus every segment byte, goes out inside
//! one start/end pair. Splitting it into several framed transfers resets the
//! controller's address pointer.
//!
//! ## Example
//!
//! ```
//! use tm1640::command;
//!
//! assert_eq!(command::address(3), 0b1100_0011);
//! assert_eq!(command::display_control(true, 4), 0b1000_1100);
//! ```

// Data setting

/// Data command base (0x40)
///
/// - Bit 3: 0 = normal mode, 1 = test mode (internal use)
/// - Bit 2: 0 = auto-increment address, 1 = fixed address
/// - Other low bits must be zero
pub const DATA: u8 = 0b0100_0000;

/// Fixed-address flag for [`DATA`]
pub const DATA_FIXED_ADDRESS: u8 = 0b0000_0100;

// Address setting

/// Address command base (0xC0)
///
/// Bits 3-0 carry the starting digit address (0-15). Segment bytes follow
/// the header inside the same transfer.
pub const ADDRESS: u8 = 0b1100_0000;

/// Mask for the digit address in [`ADDRESS`]
pub const ADDRESS_MASK: u8 = 0b0000_1111;

// Display control

/// Display control command base (0x80)
///
/// - Bit 3: display on
/// - Bits 2-0: pulse width, from 1/16 (0) to 14/16 (7):
///
/// | Code | Duty  |
/// |------|-------|
/// | 0    | 1/16  |
/// | 1    | 2/16  |
/// | 2    | 4/16  |
/// | 3    | 10/16 |
/// | 4    | 11/16 |
/// | 5    | 12/16 |
/// | 6    | 13/16 |
/// | 7    | 14/16 |
pub const DISPLAY_CONTROL: u8 = 0b1000_0000;

/// Display-on flag for [`DISPLAY_CONTROL`]
pub const DISPLAY_ON: u8 = 0b0000_1000;

/// Mask for the duty-cycle code in [`DISPLAY_CONTROL`]
pub const DUTY_MASK: u8 = 0b0000_0111;

/// Build a data command header
pub const fn data(fixed_address: bool) -> u8 {
    if fixed_address {
        DATA | DATA_FIXED_ADDRESS
    } else {
        DATA
    }
}

/// Build an address command header; only the low 4 bits of `address` are used
pub const fn address(address: u8) -> u8 {
    ADDRESS | (address & ADDRESS_MASK)
}

/// Build a display control header; only the low 3 bits of `duty` are used
pub const fn display_control(on: bool, duty: u8) -> u8 {
    let byte = DISPLAY_CONTROL | (duty & DUTY_MASK);
    if on { byte | DISPLAY_ON } else { byte }
}
