//! MAX7219 register map
//!
//! Every command is two bytes shifted MSB first: register address, then
//! value. In a chain each chip forwards the previous 16 bits to the next one,
//! so one frame of N commands reaches N chips.

/// Highest intensity (brightness) level
pub const MAX_INTENSITY: u8 = 0x0F;

/// Chip registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// No-op, used to pad frames addressed at a single chip
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    /// BCD decode per digit
    DecodeMode = 0x09,
    /// Brightness, 0-15
    Intensity = 0x0A,
    /// Number of scanned digits minus one
    ScanLimit = 0x0B,
    /// 0 = shutdown, 1 = normal operation
    Shutdown = 0x0C,
    /// 1 = all segments lit
    DisplayTest = 0x0F,
}

impl Register {
    /// Register address on the wire
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register for a plane index (0-7)
    pub const fn digit(plane: u8) -> Option<Self> {
        match plane {
            0 => Some(Self::Digit0),
            1 => Some(Self::Digit1),
            2 => Some(Self::Digit2),
            3 => Some(Self::Digit3),
            4 => Some(Self::Digit4),
            5 => Some(Self::Digit5),
            6 => Some(Self::Digit6),
            7 => Some(Self::Digit7),
            _ => None,
        }
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register.addr()
    }
}

/// Decode modes for BCD encoded input
///
/// The driver writes raw segment patterns, so it runs with `NoDecode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DecodeMode {
    NoDecode = 0x00,
    CodeBDigit0 = 0x01,
    CodeBDigits3_0 = 0x0F,
    CodeBDigits7_0 = 0xFF,
}

/// One 2-byte command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    /// Register address
    pub address: u8,
    /// Register value
    pub value: u8,
}

impl Command {
    /// Create a command for a register
    pub const fn new(register: Register, value: u8) -> Self {
        Self {
            address: register.addr(),
            value,
        }
    }

    /// Create a command from a raw address
    pub const fn raw(address: u8, value: u8) -> Self {
        Self { address, value }
    }

    /// The no-op command
    pub const NOOP: Self = Self::new(Register::NoOp, 0x00);

    /// Bytes as shifted onto the bus
    pub const fn to_bytes(self) -> [u8; 2] {
        [self.address, self.value]
    }
}

/// Power-up sequence, each entry broadcast to every module in order
///
/// Test mode off, raw segment data, dimmest, all 8 digits scanned, power on.
pub const INIT_SEQUENCE: [Command; 5] = [
    Command::new(Register::DisplayTest, 0x00),
    Command::new(Register::DecodeMode, DecodeMode::NoDecode as u8),
    Command::new(Register::Intensity, 0x00),
    Command::new(Register::ScanLimit, 0x07),
    Command::new(Register::Shutdown, 0x01),
];
