//! Instruction encoding.
use std::fmt;

/// The short flag bit, selecting the 16-bit variant. (0b0010_0000)
pub const SHORT_FLAG: u8 = 1 << 5;
/// The keep flag bit, leaving the operands on the stack. (0b0100_0000)
pub const KEEP_FLAG: u8 = 1 << 6;
/// The return flag bit, operating on the return stack. (0b1000_0000)
pub const RETURN_FLAG: u8 = 1 << 7;

/// The lower five bits select the operation, the upper three are mode flags.
const BASE_MASK: u8 = 0b0001_1111;

/// A single instruction byte.
///
/// The base operations are combined with the mode flags to select an
/// instruction variant, eg. `DEO | SHORT` is `DEO2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpCode(pub u8);

#[rustfmt::skip]
impl OpCode {
    pub const BRK: OpCode = OpCode(0x00);
    pub const NIP: OpCode = OpCode(0x03);
    pub const DEO: OpCode = OpCode(0x17);
    pub const ADD: OpCode = OpCode(0x18);
    pub const SUB: OpCode = OpCode(0x19);
    pub const MUL: OpCode = OpCode(0x1A);
    pub const DIV: OpCode = OpCode(0x1B);
    /// Pushes the next byte in memory.
    pub const LIT: OpCode = OpCode(0x80);

    pub const DEO2: OpCode = Self::DEO.short();
    pub const ADD2: OpCode = Self::ADD.short();
    pub const SUB2: OpCode = Self::SUB.short();
    pub const MUL2: OpCode = Self::MUL.short();
    pub const DIV2: OpCode = Self::DIV.short();
    /// Pushes the next short in memory, high byte first.
    pub const LIT2: OpCode = Self::LIT.short();
}

impl OpCode {
    /// Sets the short flag in the opcode.
    #[inline]
    pub const fn short(self) -> Self {
        OpCode(self.0 | SHORT_FLAG)
    }

    /// Sets the keep flag in the opcode.
    #[inline]
    pub const fn keep(self) -> Self {
        OpCode(self.0 | KEEP_FLAG)
    }

    /// Sets the return flag in the opcode.
    #[inline]
    pub const fn ret(self) -> Self {
        OpCode(self.0 | RETURN_FLAG)
    }

    #[inline]
    pub const fn is_short(self) -> bool {
        self.0 & SHORT_FLAG != 0
    }

    #[inline]
    pub const fn is_keep(self) -> bool {
        self.0 & KEEP_FLAG != 0
    }

    #[inline]
    pub const fn is_ret(self) -> bool {
        self.0 & RETURN_FLAG != 0
    }

    /// Operation with all mode flags cleared.
    #[inline]
    pub const fn base(self) -> Self {
        OpCode(self.0 & BASE_MASK)
    }

    #[inline]
    pub const fn byte(self) -> u8 {
        self.0
    }

    /// Lookup an opcode by its exact mnemonic, eg. `"DEO2"`.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        MNEMONICS
            .iter()
            .find(|(mnemonic, _)| *mnemonic == name)
            .map(|(_, op)| *op)
    }

    /// Number of immediate bytes that follow the opcode in an image.
    #[rustfmt::skip]
    pub const fn immediate_size(self) -> usize {
        match self {
            Self::LIT  => 1,
            Self::LIT2 => 2,
            _          => 0,
        }
    }

    /// Renders the opcode as a mnemonic with its mode suffixes, eg. `ADD2k`.
    ///
    /// Returns `None` when the operation is not in the table.
    pub fn mnemonic(self) -> Option<String> {
        if let Some(name) = exact_name(self) {
            return Some(name.to_owned());
        }

        // Instructions in the first column have no flag semantics,
        // the upper bits select entirely different operations.
        if self.base() == Self::BRK {
            return None;
        }

        let mut name = exact_name(self.base())?.to_owned();
        if self.is_short() {
            name.push('2');
        }
        if self.is_keep() {
            name.push('k');
        }
        if self.is_ret() {
            name.push('r');
        }
        Some(name)
    }
}

fn exact_name(op: OpCode) -> Option<&'static str> {
    MNEMONICS
        .iter()
        .find(|(_, other)| *other == op)
        .map(|(name, _)| *name)
}

impl From<OpCode> for u8 {
    #[inline]
    fn from(op: OpCode) -> Self {
        op.0
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "0x{:02x}", self.0),
        }
    }
}

/// Opcodes known to the toolchain, by mnemonic.
#[rustfmt::skip]
pub static MNEMONICS: &[(&str, OpCode)] = &[
    ("BRK",  OpCode::BRK),
    ("NIP",  OpCode::NIP),
    ("DEO",  OpCode::DEO),
    ("DEO2", OpCode::DEO2),
    ("ADD",  OpCode::ADD),
    ("ADD2", OpCode::ADD2),
    ("SUB",  OpCode::SUB),
    ("SUB2", OpCode::SUB2),
    ("MUL",  OpCode::MUL),
    ("MUL2", OpCode::MUL2),
    ("DIV",  OpCode::DIV),
    ("DIV2", OpCode::DIV2),
    ("LIT",  OpCode::LIT),
    ("LIT2", OpCode::LIT2),
];
