//! Disassembler.
use std::fmt::{self, Write as FmtWrite};

use crate::{opcodes::OpCode, Address, RESET_VECTOR};

/// Renders a program image as a human readable listing.
///
/// Addresses are written as they will be in memory once the
/// image is loaded at the reset vector.
pub struct Disassembler<'a> {
    image: &'a [u8],
    cursor: usize,
}

impl<'a> Disassembler<'a> {
    pub fn new(image: &'a [u8]) -> Self {
        Self { image, cursor: 0 }
    }

    /// Indicates whether every instruction has been disassembled.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.cursor >= self.image.len()
    }

    /// Disassemble the whole image, one instruction per line.
    pub fn listing(&mut self) -> Result<String, fmt::Error> {
        let mut buf = String::new();
        self.cursor = 0;

        while !self.at_end() {
            self.disassemble(&mut buf)?;
        }

        Ok(buf)
    }

    /// Write the instruction at the cursor to the given writer,
    /// and advance past it and its immediate operand.
    ///
    /// Writes nothing once the end of the image is reached.
    pub fn disassemble<W: FmtWrite>(&mut self, w: &mut W) -> fmt::Result {
        if self.at_end() {
            return Ok(());
        }

        let address = self.address();
        let op = OpCode(self.image[self.cursor]);
        self.cursor += 1;

        let name = match op.mnemonic() {
            Some(name) => name,
            None => return writeln!(w, "{address:04x}: ?? 0x{:02x}", op.byte()),
        };

        let size = op.immediate_size();
        if size == 0 {
            return writeln!(w, "{address:04x}: {name}");
        }

        match self.image.get(self.cursor..self.cursor + size) {
            Some(operand) => {
                self.cursor += size;
                write!(w, "{address:04x}: {name} ")?;
                for byte in operand {
                    write!(w, "{byte:02x}")?;
                }
                writeln!(w)
            }
            None => {
                self.cursor = self.image.len();
                writeln!(w, "{address:04x}: {name} <truncated>")
            }
        }
    }

    fn address(&self) -> Address {
        RESET_VECTOR.wrapping_add(self.cursor as Address)
    }
}
