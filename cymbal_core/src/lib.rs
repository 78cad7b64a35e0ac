//! Core definitions of the Uxn target shared by the compiler and its tooling.
mod disasm;
mod opcodes;

pub use self::{
    disasm::Disassembler,
    opcodes::{OpCode, KEEP_FLAG, MNEMONICS, RETURN_FLAG, SHORT_FLAG},
};

pub mod prelude {
    pub use super::{check_image_size, Address, Disassembler, OpCode, RESET_VECTOR};
}

/// Address where the machine starts executing after the image is loaded.
///
/// The page below it is reserved for the zero-page and device memory, so
/// every address in a compiled image is relative to this base.
pub const RESET_VECTOR: Address = 0x100; // 256

/// Size of the addressable main memory.
pub const MEM_SIZE: usize = 0x10000; // 65536

/// Type for storing the 16-bit memory addresses.
pub type Address = u16;

/// Checks whether an image fits between the reset vector and the end of memory.
#[inline]
pub fn check_image_size(image: &[u8]) -> bool {
    image.len() <= MEM_SIZE - RESET_VECTOR as usize
}
