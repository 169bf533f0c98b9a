//! Instruction decoder for the CHIP-8 disassembler

use tracing::trace;

use crate::disassembler::Instruction;
use crate::memory::MemoryBus;
use crate::opcodes::Opcode;

/// Decode the instruction word at `address`
///
/// Reads exactly two bytes, high byte first. Every word decodes; undefined
/// encodings come back as an `Unknown` inner variant of [`Opcode`].
pub fn decode_instruction<M: MemoryBus + ?Sized>(bus: &M, address: u16) -> Instruction {
    let opcode = bus.read_word(address);
    let op = Opcode::decode(opcode);

    trace!(address, opcode, unknown = op.is_unknown(), "decoded");

    Instruction {
        address,
        opcode,
        op,
    }
}
