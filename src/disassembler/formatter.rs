//! Formatting functions for disassembled instructions
//!
//! Column layout:
//!
//! ```text
//! ADDR     INSTR     NAME    ARGS
//! @200     0x6a3b    LD      VA 0x3b
//! ```

use crate::disassembler::Instruction;

/// Two-line column header printed before the listing.
pub const HEADER: &str = "ADDR     INSTR     NAME    ARGS\n====     =====     ====    ====\n";

/// Width of the NAME column, mnemonic included.
const NAME_WIDTH: usize = 8;

/// Format a single instruction as a newline-terminated listing line
///
/// # Examples
///
/// ```
/// use chip8_dasm::{format_instruction, Instruction, Opcode};
///
/// let instr = Instruction {
///     address: 0x200,
///     opcode: 0x1ABC,
///     op: Opcode::decode(0x1ABC),
/// };
/// assert_eq!(format_instruction(&instr), "@200     0x1abc    JP      @abc\n");
/// ```
pub fn format_instruction(instr: &Instruction) -> String {
    let operands = format_operands(instr);

    if operands.is_empty() {
        format!("@{:03x}     0x{:04x}    {}\n", instr.address, instr.opcode, instr.mnemonic())
    } else {
        format!(
            "@{:03x}     0x{:04x}    {:<width$}{}\n",
            instr.address,
            instr.opcode,
            instr.mnemonic(),
            operands,
            width = NAME_WIDTH
        )
    }
}

/// Space-separated operand list, empty for operand-less instructions
pub fn format_operands(instr: &Instruction) -> String {
    instr
        .operands()
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
