//! CHIP-8 Disassembler Module
//!
//! Walks a loaded [`ProgramBuffer`] two bytes at a time and turns each word
//! into an [`Instruction`] and a listing line.

pub mod decoder;
pub mod formatter;

use std::fmt;
use std::io::{self, Write};

use crate::memory::{ProgramBuffer, PROGRAM_START};
use crate::opcodes::{KeyOp, MiscOp, Opcode, SysOp};

/// A single decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Address of the high byte
    pub address: u16,

    /// Raw big-endian instruction word
    pub opcode: u16,

    /// Classified form of `opcode`
    pub op: Opcode,
}

impl Instruction {
    pub fn mnemonic(&self) -> &'static str {
        self.op.mnemonic()
    }

    /// Operands in listing order.
    pub fn operands(&self) -> Vec<Operand> {
        use Operand::*;

        match self.op {
            Opcode::Sys(SysOp::ClearScreen) | Opcode::Sys(SysOp::Return) => vec![],
            Opcode::Sys(SysOp::Call(addr)) | Opcode::Jump(addr) | Opcode::Call(addr) => {
                vec![Address(addr)]
            }
            Opcode::SkipEqByte { x, kk }
            | Opcode::SkipNeByte { x, kk }
            | Opcode::LoadByte { x, kk }
            | Opcode::AddByte { x, kk }
            | Opcode::Random { x, kk } => vec![Register(x), Byte(kk)],
            Opcode::SkipEqReg { x, y }
            | Opcode::SkipNeReg { x, y }
            | Opcode::Alu { x, y, .. } => vec![Register(x), Register(y)],
            Opcode::LoadIndex(addr) => vec![Index, Address(addr)],
            Opcode::JumpOffset(addr) => vec![Register(0), Address(addr)],
            Opcode::Draw { x, y, n } => vec![Register(x), Register(y), Nibble(n)],
            Opcode::Key { op, x } => match op {
                KeyOp::SkipPressed | KeyOp::SkipNotPressed => vec![Register(x)],
                KeyOp::Unknown(kk) => vec![Byte(kk)],
            },
            Opcode::Misc { op, x } => match op {
                MiscOp::GetDelay => vec![Register(x), DelayTimer],
                MiscOp::WaitKey => vec![Register(x), Key],
                MiscOp::SetDelay => vec![DelayTimer, Register(x)],
                MiscOp::SetSound => vec![SoundTimer, Register(x)],
                MiscOp::AddIndex => vec![Index, Register(x)],
                MiscOp::SpriteAddr => vec![Font, Register(x)],
                MiscOp::StoreBcd => vec![Bcd, Register(x)],
                MiscOp::StoreRegs => vec![IndexIndirect, Register(x)],
                MiscOp::LoadRegs => vec![Register(x), IndexIndirect],
                MiscOp::Unknown(kk) => vec![Byte(kk)],
            },
        }
    }
}

/// One operand of a listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// `V0`-`VF`
    Register(u8),
    /// 8-bit immediate, `0x3b`
    Byte(u8),
    /// 4-bit immediate, `0xf`
    Nibble(u8),
    /// 12-bit address, `@abc`
    Address(u16),
    /// `I`
    Index,
    /// `[I]`
    IndexIndirect,
    /// `DT`
    DelayTimer,
    /// `ST`
    SoundTimer,
    /// `K`
    Key,
    /// `F`
    Font,
    /// `B`
    Bcd,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(x) => write!(f, "V{:X}", x),
            Operand::Byte(kk) => write!(f, "0x{:02x}", kk),
            Operand::Nibble(n) => write!(f, "0x{:x}", n),
            Operand::Address(addr) => write!(f, "@{:03x}", addr),
            Operand::Index => f.write_str("I"),
            Operand::IndexIndirect => f.write_str("[I]"),
            Operand::DelayTimer => f.write_str("DT"),
            Operand::SoundTimer => f.write_str("ST"),
            Operand::Key => f.write_str("K"),
            Operand::Font => f.write_str("F"),
            Operand::Bcd => f.write_str("B"),
        }
    }
}

/// Options controlling listing output
#[derive(Debug, Clone, Copy)]
pub struct DisassemblyOptions {
    /// Whether to emit the two-line column header
    pub header: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self { header: true }
    }
}

/// Decode cursor over a loaded program.
///
/// Starts at `PROGRAM_START` and moves forward exactly two bytes per decoded
/// instruction, whatever the instruction turns out to be.
pub struct Disassembler<'a> {
    buffer: &'a ProgramBuffer,
    pc: u16,
}

impl<'a> Disassembler<'a> {
    pub fn new(buffer: &'a ProgramBuffer) -> Self {
        Self {
            buffer,
            pc: PROGRAM_START,
        }
    }

    /// Address of the next instruction to decode.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn is_end(&self) -> bool {
        self.buffer.is_end(self.pc)
    }

    /// Decodes the instruction at the cursor and advances by 2.
    ///
    /// Returns `None` without moving once the end of the program is reached.
    pub fn decode_next(&mut self) -> Option<Instruction> {
        if self.is_end() {
            return None;
        }

        let instr = decoder::decode_instruction(self.buffer, self.pc);
        self.pc += 2;
        Some(instr)
    }

    /// Decodes the next instruction as a newline-terminated listing line.
    pub fn next_line(&mut self) -> Option<String> {
        self.decode_next().map(|instr| formatter::format_instruction(&instr))
    }
}

impl Iterator for Disassembler<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        self.decode_next()
    }
}

/// Disassemble a whole loaded program
///
/// # Examples
///
/// ```
/// use chip8_dasm::{disassemble, ProgramBuffer};
///
/// let mut buffer = ProgramBuffer::new();
/// buffer.load(&[0x60, 0x05, 0x70, 0x01]).unwrap();
///
/// let instructions = disassemble(&buffer);
/// assert_eq!(instructions.len(), 2);
/// assert_eq!(instructions[1].address, 0x202);
/// assert_eq!(instructions[1].mnemonic(), "ADD");
/// ```
pub fn disassemble(buffer: &ProgramBuffer) -> Vec<Instruction> {
    Disassembler::new(buffer).collect()
}

/// Write the full listing of `buffer` to `out`
///
/// Emits the column header (unless disabled) followed by one line per
/// instruction.
pub fn write_listing<W: Write>(
    buffer: &ProgramBuffer,
    options: DisassemblyOptions,
    out: &mut W,
) -> io::Result<()> {
    if options.header {
        out.write_all(formatter::HEADER.as_bytes())?;
    }

    let mut dasm = Disassembler::new(buffer);
    while let Some(line) = dasm.next_line() {
        out.write_all(line.as_bytes())?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_empty() {
        let buffer = ProgramBuffer::new();
        let instructions = disassemble(&buffer);
        assert_eq!(instructions.len(), 0);
    }

    #[test]
    fn test_decode_next_stops_at_end() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0xD1, 0x2F]).unwrap();

        let mut dasm = Disassembler::new(&buffer);
        assert!(!dasm.is_end());
        assert_eq!(dasm.next_line().unwrap(), "@200     0xd12f    DRW     V1 V2 0xf\n");
        assert!(dasm.is_end());

        assert_eq!(dasm.decode_next(), None);
        assert_eq!(dasm.pc(), 0x202);
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(Operand::Register(0xA).to_string(), "VA");
        assert_eq!(Operand::Byte(0x05).to_string(), "0x05");
        assert_eq!(Operand::Nibble(0xF).to_string(), "0xf");
        assert_eq!(Operand::Address(0x02A).to_string(), "@02a");
        assert_eq!(Operand::IndexIndirect.to_string(), "[I]");
    }

    #[test]
    fn test_write_listing_without_header() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0x00, 0xEE]).unwrap();

        let mut out = Vec::new();
        write_listing(&buffer, DisassemblyOptions { header: false }, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "@200     0x00ee    RET\n");
    }
}
