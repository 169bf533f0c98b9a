//! # CHIP-8 Disassembler
//!
//! Decodes CHIP-8 program images into a flat listing of textual instruction
//! records, one per 16-bit opcode.
//!
//! ## Quick Start
//!
//! ```rust
//! use chip8_dasm::{Disassembler, ProgramBuffer};
//!
//! let mut buffer = ProgramBuffer::new();
//! buffer.load(&[0x00, 0xE0, 0x1A, 0xBC]).unwrap();
//!
//! let mut dasm = Disassembler::new(&buffer);
//! assert_eq!(dasm.next_line().unwrap(), "@200     0x00e0    CLS\n");
//! assert_eq!(dasm.next_line().unwrap(), "@202     0x1abc    JP      @abc\n");
//! assert!(dasm.is_end());
//! ```
//!
//! ## Modules
//!
//! - `memory` - Program buffer and the `MemoryBus` read trait
//! - `opcodes` - Opcode field extraction and the two-level dispatch
//! - `disassembler` - Decoder cursor, formatter and listing writer
//! - `error` - Load-time errors

pub mod disassembler;
pub mod error;
pub mod memory;
pub mod opcodes;
pub mod wasm;

pub use disassembler::formatter::{format_instruction, HEADER};
pub use disassembler::{
    disassemble, write_listing, Disassembler, DisassemblyOptions, Instruction, Operand,
};
pub use error::{ErrorKind, LoadError};
pub use memory::{MemoryBus, ProgramBuffer, LOAD_CAPACITY, MEMORY_SIZE, PROGRAM_START};
pub use opcodes::{AluOp, KeyOp, MiscOp, Opcode, OpcodeFields, SysOp};
