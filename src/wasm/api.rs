//! WASM API for the CHIP-8 disassembler.
//!
//! Provides JavaScript-callable program loading and disassembly, with each
//! instruction exposed both as fields and as a formatted listing line.

use crate::disassembler::formatter::{format_instruction, format_operands, HEADER};
use crate::{disassemble, DisassemblyOptions, ProgramBuffer};
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One decoded instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    opcode: u16,
    mnemonic: String,
    operands: String,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    #[wasm_bindgen(getter)]
    pub fn mnemonic(&self) -> String {
        self.mnemonic.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn operands(&self) -> String {
        self.operands.clone()
    }

    /// Full listing line, without the trailing newline
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Disassembler interface for JavaScript
#[wasm_bindgen]
pub struct Chip8Disassembler {
    buffer: ProgramBuffer,
}

impl Default for Chip8Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Chip8Disassembler {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Chip8Disassembler {
        Chip8Disassembler {
            buffer: ProgramBuffer::new(),
        }
    }

    /// Load a program image at 0x200, replacing any previous program
    pub fn load(&mut self, program: &[u8]) -> Result<(), JsError> {
        self.buffer
            .load(program)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Number of bytes currently loaded
    #[wasm_bindgen(getter)]
    pub fn loaded_len(&self) -> usize {
        self.buffer.loaded_len()
    }

    /// Decode the loaded program into an array of `DisassemblyLine`
    pub fn disassemble(&self) -> Array {
        disassemble(&self.buffer)
            .iter()
            .map(|instr| {
                let line = DisassemblyLine {
                    address: instr.address,
                    opcode: instr.opcode,
                    mnemonic: instr.mnemonic().to_string(),
                    operands: format_operands(instr),
                    text: format_instruction(instr).trim_end().to_string(),
                };
                JsValue::from(line)
            })
            .collect()
    }

    /// Full text listing, header included
    pub fn listing(&self) -> Result<String, JsError> {
        let mut out = Vec::new();
        crate::write_listing(&self.buffer, DisassemblyOptions::default(), &mut out)
            .map_err(|e| JsError::new(&e.to_string()))?;
        String::from_utf8(out).map_err(|e| JsError::new(&e.to_string()))
    }

    /// Column header printed above the listing
    pub fn header() -> String {
        HEADER.to_string()
    }
}
