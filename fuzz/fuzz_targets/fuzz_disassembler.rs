//! Fuzz target for the disassembler.
//!
//! This target loads arbitrary byte sequences as program images and checks
//! the cursor and line-shape invariants of the decoder.

#![no_main]

use arbitrary::Arbitrary;
use chip8_dasm::{format_instruction, Disassembler, ErrorKind, ProgramBuffer, LOAD_CAPACITY};
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut buffer = ProgramBuffer::new();

    if let Err(err) = buffer.load(&input.bytes) {
        // Only oversize images are rejected
        assert!(input.bytes.len() > LOAD_CAPACITY);
        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(buffer.loaded_len(), 0);
        return;
    }

    let mut dasm = Disassembler::new(&buffer);
    let mut expected_address = 0x200u16;

    while let Some(instr) = dasm.decode_next() {
        // Each instruction sits two bytes after the previous one
        assert_eq!(instr.address, expected_address);

        let line = format_instruction(&instr);
        let prefix = format!("@{:03x}     0x{:04x}    ", instr.address, instr.opcode);
        assert!(line.starts_with(&prefix));
        assert!(line.ends_with('\n'));

        expected_address += 2;
    }

    // Odd images decode one trailing padded word
    assert_eq!(
        (expected_address - 0x200) as usize,
        (input.bytes.len() + 1) / 2 * 2
    );
});
