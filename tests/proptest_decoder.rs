//! Property-based tests for the decoder.
//!
//! These tests use proptest to check that decoding is a pure function of the
//! two bytes at the cursor and that the cursor walks the program in fixed
//! two-byte steps, whatever the bytes are.

use chip8_dasm::{
    disassemble, format_instruction, Disassembler, Opcode, ProgramBuffer, LOAD_CAPACITY,
};
use proptest::prelude::*;

fn load(program: &[u8]) -> ProgramBuffer {
    let mut buffer = ProgramBuffer::new();
    buffer.load(program).unwrap();
    buffer
}

/// Arbitrary images that fit the loadable region
fn program() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=LOAD_CAPACITY)
}

// ========== Cursor Property Tests ==========

proptest! {
    /// Property: the cursor advances by exactly 2 per decoded instruction
    #[test]
    fn prop_cursor_advances_by_two(bytes in program()) {
        let buffer = load(&bytes);
        let mut dasm = Disassembler::new(&buffer);
        let mut count = 0usize;

        while let Some(instr) = dasm.decode_next() {
            prop_assert_eq!(instr.address, 0x200 + 2 * count as u16);
            prop_assert_eq!(dasm.pc(), instr.address + 2);
            count += 1;
        }

        prop_assert_eq!(count, (bytes.len() + 1) / 2);
        prop_assert!(dasm.is_end());
    }

    /// Property: is_end is false inside the loaded region and true past it
    #[test]
    fn prop_is_end_matches_loaded_region(len in 0usize..=LOAD_CAPACITY, pc in 0x200u16..0x1000) {
        let buffer = load(&vec![0u8; len]);

        prop_assert_eq!(buffer.is_end(pc), pc as usize >= 0x200 + len);
    }

    /// Property: an even image is exhausted after exactly len/2 lines
    #[test]
    fn prop_even_image_line_count(
        words in prop::collection::vec(any::<u16>(), 0..=LOAD_CAPACITY / 2),
    ) {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_be_bytes()).collect();
        let buffer = load(&bytes);
        let mut dasm = Disassembler::new(&buffer);

        for _ in 0..words.len() {
            prop_assert!(!dasm.is_end());
            prop_assert!(dasm.next_line().is_some());
        }
        prop_assert!(dasm.is_end());
    }
}

// ========== Decode Property Tests ==========

proptest! {
    /// Property: re-decoding the same word at the same address yields the same line
    #[test]
    fn prop_decode_is_pure(word in any::<u16>(), slot in 0u16..0x700) {
        let address = 0x200 + slot * 2;
        let mut bytes = vec![0u8; (slot as usize + 1) * 2];
        bytes[slot as usize * 2..].copy_from_slice(&word.to_be_bytes());

        let first = disassemble(&load(&bytes)).pop().unwrap();
        let second = disassemble(&load(&bytes)).pop().unwrap();

        prop_assert_eq!(first.address, address);
        prop_assert_eq!(first.opcode, word);
        prop_assert_eq!(format_instruction(&first), format_instruction(&second));
    }

    /// Property: every line keeps the address and raw opcode columns
    #[test]
    fn prop_line_shape(word in any::<u16>()) {
        let buffer = load(&word.to_be_bytes());
        let line = Disassembler::new(&buffer).next_line().unwrap();
        let prefix = format!("@200     0x{:04x}    ", word);

        prop_assert!(line.starts_with(&prefix));
        prop_assert!(line.ends_with('\n'));
        prop_assert!(line[prefix.len()..].starts_with(Opcode::decode(word).mnemonic()));
    }

    /// Property: only the 8, E and F families have undefined encodings
    #[test]
    fn prop_unknown_only_in_sub_dispatched_families(word in any::<u16>()) {
        if Opcode::decode(word).is_unknown() {
            prop_assert!(matches!(word >> 12, 0x8 | 0xE | 0xF));
        }
    }
}
