//! WebAssembly bindings for the CHIP-8 disassembler.
//!
//! This module provides JavaScript-callable interfaces for loading a program
//! image and reading back its disassembly in the browser.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Chip8Disassembler;
