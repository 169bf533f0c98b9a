//! # Program Buffer
//!
//! The CHIP-8 address space is 4KB (0x000-0xFFF). Programs are loaded at
//! 0x200; everything below is reserved for the interpreter and stays zero.
//!
//! The buffer is a fixed boxed array plus an explicit loaded length, so the
//! end of the program is always known independently of the array size.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::LoadError;

/// Size of the whole addressable space.
pub const MEMORY_SIZE: usize = 0x1000;

/// Load origin and initial cursor position.
pub const PROGRAM_START: u16 = 0x200;

/// Number of bytes that fit between `PROGRAM_START` and the top of memory.
pub const LOAD_CAPACITY: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Read access to a CHIP-8 memory image.
///
/// The decoder only ever reads, so there is no write half. Reads never fail:
/// addresses outside the implementation's storage return 0.
///
/// # Examples
///
/// ```
/// use chip8_dasm::{MemoryBus, ProgramBuffer};
///
/// let mut buffer = ProgramBuffer::new();
/// buffer.load(&[0x12, 0x34]).unwrap();
///
/// assert_eq!(buffer.read(0x200), 0x12);
/// assert_eq!(buffer.read_word(0x200), 0x1234);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified address.
    fn read(&self, addr: u16) -> u8;

    /// Reads a big-endian 16-bit word: `addr` holds the high byte.
    fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }
}

/// Zero-filled 4KB memory image with a tracked program extent.
pub struct ProgramBuffer {
    data: Box<[u8; MEMORY_SIZE]>,
    loaded_len: usize,
}

impl ProgramBuffer {
    /// Creates an empty buffer with all bytes zero and nothing loaded.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
            loaded_len: 0,
        }
    }

    /// Copies `program` into memory starting at `PROGRAM_START`.
    ///
    /// Fails with a capacity error, leaving the buffer untouched, when the
    /// program is longer than `LOAD_CAPACITY`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chip8_dasm::{ErrorKind, ProgramBuffer, LOAD_CAPACITY};
    ///
    /// let mut buffer = ProgramBuffer::new();
    /// let err = buffer.load(&vec![0; LOAD_CAPACITY + 1]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::Capacity);
    /// assert_eq!(buffer.loaded_len(), 0);
    /// ```
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.load_from(program, None)
    }

    /// Reads a program image from disk and loads it.
    ///
    /// The file size is checked before reading; a file that cannot be opened
    /// or yields fewer bytes than its reported size is an I/O error.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let io_err = |source: io::Error| LoadError::Io {
            path: Some(path.to_path_buf()),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();
        if len > LOAD_CAPACITY as u64 {
            return Err(LoadError::Capacity {
                path: Some(path.to_path_buf()),
                len,
            });
        }

        let mut program = vec![0; len as usize];
        file.read_exact(&mut program).map_err(io_err)?;

        self.load_from(&program, Some(path))
    }

    fn load_from(&mut self, program: &[u8], path: Option<&Path>) -> Result<(), LoadError> {
        if program.len() > LOAD_CAPACITY {
            return Err(LoadError::Capacity {
                path: path.map(Path::to_path_buf),
                len: program.len() as u64,
            });
        }

        // Padding past an odd-length image must read as zero, not as the
        // previous program's bytes.
        let start = PROGRAM_START as usize;
        self.data[start..].fill(0);
        self.data[start..start + program.len()].copy_from_slice(program);
        self.loaded_len = program.len();

        debug!(len = program.len(), "loaded program");
        if program.len() % 2 != 0 {
            warn!(
                len = program.len(),
                "odd program length, last instruction is padded with a zero byte"
            );
        }

        Ok(())
    }

    /// Number of bytes loaded at `PROGRAM_START`.
    pub fn loaded_len(&self) -> usize {
        self.loaded_len
    }

    /// First address past the loaded program.
    pub fn end_address(&self) -> u16 {
        PROGRAM_START + self.loaded_len as u16
    }

    /// True iff `pc` lies at or beyond the end of the loaded program.
    pub fn is_end(&self, pc: u16) -> bool {
        pc >= self.end_address()
    }
}

impl Default for ProgramBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for ProgramBuffer {
    fn read(&self, addr: u16) -> u8 {
        self.data.get(addr as usize).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buffer = ProgramBuffer::new();

        assert_eq!(buffer.loaded_len(), 0);
        assert_eq!(buffer.read(0x000), 0x00);
        assert_eq!(buffer.read(0x200), 0x00);
        assert_eq!(buffer.read(0xFFF), 0x00);
        assert!(buffer.is_end(PROGRAM_START));
    }

    #[test]
    fn test_load_places_program_at_0x200() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0xA2, 0x2A, 0x60]).unwrap();

        assert_eq!(buffer.loaded_len(), 3);
        assert_eq!(buffer.read(0x1FF), 0x00);
        assert_eq!(buffer.read(0x200), 0xA2);
        assert_eq!(buffer.read(0x201), 0x2A);
        assert_eq!(buffer.read(0x202), 0x60);
        assert_eq!(buffer.read(0x203), 0x00);
        assert_eq!(buffer.end_address(), 0x203);
    }

    #[test]
    fn test_load_full_region() {
        let mut buffer = ProgramBuffer::new();
        let program = vec![0xFF; LOAD_CAPACITY];

        buffer.load(&program).unwrap();

        assert_eq!(buffer.loaded_len(), 0xE00);
        assert_eq!(buffer.read(0xFFF), 0xFF);
        assert_eq!(buffer.end_address(), 0x1000);
        assert!(!buffer.is_end(0xFFE));
        assert!(buffer.is_end(0x1000));
    }

    #[test]
    fn test_load_over_capacity_leaves_buffer_untouched() {
        let mut buffer = ProgramBuffer::new();
        let err = buffer.load(&vec![0x11; LOAD_CAPACITY + 1]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Capacity);
        assert_eq!(buffer.loaded_len(), 0);
        assert_eq!(buffer.read(0x200), 0x00);
    }

    #[test]
    fn test_reload_clears_previous_program() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0x12, 0x34, 0x56, 0x78]).unwrap();
        buffer.load(&[0xAB]).unwrap();

        assert_eq!(buffer.loaded_len(), 1);
        assert_eq!(buffer.read(0x200), 0xAB);
        assert_eq!(buffer.read(0x201), 0x00);
        assert_eq!(buffer.read(0x202), 0x00);
        assert_eq!(buffer.read(0x203), 0x00);
        assert_eq!(buffer.read_word(0x200), 0xAB00);
    }

    #[test]
    fn test_failed_reload_keeps_previous_program() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0x12, 0x34]).unwrap();

        assert!(buffer.load(&vec![0x11; LOAD_CAPACITY + 1]).is_err());

        assert_eq!(buffer.loaded_len(), 2);
        assert_eq!(buffer.read_word(0x200), 0x1234);
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&[0xD1, 0x2F]).unwrap();

        assert_eq!(buffer.read_word(0x200), 0xD12F);
    }

    #[test]
    fn test_read_past_top_of_memory_is_zero() {
        let mut buffer = ProgramBuffer::new();
        buffer.load(&vec![0xAB; LOAD_CAPACITY]).unwrap();

        assert_eq!(buffer.read(0x1000), 0x00);
        assert_eq!(buffer.read_word(0xFFF), 0xAB00);
    }
}
