//! # Opcode Dispatch
//!
//! CHIP-8 instructions are a single big-endian 16-bit word. The top nibble
//! selects one of 16 families. Twelve families map to exactly one
//! instruction; four need a second look:
//!
//! - `0nnn`: keyed on the full `nnn` (CLS, RET, otherwise SYS)
//! - `8xyd`: keyed on the low nibble (register arithmetic)
//! - `Exkk`: keyed on the low byte (keyboard skips)
//! - `Fxkk`: keyed on the low byte (timers, memory, BCD, fonts)
//!
//! Every 16-bit value decodes to some [`Opcode`]. Encodings the ISA does not
//! define land in an `Unknown` inner variant that keeps the bits needed to
//! print them.

/// The fields shared by every instruction encoding.
///
/// ```text
///  15   12 11    8 7     4 3     0
/// +-------+-------+-------+-------+
/// |   a   |   b   |   c   |   d   |
/// +-------+-------+-------+-------+
///         |      nnn              |
///                 |      kk       |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeFields {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    /// Low byte, `(c << 4) | d`.
    pub kk: u8,
    /// Low 12 bits, `(b << 8) | kk`.
    pub nnn: u16,
}

impl OpcodeFields {
    pub fn new(word: u16) -> Self {
        let a = ((word & 0xF000) >> 12) as u8;
        let b = ((word & 0x0F00) >> 8) as u8;
        let c = ((word & 0x00F0) >> 4) as u8;
        let d = (word & 0x000F) as u8;
        let kk = (c << 4) | d;
        let nnn = ((b as u16) << 8) | kk as u16;

        Self { a, b, c, d, kk, nnn }
    }
}

/// `0nnn` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysOp {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 0nnn, any other address
    Call(u16),
}

/// `8xyd` register arithmetic, selected by `d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Load,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
    /// Any `d` outside 0-7 and E.
    Unknown(u8),
}

impl AluOp {
    fn from_nibble(d: u8) -> Self {
        match d {
            0x0 => AluOp::Load,
            0x1 => AluOp::Or,
            0x2 => AluOp::And,
            0x3 => AluOp::Xor,
            0x4 => AluOp::Add,
            0x5 => AluOp::Sub,
            0x6 => AluOp::ShiftRight,
            0x7 => AluOp::SubReverse,
            0xE => AluOp::ShiftLeft,
            other => AluOp::Unknown(other),
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Load => "LD",
            AluOp::Or => "OR",
            AluOp::And => "AND",
            AluOp::Xor => "XOR",
            AluOp::Add => "ADD",
            AluOp::Sub => "SUB",
            AluOp::ShiftRight => "SHR",
            AluOp::SubReverse => "SUBN",
            AluOp::ShiftLeft => "SHL",
            AluOp::Unknown(_) => Opcode::UNKNOWN_MNEMONIC,
        }
    }
}

/// `Exkk` keyboard skips, selected by `kk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    /// Ex9E
    SkipPressed,
    /// ExA1
    SkipNotPressed,
    Unknown(u8),
}

impl KeyOp {
    fn from_byte(kk: u8) -> Self {
        match kk {
            0x9E => KeyOp::SkipPressed,
            0xA1 => KeyOp::SkipNotPressed,
            other => KeyOp::Unknown(other),
        }
    }
}

/// `Fxkk` timer, memory and font operations, selected by `kk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    /// Fx07: Vx = DT
    GetDelay,
    /// Fx0A: block until a key is pressed, store it in Vx
    WaitKey,
    /// Fx15: DT = Vx
    SetDelay,
    /// Fx18: ST = Vx
    SetSound,
    /// Fx1E: I += Vx
    AddIndex,
    /// Fx29: I = address of the font sprite for digit Vx
    SpriteAddr,
    /// Fx33: BCD of Vx at I, I+1, I+2
    StoreBcd,
    /// Fx55: store V0..=Vx at I
    StoreRegs,
    /// Fx65: load V0..=Vx from I
    LoadRegs,
    Unknown(u8),
}

impl MiscOp {
    fn from_byte(kk: u8) -> Self {
        match kk {
            0x07 => MiscOp::GetDelay,
            0x0A => MiscOp::WaitKey,
            0x15 => MiscOp::SetDelay,
            0x18 => MiscOp::SetSound,
            0x1E => MiscOp::AddIndex,
            0x29 => MiscOp::SpriteAddr,
            0x33 => MiscOp::StoreBcd,
            0x55 => MiscOp::StoreRegs,
            0x65 => MiscOp::LoadRegs,
            other => MiscOp::Unknown(other),
        }
    }
}

/// A fully classified CHIP-8 instruction.
///
/// Register operands are 4-bit indices (`x`, `y`), `kk` is an 8-bit
/// immediate, addresses are 12 bits.
///
/// # Examples
///
/// ```
/// use chip8_dasm::{AluOp, Opcode};
///
/// assert_eq!(Opcode::decode(0x1ABC), Opcode::Jump(0xABC));
/// assert_eq!(
///     Opcode::decode(0x8AB8),
///     Opcode::Alu { op: AluOp::Unknown(0x8), x: 0xA, y: 0xB }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Sys(SysOp),
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqByte { x: u8, kk: u8 },
    /// 4xkk
    SkipNeByte { x: u8, kk: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadByte { x: u8, kk: u8 },
    /// 7xkk
    AddByte { x: u8, kk: u8 },
    Alu { op: AluOp, x: u8, y: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    LoadIndex(u16),
    /// Bnnn: jump to nnn + V0
    JumpOffset(u16),
    /// Cxkk
    Random { x: u8, kk: u8 },
    /// Dxyn: draw an n-row sprite from I at (Vx, Vy)
    Draw { x: u8, y: u8, n: u8 },
    Key { op: KeyOp, x: u8 },
    Misc { op: MiscOp, x: u8 },
}

impl Opcode {
    /// Placeholder mnemonic for encodings the ISA leaves undefined.
    pub const UNKNOWN_MNEMONIC: &'static str = "???";

    /// Classifies a raw instruction word. Never fails.
    pub fn decode(word: u16) -> Self {
        let f = OpcodeFields::new(word);
        let (x, y) = (f.b, f.c);

        match f.a {
            0x0 => Opcode::Sys(match f.nnn {
                0x0E0 => SysOp::ClearScreen,
                0x0EE => SysOp::Return,
                addr => SysOp::Call(addr),
            }),
            0x1 => Opcode::Jump(f.nnn),
            0x2 => Opcode::Call(f.nnn),
            0x3 => Opcode::SkipEqByte { x, kk: f.kk },
            0x4 => Opcode::SkipNeByte { x, kk: f.kk },
            0x5 => Opcode::SkipEqReg { x, y },
            0x6 => Opcode::LoadByte { x, kk: f.kk },
            0x7 => Opcode::AddByte { x, kk: f.kk },
            0x8 => Opcode::Alu {
                op: AluOp::from_nibble(f.d),
                x,
                y,
            },
            0x9 => Opcode::SkipNeReg { x, y },
            0xA => Opcode::LoadIndex(f.nnn),
            0xB => Opcode::JumpOffset(f.nnn),
            0xC => Opcode::Random { x, kk: f.kk },
            0xD => Opcode::Draw { x, y, n: f.d },
            0xE => Opcode::Key {
                op: KeyOp::from_byte(f.kk),
                x,
            },
            // a is a nibble, so this is 0xF
            _ => Opcode::Misc {
                op: MiscOp::from_byte(f.kk),
                x,
            },
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Sys(SysOp::ClearScreen) => "CLS",
            Opcode::Sys(SysOp::Return) => "RET",
            Opcode::Sys(SysOp::Call(_)) => "SYS",
            Opcode::Jump(_) | Opcode::JumpOffset(_) => "JP",
            Opcode::Call(_) => "CALL",
            Opcode::SkipEqByte { .. } | Opcode::SkipEqReg { .. } => "SE",
            Opcode::SkipNeByte { .. } | Opcode::SkipNeReg { .. } => "SNE",
            Opcode::LoadByte { .. } | Opcode::LoadIndex(_) => "LD",
            Opcode::AddByte { .. } => "ADD",
            Opcode::Alu { op, .. } => op.mnemonic(),
            Opcode::Random { .. } => "RND",
            Opcode::Draw { .. } => "DRW",
            Opcode::Key { op, .. } => match op {
                KeyOp::SkipPressed => "SKP",
                KeyOp::SkipNotPressed => "SKNP",
                KeyOp::Unknown(_) => Self::UNKNOWN_MNEMONIC,
            },
            Opcode::Misc { op, .. } => match op {
                MiscOp::AddIndex => "ADD",
                MiscOp::Unknown(_) => Self::UNKNOWN_MNEMONIC,
                _ => "LD",
            },
        }
    }

    /// True for encodings rendered with the `???` placeholder.
    pub fn is_unknown(&self) -> bool {
        matches!(
            self,
            Opcode::Alu {
                op: AluOp::Unknown(_),
                ..
            } | Opcode::Key {
                op: KeyOp::Unknown(_),
                ..
            } | Opcode::Misc {
                op: MiscOp::Unknown(_),
                ..
            }
        )
    }
}
