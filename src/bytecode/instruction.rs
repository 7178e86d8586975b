use std::fmt::{Display, Formatter};

use strum_macros::Display as StrumDisplay;
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::regname;

/**
  Function selectors of the register format. The numeric values are fixed by
  the binary format and double as the `func` field of the encoded word, so
  this enum is also the decode table: recovering a variant from the field is a
  `TryFrom` on the primitive, and an unmatched value is the "unrecognized
  function code" error. The syscall selector (12) is deliberately absent; the
  decoder diverts it to the syscall format before this table is consulted.
*/
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
#[strum(serialize_all = "shouty_snake_case")]
pub enum FuncCode {
  Sll  =  0,
  Srl  =  2,
  Jr   =  8,
  Mfhi = 16,
  Mflo = 18,
  Mul  = 25,
  Div  = 27,
  Add  = 33,
  Sub  = 35,
  And  = 36,
  Bor  = 37,
  Xor  = 38,
  Nor  = 39,
}

/// Operation selectors of the immediate format, in the `op` field of the word.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
#[strum(serialize_all = "shouty_snake_case")]
pub enum ImmedOp {
  Bgez =  1,
  Beq  =  4,
  Bne  =  5,
  Blez =  6,
  Bgtz =  7,
  Bltz =  8,
  Addi =  9,
  Andi = 12,
  Bori = 13,
  Xori = 14,
  Lw   = 35,
  Lbu  = 36,
  Sb   = 40,
  Sw   = 43,
}

/// Operation selectors of the jump format: plain jump and jump-and-link.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u8)]
#[strum(serialize_all = "shouty_snake_case")]
pub enum JumpOp {
  Jmp = 2,
  Jal = 3,
}

/// System operation selectors, in the 20 bit `code` field of a syscall word.
/// Serialized forms are the assembly mnemonics rather than the variant names.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,             Eq, PartialEq, Debug, Hash
)]
#[repr(u32)]
pub enum SyscallCode {
  #[strum(serialize = "PSTR")] PrintStr     =   4,
  #[strum(serialize = "EXIT")] Exit         =  10,
  #[strum(serialize = "PCH")]  PrintChar    =  11,
  #[strum(serialize = "RCH")]  ReadChar     =  12,
  #[strum(serialize = "STRA")] StartTracing = 256,
  #[strum(serialize = "NOTR")] StopTracing  = 257,
}

/// Holds the decoded fields of an instruction word, one variant per format.
/// Immutable once decoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [op:6 = 0][rs:5][rt:5][rd:5][shift:5][func:6]
  Register {
    func  :  FuncCode,
    rs    :  u8,
    rt    :  u8,
    rd    :  u8,
    shift :  u8
  },
  /// [op:6][rs:5][rt:5][immed:16]
  Immediate {
    op    :  ImmedOp,
    rs    :  u8,
    rt    :  u8,
    immed :  u16
  },
  /// [op:6][addr:26]
  Jump {
    op   :  JumpOp,
    addr :  u32
  },
  /// [op:6 = 0][code:20][func:6 = 12]
  Syscall {
    code :  SyscallCode
  },
}

impl FuncCode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl ImmedOp {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl JumpOp {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }
}

impl SyscallCode {
  pub fn code(&self) -> u32 {
    Into::<u32>::into(*self)
  }
}

/// The assembly form. Operand order follows the conventional mnemonic forms,
/// not the field order of the word: destination first, loads and stores as
/// `offset(base)`, branch displacements as the signed immediate.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::Register { func, rs, rt, rd, shift } => {
        match func {
          FuncCode::Sll | FuncCode::Srl => {
            write!(f, "{} {}, {}, {}", func, regname::name(*rd), regname::name(*rt), shift)
          }
          FuncCode::Mfhi | FuncCode::Mflo => {
            write!(f, "{} {}", func, regname::name(*rd))
          }
          FuncCode::Jr => {
            write!(f, "{} {}", func, regname::name(*rs))
          }
          FuncCode::Mul | FuncCode::Div => {
            write!(f, "{} {}, {}", func, regname::name(*rs), regname::name(*rt))
          }
          _ => {
            write!(f, "{} {}, {}, {}",
                   func, regname::name(*rd), regname::name(*rs), regname::name(*rt))
          }
        }
      }

      Instruction::Immediate { op, rs, rt, immed } => {
        match op {
          ImmedOp::Beq | ImmedOp::Bne => {
            write!(f, "{} {}, {}, {}", op, regname::name(*rs), regname::name(*rt), *immed as i16)
          }
          ImmedOp::Bgez | ImmedOp::Bgtz | ImmedOp::Blez | ImmedOp::Bltz => {
            write!(f, "{} {}, {}", op, regname::name(*rs), *immed as i16)
          }
          ImmedOp::Lw | ImmedOp::Lbu | ImmedOp::Sw | ImmedOp::Sb => {
            write!(f, "{} {}, {}({})", op, regname::name(*rt), *immed as i16, regname::name(*rs))
          }
          ImmedOp::Addi => {
            write!(f, "{} {}, {}, {}", op, regname::name(*rt), regname::name(*rs), *immed as i16)
          }
          // The logic immediates zero-extend, so the immediate prints unsigned.
          _ => {
            write!(f, "{} {}, {}, {}", op, regname::name(*rt), regname::name(*rs), immed)
          }
        }
      }

      Instruction::Jump { op, addr } => {
        write!(f, "{} {}", op, addr)
      }

      Instruction::Syscall { code } => {
        write!(f, "{}", code)
      }

    }
  }
}
