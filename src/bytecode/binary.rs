/*!
  This module is responsible for the encoding and decoding of binary
  instruction words, and for the extension/address-forming arithmetic the
  executor shares with it.
*/
use std::convert::TryFrom;

use super::{FuncCode, ImmedOp, Instruction, JumpOp, SyscallCode};
use crate::errors::MachineError;

// If you change these you must also change `encode_instruction` and
// `decode_instruction`.
pub type Word        = i32;
pub type EncodedWord = u32;

pub const BYTES_PER_WORD: Word = 4;

// `func` value that diverts an op-zero word to the syscall format.
const SYSCALL_FUNC: u8 = 12;

/**
  Decodes a word into the fields of its format. Classification by `op` is
  total; an undefined selector in `func`, `op`, or `code` is an error, which
  the execution loop reports and treats as fatal.
*/
pub fn decode_instruction(word: EncodedWord) -> Result<Instruction, MachineError> {
  let op = (word >> 26) as u8;

  match op {

    0 => {
      // [op:6 = 0][rs:5][rt:5][rd:5][shift:5][func:6], or a syscall word.
      let func = (word & 0x3F) as u8;
      match func == SYSCALL_FUNC {

        true  => {
          let code = (word >> 6) & 0xF_FFFF;
          let code = SyscallCode::try_from(code)
            .map_err(|_| MachineError::UnknownSyscall { code })?;
          Ok(Instruction::Syscall { code })
        }

        false => {
          let func = FuncCode::try_from(func)
            .map_err(|_| MachineError::UnknownFunc { func })?;
          Ok(Instruction::Register {
            func,
            rs    : ((word >> 21) & 0x1F) as u8,
            rt    : ((word >> 16) & 0x1F) as u8,
            rd    : ((word >> 11) & 0x1F) as u8,
            shift : ((word >>  6) & 0x1F) as u8,
          })
        }

      }
    }

    2 | 3 => {
      // [op:6][addr:26]
      let op = JumpOp::try_from(op).map_err(|_| MachineError::UnknownOp { op })?;
      Ok(Instruction::Jump { op, addr: word & 0x03FF_FFFF })
    }

    _ => {
      // [op:6][rs:5][rt:5][immed:16]
      let op = ImmedOp::try_from(op).map_err(|_| MachineError::UnknownOp { op })?;
      Ok(Instruction::Immediate {
        op,
        rs    : ((word >> 21) & 0x1F) as u8,
        rt    : ((word >> 16) & 0x1F) as u8,
        immed : word as u16,
      })
    }

  }
}

/// Encodes the instruction into its word. The exact inverse of
/// `decode_instruction` on every representable instruction.
pub fn encode_instruction(instruction: &Instruction) -> EncodedWord {
  match *instruction {

    Instruction::Register { func, rs, rt, rd, shift } => {
      ((rs    as EncodedWord) << 21) |
      ((rt    as EncodedWord) << 16) |
      ((rd    as EncodedWord) << 11) |
      ((shift as EncodedWord) <<  6) |
       (func.code() as EncodedWord)
    }

    Instruction::Immediate { op, rs, rt, immed } => {
      ((op.code() as EncodedWord) << 26) |
      ((rs        as EncodedWord) << 21) |
      ((rt        as EncodedWord) << 16) |
       (immed     as EncodedWord)
    }

    Instruction::Jump { op, addr } => {
      ((op.code() as EncodedWord) << 26) | (addr & 0x03FF_FFFF)
    }

    Instruction::Syscall { code } => {
      (code.code() << 6) | (SYSCALL_FUNC as EncodedWord)
    }

  }
}

/// Sign extension of a 16 bit immediate to a word.
pub fn sign_extend(immed: u16) -> Word {
  immed as i16 as Word
}

/// Zero extension of a 16 bit immediate to a word.
pub fn zero_extend(immed: u16) -> Word {
  immed as Word
}

/// The byte offset denoted by an immediate: a signed word-count displacement
/// converted to bytes. Branches, loads, and stores all use this scaling.
pub fn form_offset(immed: u16) -> Word {
  sign_extend(immed) << 2
}

/// The absolute byte address formed by a jump: the upper four bits of the
/// current PC joined with the 26 bit target fragment, word aligned.
pub fn form_address(pc: Word, addr: u32) -> Word {
  ((pc as u32 & 0xF000_0000) | (addr << 2)) as Word
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decode_classifies_each_format() {
    // ADD t0, t1, t2  ==  [0][rs=9][rt=10][rd=8][0][33]
    let add = (9 << 21) | (10 << 16) | (8 << 11) | 33;
    assert_eq!(
      decode_instruction(add).unwrap(),
      Instruction::Register { func: FuncCode::Add, rs: 9, rt: 10, rd: 8, shift: 0 }
    );

    // ADDI at, $0, 5  ==  [9][rs=0][rt=1][5]
    let addi = (9 << 26) | (1 << 16) | 5;
    assert_eq!(
      decode_instruction(addi).unwrap(),
      Instruction::Immediate { op: ImmedOp::Addi, rs: 0, rt: 1, immed: 5 }
    );

    // JMP 16  ==  [2][16]
    let jump = (2 << 26) | 16;
    assert_eq!(
      decode_instruction(jump).unwrap(),
      Instruction::Jump { op: JumpOp::Jmp, addr: 16 }
    );

    // EXIT  ==  [0][code=10][func=12]
    let exit = (10 << 6) | 12;
    assert_eq!(
      decode_instruction(exit).unwrap(),
      Instruction::Syscall { code: SyscallCode::Exit }
    );
  }

  #[test]
  fn decoding_is_the_inverse_of_encoding() {
    let instructions = [
      Instruction::Register  { func: FuncCode::Nor, rs: 3, rt: 17, rd: 31, shift: 0 },
      Instruction::Register  { func: FuncCode::Srl, rs: 0, rt: 9, rd: 8, shift: 31 },
      Instruction::Immediate { op: ImmedOp::Sw, rs: 29, rt: 4, immed: 0xFFFC },
      Instruction::Jump      { op: JumpOp::Jal, addr: 0x03FF_FFFF },
      Instruction::Syscall   { code: SyscallCode::StopTracing },
    ];
    for instruction in instructions.iter() {
      assert_eq!(
        decode_instruction(encode_instruction(instruction)).unwrap(),
        *instruction
      );
    }
  }

  #[test]
  fn the_zero_word_is_a_defined_no_op() {
    // All-zero memory decodes as SLL $0, $0, 0.
    assert_eq!(
      decode_instruction(0).unwrap(),
      Instruction::Register { func: FuncCode::Sll, rs: 0, rt: 0, rd: 0, shift: 0 }
    );
  }

  #[test]
  fn undefined_selectors_are_decode_errors() {
    // func 13 names no operation (12 would divert to the syscall format).
    match decode_instruction(13) {
      Err(MachineError::UnknownFunc { func: 13 }) => {}
      other => panic!("expected an unknown func error, got {:?}", other),
    }

    // op 63 names no immediate operation.
    match decode_instruction(63 << 26) {
      Err(MachineError::UnknownOp { op: 63 }) => {}
      other => panic!("expected an unknown op error, got {:?}", other),
    }

    // Syscall code 9 names no system operation.
    match decode_instruction((9 << 6) | 12) {
      Err(MachineError::UnknownSyscall { code: 9 }) => {}
      other => panic!("expected an unknown syscall error, got {:?}", other),
    }
  }

  #[test]
  fn extension_and_address_arithmetic() {
    assert_eq!(sign_extend(0xFFFF), -1);
    assert_eq!(sign_extend(0x7FFF), 32767);
    assert_eq!(zero_extend(0xFFFF), 65535);
    assert_eq!(form_offset(2), 8);
    assert_eq!(form_offset(0xFFFF), -4);
    assert_eq!(form_address(0x1000_0004, 5), 0x1000_0014);
    assert_eq!(form_address(8, 16), 64);
  }
}
