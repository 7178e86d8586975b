//! The invariant checker: machine-state well-formedness, verified after every
//! executed instruction. The checks run in a fixed order and the first
//! violation is reported as a fatal error naming the invariant and the
//! offending value. This is a correctness oracle, not a recoverable fault.

use crate::bytecode::{Word, BYTES_PER_WORD};
use crate::errors::MachineError;
use crate::memory::MEMORY_SIZE_IN_BYTES;
use crate::registers::{RegisterFile, FP, GP, SP};

pub fn check_invariants(registers: &RegisterFile) -> Result<(), MachineError> {
  let pc = registers.pc;
  let gp = registers.get(GP);
  let sp = registers.get(SP);
  let fp = registers.get(FP);

  if pc % BYTES_PER_WORD != 0 {
    return Err(MachineError::PcUnaligned(pc));
  }
  if gp % BYTES_PER_WORD != 0 {
    return Err(MachineError::GpUnaligned(gp));
  }
  if sp % BYTES_PER_WORD != 0 {
    return Err(MachineError::SpUnaligned(sp));
  }
  if fp % BYTES_PER_WORD != 0 {
    return Err(MachineError::FpUnaligned(fp));
  }
  if gp < 0 {
    return Err(MachineError::GpNegative(gp));
  }
  if gp >= sp {
    return Err(MachineError::GpNotBelowSp { gp, sp });
  }
  if sp > fp {
    return Err(MachineError::SpAboveFp { sp, fp });
  }
  if fp >= MEMORY_SIZE_IN_BYTES as Word {
    return Err(MachineError::FpOutOfRange(fp));
  }
  if pc < 0 {
    return Err(MachineError::PcNegative(pc));
  }
  if pc >= MEMORY_SIZE_IN_BYTES as Word {
    return Err(MachineError::PcOutOfRange(pc));
  }
  if registers.get(0) != 0 {
    return Err(MachineError::ZeroRegisterClobbered(registers.get(0)));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Registers shaped like a freshly loaded machine.
  fn well_formed() -> RegisterFile {
    let mut registers = RegisterFile::new();
    registers.set(GP, 512);
    registers.set(SP, 1024);
    registers.set(FP, 1024);
    registers
  }

  #[test]
  fn a_well_formed_state_passes() {
    assert!(check_invariants(&well_formed()).is_ok());
  }

  #[test]
  fn stack_pointer_above_frame_pointer_names_that_invariant() {
    let mut registers = well_formed();
    registers.set(SP, 1028);
    match check_invariants(&registers) {
      Err(MachineError::SpAboveFp { sp: 1028, fp: 1024 }) => {}
      other => panic!("expected the SP <= FP invariant, got {:?}", other),
    }
  }

  #[test]
  fn unaligned_pointers_are_trapped() {
    let mut registers = well_formed();
    registers.pc = 2;
    assert!(matches!(check_invariants(&registers), Err(MachineError::PcUnaligned(2))));

    let mut registers = well_formed();
    registers.set(GP, 514);
    assert!(matches!(check_invariants(&registers), Err(MachineError::GpUnaligned(514))));

    let mut registers = well_formed();
    registers.set(FP, 1026);
    assert!(matches!(check_invariants(&registers), Err(MachineError::FpUnaligned(1026))));
  }

  #[test]
  fn pointer_ordering_is_trapped() {
    let mut registers = well_formed();
    registers.set(GP, 1024);
    assert!(matches!(
      check_invariants(&registers),
      Err(MachineError::GpNotBelowSp { gp: 1024, sp: 1024 })
    ));
  }

  #[test]
  fn bounds_are_trapped() {
    let mut registers = well_formed();
    registers.set(FP, MEMORY_SIZE_IN_BYTES as Word);
    registers.set(SP, MEMORY_SIZE_IN_BYTES as Word);
    assert!(matches!(check_invariants(&registers), Err(MachineError::FpOutOfRange(_))));

    let mut registers = well_formed();
    registers.pc = -4;
    assert!(matches!(check_invariants(&registers), Err(MachineError::PcNegative(-4))));

    let mut registers = well_formed();
    registers.pc = MEMORY_SIZE_IN_BYTES as Word;
    assert!(matches!(check_invariants(&registers), Err(MachineError::PcOutOfRange(_))));
  }

  #[test]
  fn a_clobbered_zero_register_is_trapped() {
    let mut registers = well_formed();
    registers.set(0, 7);
    assert!(matches!(
      check_invariants(&registers),
      Err(MachineError::ZeroRegisterClobbered(7))
    ));
  }
}
