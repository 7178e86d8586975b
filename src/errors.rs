//! The error taxonomy of the machine. Every variant is fatal: the process
//! reports the diagnostic and terminates, because a machine whose invariants
//! are violated has no well-defined continuation state. The variants exist so
//! the checks are testable without exiting the test process.

use std::io;

use thiserror::Error;

use crate::bytecode::Word;

#[derive(Debug, Error)]
pub enum MachineError {

  // Decode errors
  #[error("unrecognized function code {func} in a register format word")]
  UnknownFunc { func: u8 },
  #[error("unrecognized opcode {op}")]
  UnknownOp { op: u8 },
  #[error("unrecognized system call code {code}")]
  UnknownSyscall { code: u32 },

  // Execution errors
  #[error("division by zero at address {pc}")]
  DivisionByZero { pc: Word },
  #[error("memory address {addr} is outside the address space")]
  AddressOutOfRange { addr: Word },

  // Invariant violations, in the order the checker runs them
  #[error("Invariant broken: PC % 4 == 0 (PC = {0})")]
  PcUnaligned(Word),
  #[error("Invariant broken: GPR[GP] % 4 == 0 (GP = {0})")]
  GpUnaligned(Word),
  #[error("Invariant broken: GPR[SP] % 4 == 0 (SP = {0})")]
  SpUnaligned(Word),
  #[error("Invariant broken: GPR[FP] % 4 == 0 (FP = {0})")]
  FpUnaligned(Word),
  #[error("Invariant broken: 0 <= GPR[GP] (GP = {0})")]
  GpNegative(Word),
  #[error("Invariant broken: GPR[GP] < GPR[SP] (GP = {gp}, SP = {sp})")]
  GpNotBelowSp { gp: Word, sp: Word },
  #[error("Invariant broken: GPR[SP] <= GPR[FP] (SP = {sp}, FP = {fp})")]
  SpAboveFp { sp: Word, fp: Word },
  #[error("Invariant broken: GPR[FP] < memory size (FP = {0})")]
  FpOutOfRange(Word),
  #[error("Invariant broken: 0 <= PC (PC = {0})")]
  PcNegative(Word),
  #[error("Invariant broken: PC < memory size (PC = {0})")]
  PcOutOfRange(Word),
  #[error("Invariant broken: GPR[0] == 0 (GPR[0] = {0})")]
  ZeroRegisterClobbered(Word),

  // Loader errors
  #[error("cannot open {path}: {source}")]
  BofOpen { path: String, source: io::Error },
  #[error("{path} is not a binary object file")]
  BofBadMagic { path: String },
  #[error("malformed binary object file header in {path}")]
  BofBadHeader { path: String },
  #[error("unexpected end of file while reading section words")]
  BofTruncated,

  // Host I/O failures surfaced by the print/read system calls
  #[error("system call I/O failed: {0}")]
  SyscallIo(#[from] io::Error),

}
