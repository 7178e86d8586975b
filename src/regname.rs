//! The register name table: a bidirectional mapping between register numbers
//! and their conventional assembly names, used by the disassembler and the
//! register dump. A pure lookup, really just a convenience wrapper around a
//! `BiMap`.

use bimap::BiMap;

const NAMES: [&str; 32] = [
  "$0", "at", "v0", "v1", "a0", "a1", "a2", "a3",
  "t0", "t1", "t2", "t3", "t4", "t5", "t6", "t7",
  "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7",
  "t8", "t9", "k0", "k1", "gp", "sp", "fp", "ra",
];

lazy_static! {
  static ref REGISTER_NAMES: BiMap<u8, &'static str> = {
    let mut table = BiMap::new();
    for (number, name) in NAMES.iter().enumerate() {
      table.insert(number as u8, *name);
    }
    table
  };
}

/// The conventional name of a register number.
pub fn name(register: u8) -> &'static str {
  REGISTER_NAMES.get_by_left(&register).copied().unwrap_or("??")
}

/// The register number of a conventional name, if it is one.
pub fn number(name: &str) -> Option<u8> {
  REGISTER_NAMES.get_by_right(&name).copied()
}
