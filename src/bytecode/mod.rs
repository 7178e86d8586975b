/*!

  The machine uses a 32 bit little-endian word size, and every instruction is
  exactly one word. The top six bits of a word select its format, and the
  format determines the field layout of the rest:

    Register format:  [op:6 = 0][rs:5][rt:5][rd:5][shift:5][func:6]
    Immediate format: [op:6][rs:5][rt:5][immed:16]
    Jump format:      [op:6][addr:26]
    Syscall format:   [op:6 = 0][code:20][func:6 = 12]

  Classification is total: `op == 0` selects the register format unless the
  `func` field holds the syscall selector, `op == 2` or `3` selects the jump
  format, and every other `op` selects the immediate format. Which *operation*
  a word denotes is a separate question: the selector value in `func`, `op`,
  or `code` must name a defined operation, and a word whose selector does not
  is a decode error, never a silent no-op.

  One design decision that needed to be made is whether to carry the raw word
  around and re-extract fields on demand, or to decode once into a variant per
  format holding only its relevant fields. The latter wins: exhaustive matching
  over a sum type replaces the switch-with-default-bail pattern, and the
  executor never touches bit arithmetic.

*/

mod binary;
mod instruction;

pub use binary::{decode_instruction, encode_instruction, form_address, form_offset,
                 sign_extend, zero_extend, EncodedWord, Word, BYTES_PER_WORD};
pub use instruction::{FuncCode, ImmedOp, Instruction, JumpOp, SyscallCode};
