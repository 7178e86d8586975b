/*!
  The binary object file (BOF) reader. A BOF carries a fixed-layout header —
  a four byte magic followed by five little-endian words — and then the text
  section's instruction words and the data section's data words, back to back.

  The machine core does not parse files: it consumes a `BofHeader` record and
  a sequential word stream through the `WordSource` seam, which this module's
  `BofFile` implements for real files and tests implement over in-memory word
  lists.
*/

use std::fs;
use std::path::Path;

use log::debug;
use nom::IResult;
use nom::bytes::complete::tag;
use nom::number::complete::le_i32;
use nom::sequence::tuple;

use crate::bytecode::{Word, BYTES_PER_WORD};
use crate::errors::MachineError;

pub const MAGIC: &[u8; 4] = b"BOF\0";

/// The header record. All fields are byte offsets or byte lengths, word
/// aligned. Read-only to the core after load.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BofHeader {
  pub text_start_address :  Word,
  pub text_length        :  Word,
  pub data_start_address :  Word,
  pub data_length        :  Word,
  pub stack_bottom_addr  :  Word,
}

/// A sequential reader of section words. The seam between the loader and
/// whatever holds the program.
pub trait WordSource {
  fn read_word(&mut self) -> Result<Word, MachineError>;
}

#[derive(Debug)]
pub struct BofFile {
  header  :  BofHeader,
  /// Section bytes following the header, in file order: text, then data.
  bytes   :  Vec<u8>,
  cursor  :  usize,
}

fn parse_header(input: &[u8]) -> IResult<&[u8], BofHeader> {
  let (input, _) = tag(&MAGIC[..])(input)?;
  let (input, (text_start_address, text_length, data_start_address, data_length, stack_bottom_addr)) =
    tuple((le_i32, le_i32, le_i32, le_i32, le_i32))(input)?;
  Ok((
    input,
    BofHeader {
      text_start_address,
      text_length,
      data_start_address,
      data_length,
      stack_bottom_addr,
    },
  ))
}

impl BofFile {

  pub fn open(path: &Path) -> Result<BofFile, MachineError> {
    let bytes = fs::read(path).map_err(|source| MachineError::BofOpen {
      path: path.display().to_string(),
      source,
    })?;

    match parse_header(&bytes) {

      Ok((sections, header)) => {
        debug!(
          "read BOF header from {}: text {}+{}, data {}+{}, stack bottom {}",
          path.display(),
          header.text_start_address, header.text_length,
          header.data_start_address, header.data_length,
          header.stack_bottom_addr
        );
        Ok(BofFile {
          header,
          bytes: sections.to_vec(),
          cursor: 0,
        })
      }

      Err(_) if !bytes.starts_with(&MAGIC[..]) => {
        Err(MachineError::BofBadMagic { path: path.display().to_string() })
      }

      Err(_) => {
        Err(MachineError::BofBadHeader { path: path.display().to_string() })
      }

    }
  }

  pub fn header(&self) -> &BofHeader {
    &self.header
  }

}

impl WordSource for BofFile {
  fn read_word(&mut self) -> Result<Word, MachineError> {
    let end = self.cursor + BYTES_PER_WORD as usize;
    if end > self.bytes.len() {
      return Err(MachineError::BofTruncated);
    }
    let mut word = [0u8; BYTES_PER_WORD as usize];
    word.copy_from_slice(&self.bytes[self.cursor..end]);
    self.cursor = end;
    Ok(Word::from_le_bytes(word))
  }
}

/// A `WordSource` over an in-memory word list, for building programs by hand
/// in tests.
#[cfg(test)]
pub struct WordList {
  words  :  Vec<Word>,
  cursor :  usize,
}

#[cfg(test)]
impl WordList {
  pub fn new(words: Vec<Word>) -> WordList {
    WordList { words, cursor: 0 }
  }
}

#[cfg(test)]
impl WordSource for WordList {
  fn read_word(&mut self) -> Result<Word, MachineError> {
    match self.words.get(self.cursor) {
      Some(word) => {
        self.cursor += 1;
        Ok(*word)
      }
      None => Err(MachineError::BofTruncated),
    }
  }
}
