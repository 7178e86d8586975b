/*!
  Human readable presentation of machine state: the instruction listing for
  print-only mode, the per-step register snapshot emitted while tracing, and
  the data-section and stack dumps with zero runs elided. Pure presentation
  over the state the core exposes; nothing here mutates the machine.
*/

use prettytable::{format as TableFormat, Cell, Row, Table};

use crate::bytecode::{Word, BYTES_PER_WORD};
use crate::errors::MachineError;
use crate::machine::Machine;
use crate::regname;
use crate::registers::{FP, SP};

// Registers per row of the register dump, and dump cells per row.
const REGISTERS_PER_ROW: usize = 6;
const DUMP_CELLS_PER_ROW: usize = 5;

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// Lays dump entries out in fixed-width rows.
fn print_dump_table(entries: Vec<String>) {
  let mut table = Table::new();
  table.set_format(*TABLE_DISPLAY_FORMAT);
  for chunk in entries.chunks(DUMP_CELLS_PER_ROW) {
    table.add_row(Row::new(chunk.iter().map(|entry| Cell::new(entry)).collect()));
  }
  table.printstd();
}

impl Machine {

  /**
    The instruction listing of the text section followed by the data
    section, the output of print-only mode. Listing a program whose text
    section holds an undefined word reports the decode error instead.
  */
  pub fn print_program(&self) -> Result<(), MachineError> {
    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Instruction"]);

    let mut address = self.header.text_start_address;
    while address < self.header.text_start_address + self.header.text_length {
      let instruction = self.memory.read_instruction(address)?;
      table.add_row(row![r->format!("{}", address), format!("{}", instruction)]);
      address += BYTES_PER_WORD;
    }
    table.printstd();

    self.print_data_section()
  }

  /// The register snapshot emitted before each traced instruction: PC (with
  /// HI and LO when either is nonzero), every GPR by name, then the data
  /// section and the stack.
  pub fn print_registers(&self) -> Result<(), MachineError> {
    match self.registers.hi != 0 || self.registers.lo != 0 {
      true => {
        println!(
          "      PC: {}\t      HI: {}\t      LO: {}",
          self.registers.pc, self.registers.hi, self.registers.lo
        );
      }
      false => {
        println!("      PC: {}", self.registers.pc);
      }
    }

    let mut table = Table::new();
    table.set_format(*TABLE_DISPLAY_FORMAT);
    for row_start in (0..32usize).step_by(REGISTERS_PER_ROW) {
      let cells = (row_start..(row_start + REGISTERS_PER_ROW).min(32))
        .map(|register| {
          let register = register as u8;
          Cell::new(&format!(
            "GPR[{}]: {}",
            regname::name(register),
            self.registers.get(register)
          ))
        })
        .collect();
      table.add_row(Row::new(cells));
    }
    table.printstd();

    self.print_data_section()?;
    self.print_stack()
  }

  /// The data section, word by word. A run of zero words collapses into a
  /// single `addr: 0 ...` entry.
  pub fn print_data_section(&self) -> Result<(), MachineError> {
    let start = self.header.data_start_address;
    let words = self.header.data_length / BYTES_PER_WORD;

    let mut entries = Vec::new();
    let mut in_zero_run = false;
    for i in 0..words {
      let address = start + i * BYTES_PER_WORD;
      let value = self.memory.read_word(address)?;
      match value == 0 {
        true => {
          if !in_zero_run {
            in_zero_run = true;
            entries.push(format!("{}: 0 ...", address));
          }
        }
        false => {
          in_zero_run = false;
          entries.push(format!("{}: {}", address, value));
        }
      }
    }

    if entries.is_empty() {
      println!("    {}: 0 ...", start);
      return Ok(());
    }
    print_dump_table(entries);
    Ok(())
  }

  /// The stack between SP (inclusive) and FP (exclusive), word by word, with
  /// the same zero-run elision as the data section.
  pub fn print_stack(&self) -> Result<(), MachineError> {
    let sp = self.registers.get(SP);
    let fp = self.registers.get(FP);

    if sp == fp {
      // No stack in use.
      println!("    {}: 0 ...", sp);
      return Ok(());
    }

    let mut entries = Vec::new();
    let mut in_zero_run = false;
    let mut address = sp;
    while address < fp {
      let value = self.memory.read_word(address)?;
      match value == 0 {
        true => {
          if !in_zero_run {
            in_zero_run = true;
            entries.push(format!("{}: 0 ...", address));
          }
        }
        false => {
          in_zero_run = false;
          entries.push(format!("{}: {}", address, value));
        }
      }
      address += BYTES_PER_WORD;
    }

    print_dump_table(entries);
    Ok(())
  }

}
