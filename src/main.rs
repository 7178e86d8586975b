#![allow(dead_code)]

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

mod bof;
mod bytecode;
mod display;
mod errors;
mod invariants;
mod machine;
mod memory;
mod regname;
mod registers;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::bof::BofFile;
use crate::errors::MachineError;
use crate::machine::Machine;

#[derive(Parser, Debug)]
#[command(name = "mvm")]
#[command(about = "A virtual machine for a MIPS-like instruction set loaded from binary object files")]
struct Args {
  /// Print the loaded program instead of executing it
  #[arg(short = 'p', long = "print")]
  print_only: bool,

  /// The binary object file to load
  bof_file: PathBuf,
}

fn main() {
  env_logger::init();
  let args = Args::parse();

  if let Err(error) = run(&args) {
    eprintln!("{}", error);
    process::exit(1);
  }
}

fn run(args: &Args) -> Result<(), MachineError> {
  let mut bof_file = BofFile::open(&args.bof_file)?;
  let header = bof_file.header().clone();
  let mut machine = Machine::load(header, &mut bof_file)?;

  match args.print_only {
    true  => machine.print_program(),
    false => machine.run(),
  }
}
