use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use cafe::{ClassReader, ReadFlags};
use crate::print::Printer;

mod print;

#[derive(Debug, Parser)]
#[command(version, about = "Prints the contents of Java class files")]
struct Cli {
	/// Be verbose.
	#[arg(short = 'v', long = "verbose")]
	verbose: bool,

	/// Don't print the code of methods.
	#[arg(long = "skip-code")]
	skip_code: bool,

	/// Don't print source files, line numbers and local variables.
	#[arg(long = "skip-debug")]
	skip_debug: bool,

	/// Don't print inner classes.
	#[arg(long = "skip-inner-classes")]
	skip_inner_classes: bool,

	/// Raw read flags, combined with the other options. Unknown bits are ignored.
	#[arg(long = "flags", default_value_t = 0)]
	flags: u32,

	#[command(subcommand)]
	command: Command,
}

impl Cli {
	fn read_flags(&self) -> ReadFlags {
		let mut flags = ReadFlags::from_bits_truncate(self.flags);
		if self.skip_code {
			flags |= ReadFlags::SKIP_CODE;
		}
		if self.skip_debug {
			flags |= ReadFlags::SKIP_DEBUG;
		}
		if self.skip_inner_classes {
			flags |= ReadFlags::SKIP_INNER_CLASSES;
		}
		flags
	}
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Prints every part of the classes, in the order they are visited
	Dump {
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Prints only the version, access flags and super class of the classes
	Header {
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
}

fn setup_logger(verbose: bool) -> Result<()> {
	fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
		})
		.level(if verbose { LevelFilter::Trace } else { LevelFilter::Info })
		.chain(std::io::stderr())
		.apply()
		.context("failed to set up logging")
}

fn open(path: &Path) -> Result<ClassReader> {
	let file = File::open(path)
		.with_context(|| anyhow!("failed to open {path:?}"))?;
	ClassReader::from_reader(BufReader::new(file))
		.with_context(|| anyhow!("failed to read class file {path:?}"))
}

fn dump(path: &Path, flags: ReadFlags, out: &mut impl Write) -> Result<()> {
	let reader = open(path)?;

	let mut printer = Printer::default();
	reader.accept(&mut printer, flags)
		.with_context(|| anyhow!("failed to visit class file {path:?}"))?;

	for line in printer.lines {
		writeln!(out, "{line}")?;
	}
	Ok(())
}

fn header(path: &Path, out: &mut impl Write) -> Result<()> {
	let reader = open(path)?;

	let name = reader.name()?;
	let super_name = reader.super_name()?;
	let super_name = super_name.as_ref().map_or_else(|| "-".to_owned(), |s| s.to_string());
	writeln!(out, "{name}: version {}, {:?}, extends {super_name}", reader.version()?, reader.access()?)?;
	Ok(())
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	setup_logger(cli.verbose)?;

	let flags = cli.read_flags();
	debug!("using {flags:?}");

	let mut out = std::io::stdout().lock();
	match &cli.command {
		Command::Dump { files } => {
			for file in files {
				dump(file, flags, &mut out)?;
			}
		},
		Command::Header { files } => {
			for file in files {
				header(file, &mut out)?;
			}
		},
	}

	Ok(())
}
