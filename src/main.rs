use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chip8_dasm::{write_listing, DisassemblyOptions, ErrorKind, LoadError, ProgramBuffer};
use clap::{CommandFactory, Parser};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

const ABOUT: &str = concat!(
    "chip8-dasm ",
    env!("CARGO_PKG_VERSION"),
    "\n\n",
    "Disassembles CHIP-8 program images. The image is loaded at 0x200 and\n",
    "every 16-bit word is listed with its address, raw value, mnemonic and\n",
    "operands. Undefined encodings are listed as ??? and never stop the run.\n\n",
    "Licensed under MIT OR Apache-2.0.",
);

#[derive(Parser, Debug)]
#[command(name = "chip8-dasm", version)]
#[command(about = "Disassemble a CHIP-8 program image", long_about = None)]
struct Args {
    /// CHIP-8 program image
    #[arg(required_unless_present = "about")]
    file: Option<PathBuf>,

    /// Print information about the program and exit
    #[arg(short, long)]
    about: bool,

    /// Write the listing to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,

    /// Omit the two header lines
    #[arg(long)]
    no_header: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("could not open file {}: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("could not write listing: {0}")]
    Write(#[source] io::Error),
}

impl CliError {
    fn kind(&self) -> ErrorKind {
        match self {
            CliError::Load(e) => e.kind(),
            CliError::Output { .. } | CliError::Write(_) => ErrorKind::Io,
        }
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(false).with_writer(io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn run(file: &Path, args: &Args) -> Result<(), CliError> {
    let mut buffer = ProgramBuffer::new();
    buffer.load_file(file)?;
    info!(file = %file.display(), len = buffer.loaded_len(), "program loaded");

    let mut out: Box<dyn Write> = match &args.out {
        Some(path) => {
            let handle = File::create(path).map_err(|source| CliError::Output {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(handle))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let options = DisassemblyOptions {
        header: !args.no_header,
    };
    write_listing(&buffer, options, &mut out).map_err(CliError::Write)
}

fn main() -> ExitCode {
    setup_tracing();

    let args = Args::parse();

    if args.about {
        println!("\n{}\n", ABOUT);
        return ExitCode::SUCCESS;
    }

    let Some(file) = args.file.as_deref() else {
        Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a program file is required",
            )
            .exit()
    };

    match run(file, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(kind = ?e.kind(), "disassembly aborted");
            eprintln!("chip8-dasm: {}", e);
            ExitCode::from(e.kind().exit_code())
        }
    }
}
