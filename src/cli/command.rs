use super::suite;
use crate::assembler::{self, disasm, Listing, Severity};
use crate::assets;
use ansi_term::Color::{Red, Yellow};
use anyhow::Context;
use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

pub const EXIT_OK: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

#[cfg(windows)]
pub fn terminal_init() {
    ansi_term::enable_ansi_support().expect("Could enable terminal ANSI support");
    logger_init();
}

#[cfg(not(windows))]
pub fn terminal_init() {
    logger_init();
}

fn logger_init() {
    // Silent unless `RUST_LOG` says otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();
}

#[derive(StructOpt, Debug)]
#[structopt(name = "tpasm")]
pub enum CommandRoot {
    Asm(SubcommandAsm),
    Symbols(SubcommandSymbols),
    Check(SubcommandCheck),
    Disasm(SubcommandDisasm),
    Suite(SubcommandSuite),
}

/// Assemble a source file into a machine-code listing.
#[derive(StructOpt, Debug)]
#[structopt(name = "tasm")]
pub struct SubcommandAsm {
    /// Source file, or `-` for stdin.
    #[structopt(name = "in.tas", parse(from_os_str))]
    in_src: PathBuf,

    /// Listing file to write; stdout if omitted.
    #[structopt(name = "out.lst", parse(from_os_str))]
    out_listing: Option<PathBuf>,

    /// Prefix each line with its address and suffix it with its source line.
    #[structopt(short, long)]
    annotate: bool,

    /// Exit with a nonzero status if any error diagnostic was produced.
    #[structopt(short, long)]
    strict: bool,
}

/// Print the symbol table, ordered by address.
#[derive(StructOpt, Debug)]
pub struct SubcommandSymbols {
    #[structopt(name = "in.tas", parse(from_os_str))]
    in_src: PathBuf,
}

/// Report diagnostics without writing a listing.
#[derive(StructOpt, Debug)]
pub struct SubcommandCheck {
    #[structopt(name = "in.tas", parse(from_os_str))]
    in_src: PathBuf,
}

/// Turn a listing back into source text.
#[derive(StructOpt, Debug)]
pub struct SubcommandDisasm {
    #[structopt(name = "in.lst", parse(from_os_str))]
    in_listing: PathBuf,

    #[structopt(name = "out.tas", parse(from_os_str))]
    out_src: Option<PathBuf>,
}

/// Assemble every unit of a suite and compare against the expected listings.
#[derive(StructOpt, Debug)]
pub struct SubcommandSuite {
    #[structopt(name = "suite/dir", parse(from_os_str))]
    suite_dir: Option<PathBuf>,

    #[structopt(short, long, parse(from_os_str))]
    only: Option<OsString>,
}

pub fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read source from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Could not read '{}'", path.display()))
    }
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Could not write '{}'", path.display())),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(text.as_bytes())
                .and_then(|_| handle.flush())
                .context("Could not write to stdout")
        }
    }
}

pub fn assemble_path(path: &Path) -> anyhow::Result<Listing> {
    Ok(assembler::assemble_listing(&read_source(path)?))
}

fn print_diagnostics(path: &Path, listing: &Listing) {
    for diag in listing.diagnostics() {
        let severity = diag.as_value().severity();
        let tag = match severity {
            Severity::Error => Red.bold().paint(severity.to_string()),
            Severity::Warning => Yellow.bold().paint(severity.to_string()),
        };
        eprintln!(
            "{}:{}:{}: {}: {}",
            path.display(),
            diag.loc().line(),
            diag.loc().col(),
            tag,
            diag.as_value()
        );
    }
}

fn finish(result: anyhow::Result<i32>) -> ! {
    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {:#}", Red.bold().paint("error"), err);
            EXIT_FAILURE
        }
    };

    std::process::exit(code);
}

pub fn root(cmd: CommandRoot) -> ! {
    match cmd {
        CommandRoot::Asm(scmd) => asm(scmd),
        CommandRoot::Symbols(scmd) => symbols(scmd),
        CommandRoot::Check(scmd) => check(scmd),
        CommandRoot::Disasm(scmd) => disasm(scmd),
        CommandRoot::Suite(scmd) => suite(scmd),
    };
}

fn run_asm(cmd: SubcommandAsm) -> anyhow::Result<i32> {
    let listing = assemble_path(&cmd.in_src)?;
    print_diagnostics(&cmd.in_src, &listing);

    let text = if cmd.annotate {
        listing.annotated()
    } else {
        listing.to_string()
    };
    write_output(cmd.out_listing.as_deref(), &text)?;

    Ok(if cmd.strict && listing.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_OK
    })
}

pub fn asm(cmd: SubcommandAsm) -> ! {
    finish(run_asm(cmd))
}

pub fn symbols(cmd: SubcommandSymbols) -> ! {
    finish(assemble_path(&cmd.in_src).map(|listing| {
        let symbols = listing.symbols();
        let width = symbols.sorted().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, addr) in symbols.sorted() {
            println!("{:<width$}  {:04X}  ({})", label, addr, addr, width = width);
        }
        EXIT_OK
    }))
}

pub fn check(cmd: SubcommandCheck) -> ! {
    finish(assemble_path(&cmd.in_src).map(|listing| {
        print_diagnostics(&cmd.in_src, &listing);
        if listing.has_errors() {
            EXIT_DIAGNOSTICS
        } else {
            EXIT_OK
        }
    }))
}

fn run_disasm(cmd: SubcommandDisasm) -> anyhow::Result<i32> {
    let listing = read_source(&cmd.in_listing)?;
    let src = disasm::disassemble(&listing).map_err(|err| {
        anyhow::anyhow!("Disassembly of '{}' failed {}", cmd.in_listing.display(), err)
    })?;
    write_output(cmd.out_src.as_deref(), &src)?;
    Ok(EXIT_OK)
}

pub fn disasm(cmd: SubcommandDisasm) -> ! {
    finish(run_disasm(cmd))
}

pub fn suite(cmd: SubcommandSuite) -> ! {
    finish(
        suite::run_suite(
            &cmd.suite_dir.unwrap_or_else(assets::default_suite_dir),
            cmd.only.as_ref(),
        )
        .map(|success| if success { EXIT_OK } else { EXIT_DIAGNOSTICS }),
    )
}
