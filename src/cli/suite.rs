use super::command;
use crate::assets;
use ansi_term::Color::{Green, Red};
use anyhow::Context;
use derive_more::Constructor;
use itertools::{EitherOrBoth, Itertools};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Constructor)]
pub struct UnitSrc {
    name: OsString,
    src: PathBuf,
    expected: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    MissingExpected,
    Mismatch {
        line: usize,
        expected: Option<String>,
        actual: Option<String>,
    },
}

impl UnitSrc {
    pub fn name(&self) -> &OsString {
        &self.name
    }

    pub fn run(&self) -> anyhow::Result<Outcome> {
        let actual = command::assemble_path(&self.src)?.to_string();
        let expected = match &self.expected {
            None => return Ok(Outcome::MissingExpected),
            Some(path) => command::read_source(path)?,
        };

        Ok(compare(&expected, &actual))
    }
}

/// Compares listings line by line, ignoring a trailing `\r` on either side.
pub fn compare(expected: &str, actual: &str) -> Outcome {
    let mismatch = expected
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .zip_longest(actual.lines().map(|l| l.trim_end_matches('\r')))
        .enumerate()
        .find_map(|(idx, pair)| match pair {
            EitherOrBoth::Both(e, a) if e == a => None,
            EitherOrBoth::Both(e, a) => Some((idx, Some(e), Some(a))),
            EitherOrBoth::Left(e) => Some((idx, Some(e), None)),
            EitherOrBoth::Right(a) => Some((idx, None, Some(a))),
        });

    match mismatch {
        None => Outcome::Pass,
        Some((idx, expected, actual)) => Outcome::Mismatch {
            line: idx + 1,
            expected: expected.map(str::to_owned),
            actual: actual.map(str::to_owned),
        },
    }
}

fn find_file_unit(path: &Path) -> Option<UnitSrc> {
    if !path.extension().map_or(false, |ext| ext == assets::SOURCE_EXT) {
        return None;
    }

    let expected = path.with_extension(assets::LISTING_EXT);
    Some(UnitSrc::new(
        path.file_stem()?.to_owned(),
        PathBuf::from(path),
        if expected.exists() {
            Some(expected)
        } else {
            None
        },
    ))
}

pub fn find_units(suite_dir: &Path) -> anyhow::Result<Vec<UnitSrc>> {
    let mut units = Vec::new();
    let entries = suite_dir
        .read_dir()
        .with_context(|| format!("Could not read suite directory '{}'", suite_dir.display()))?;

    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            units.extend(find_file_unit(&entry.path()));
        }
    }

    units.sort_unstable_by(|unit1, unit2| unit1.name.cmp(&unit2.name));
    Ok(units)
}

pub fn run_suite(suite_dir: &Path, only_this: Option<&OsString>) -> anyhow::Result<bool> {
    let all_units = find_units(suite_dir)?;

    let selected_units = match only_this {
        None => all_units,
        Some(only_this) => {
            let unit = all_units
                .into_iter()
                .find(|unit| &unit.name == only_this)
                .with_context(|| format!("No unit named '{}'", only_this.to_string_lossy()))?;
            vec![unit]
        }
    };

    Ok(run_units(
        &suite_dir.to_string_lossy(),
        &selected_units,
    ))
}

fn run_units(name: &str, units: &[UnitSrc]) -> bool {
    let name_pad = units.iter().map(|unit| unit.name.len()).max().unwrap_or(0);

    println!("Running suite: '{}' ({} units)", name, units.len());
    println!("{:-<line_len$}", "", line_len = name_pad + 45);

    let passes = units
        .iter()
        .enumerate()
        .filter(|(num, unit)| run_unit(unit, num + 1, name_pad))
        .count();
    let success = passes == units.len();

    println!("{:-<line_len$}", "", line_len = name_pad + 45);
    println!(
        "Suite Result: {}, {}/{} passes",
        if success {
            Green.bold().paint("SUCCESS")
        } else {
            Red.bold().paint("FAILED")
        },
        passes,
        units.len()
    );

    success
}

fn run_unit(src: &UnitSrc, num: usize, name_pad: usize) -> bool {
    let (success, msg) = match src.run() {
        Err(err) => (
            false,
            format!("{}: {:#}", Red.bold().paint("FAIL: IO ERROR"), err),
        ),
        Ok(Outcome::Pass) => (true, format!("{}", Green.bold().paint("PASS"))),
        Ok(Outcome::MissingExpected) => (
            false,
            format!("{}", Red.bold().paint("FAIL: NO EXPECTED LISTING")),
        ),
        Ok(Outcome::Mismatch {
            line,
            expected,
            actual,
        }) => (
            false,
            format!(
                "{} at line {}:\n\texpected: {}\n\tactual:   {}",
                Red.bold().paint("FAIL: MISMATCH"),
                line,
                expected.as_deref().unwrap_or("<end of listing>"),
                actual.as_deref().unwrap_or("<end of listing>"),
            ),
        ),
    };

    println!(
        "Unit {:2 }: {} {}{}",
        num,
        src.name
            .to_str()
            .unwrap_or(&format!("<invalid UTF-8>: {:?}", src.name)),
        " ".repeat(name_pad - src.name.len()),
        msg
    );

    success
}
