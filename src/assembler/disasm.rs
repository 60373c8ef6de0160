use super::defs::mnemonic::{Arity, Mnemonic, Opcode};
use super::model::{UNKNOWN_INSTRUCTION_MARKER, UNRESOLVED_MARKER};
use super::phases::{tokenize::raw_tokens, types::Located};
use std::fmt::Display;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidOpcode(String),
    MalformedLine(String, &'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOpcode(raw) => write!(f, "Invalid opcode: '{}'", raw),
            Error::MalformedLine(raw, msg) => write!(f, "Malformed line '{}': {}", raw, msg),
        }
    }
}

/// Opcodes are always written as exactly two hex digits.
fn decode_opcode(raw: &str) -> Result<Mnemonic, Error> {
    Some(raw)
        .filter(|raw| raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|raw| Opcode::from_str_radix(raw, 16).ok())
        .and_then(Mnemonic::from_opcode)
        .ok_or_else(|| Error::InvalidOpcode(raw.to_owned()))
}

fn is_operand(raw: &str) -> bool {
    raw == UNRESOLVED_MARKER || (!raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()))
}

fn disassemble_line(line: &str, tokens: &[&str]) -> Result<String, Error> {
    if line.trim() == UNKNOWN_INSTRUCTION_MARKER {
        // Reassembles to the same marker, and keeps the address it occupied.
        return Ok(UNRESOLVED_MARKER.to_owned());
    }

    let mnemonic = decode_opcode(tokens[0])?;
    match (mnemonic.arity(), &tokens[1..]) {
        (Arity::Nullary, []) => Ok(mnemonic.to_string()),
        (Arity::Nullary, _) => Err(Error::MalformedLine(
            line.to_owned(),
            "nullary instruction has an operand",
        )),
        (Arity::Address, [operand]) if is_operand(operand) => {
            Ok(format!("{} {}", mnemonic, operand))
        }
        (Arity::Address, [_]) => Err(Error::MalformedLine(
            line.to_owned(),
            "operand is neither an address nor a marker",
        )),
        (Arity::Address, _) => Err(Error::MalformedLine(
            line.to_owned(),
            "expected exactly one operand",
        )),
    }
}

/// Turns a listing back into source text, one instruction per line. Label names cannot be
/// recovered, so every reference comes back as its numeric address.
pub fn disassemble(listing: &str) -> Result<String, Located<Error>> {
    let mut out = String::new();

    for (idx, line) in listing.split('\n').enumerate() {
        let tokens = raw_tokens(idx + 1, line);
        let loc = match tokens.first() {
            Some(first) => first.loc(),
            None => continue,
        };

        let words = tokens.iter().map(|tok| *tok.as_value()).collect::<Vec<_>>();
        let inst =
            disassemble_line(line, &words).map_err(|err| Located::with_loc(loc, err))?;

        out.push_str(&inst);
        out.push('\n');
    }

    Ok(out)
}
