use super::defs::mnemonic::{Mnemonic, Opcode};
use super::phases::{
    symbols::SymbolTable,
    types::{Address, Diagnostic, Loc, Located, Severity},
};
use derive_more::Constructor;
use std::fmt::Display;

pub const UNRESOLVED_MARKER: &str = "??";
pub const UNKNOWN_INSTRUCTION_MARKER: &str = "?? UNKNOWN INSTRUCTION";

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Operand {
    /// A decimal literal, kept exactly as written (leading zeros included).
    Literal(String),
    Label(String, Address),
    Unresolved(Option<String>),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Literal(raw) => write!(f, "{}", raw),
            Operand::Label(_, addr) => write!(f, "{}", addr),
            Operand::Unresolved(_) => write!(f, "{}", UNRESOLVED_MARKER),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MachineCodeLine {
    Encoded(Mnemonic, Operand),
    Halt,
    Unknown(String),
}

impl MachineCodeLine {
    pub fn opcode(&self) -> Option<Opcode> {
        match self {
            MachineCodeLine::Encoded(mnemonic, _) => Some(mnemonic.opcode()),
            MachineCodeLine::Halt => Some(Mnemonic::Hlt.opcode()),
            MachineCodeLine::Unknown(_) => None,
        }
    }
}

impl Display for MachineCodeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineCodeLine::Encoded(mnemonic, operand) => {
                write!(f, "{:02X} {}", mnemonic.opcode(), operand)
            }
            MachineCodeLine::Halt => write!(f, "{:02X}", Mnemonic::Hlt.opcode()),
            MachineCodeLine::Unknown(_) => write!(f, "{}", UNKNOWN_INSTRUCTION_MARKER),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Constructor)]
pub struct Entry {
    pub addr: Address,
    pub loc: Loc,
    pub code: MachineCodeLine,
}

#[derive(Debug, Clone, Constructor)]
pub struct Listing {
    entries: Vec<Entry>,
    symbols: SymbolTable,
    diagnostics: Vec<Located<Diagnostic>>,
}

impl Listing {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &[Located<Diagnostic>] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.as_value().severity() == Severity::Error)
    }

    /// One line per entry: the address in hex, the code, and the source line it came from.
    pub fn annotated(&self) -> String {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{:04X}  {:<24}; line {}\n",
                    entry.addr,
                    entry.code.to_string(),
                    entry.loc.line()
                )
            })
            .collect()
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::defs::mnemonic::Mnemonic;
    use super::{MachineCodeLine, Operand};

    #[test]
    fn render_lines() {
        assert_eq!(
            MachineCodeLine::Encoded(Mnemonic::Store, Operand::Literal(String::from("007")))
                .to_string(),
            "02 007"
        );
        assert_eq!(
            MachineCodeLine::Encoded(Mnemonic::Jmp, Operand::Label(String::from("END"), 12))
                .to_string(),
            "05 12"
        );
        assert_eq!(
            MachineCodeLine::Encoded(Mnemonic::Sub, Operand::Unresolved(None)).to_string(),
            "04 ??"
        );
        assert_eq!(MachineCodeLine::Halt.to_string(), "FF");
        assert_eq!(
            MachineCodeLine::Unknown(String::from("FOO")).to_string(),
            "?? UNKNOWN INSTRUCTION"
        );
    }
}
