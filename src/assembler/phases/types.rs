use derive_more::Constructor;
use std::fmt::Display;

/*
    Phases:

        1.  Tokenization: The source is split at each newline, each line is trimmed and split at
            runs of whitespace, and the resulting token stream is classified into `LineKind`s.
            A label definition is removed from the front of the stream, and the remainder of the
            line is then classified again as a "fresh" stream, so `START: LOAD 5` becomes a
            `LabelDefinition` followed by an `Instruction` on the same line.

        2.  Symbols (pass 1): The classified statements are walked in order with an address
            counter. Each label is bound to the address of the next instruction, and each
            instruction consumes one address.

        3.  Generation (pass 2): The very same statements are walked again. Each instruction
            is looked up in the mnemonic table and its operand is resolved against the symbol
            table, producing one `Entry` of the final `Listing`.

    Nothing in here ever fails. Problems degrade into textual markers in the listing
    (`??`, `?? UNKNOWN INSTRUCTION`), and each of these is also reported as a `Diagnostic`.
*/

pub type Address = usize;
pub type LabelName = String;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LineKind {
    Blank,
    Comment,
    LabelDefinition(LabelName),
    Instruction(String, Option<String>),
}

impl LineKind {
    /// The predicate both passes use to decide whether a statement consumes an address.
    pub fn is_instruction(&self) -> bool {
        matches!(self, LineKind::Instruction(_, _))
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq, Constructor)]
pub struct Loc {
    line: usize,
    col: usize,
}

impl Loc {
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Located<T: Sized> {
    loc: Loc,
    val: T,
}

impl Display for Loc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(line: {}, col: {})", self.line, self.col)
    }
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}: {}", self.loc, self.val)
    }
}

impl<T> Located<T> {
    pub fn with_loc(loc: Loc, val: T) -> Self {
        Located { loc, val }
    }

    pub fn loc(&self) -> Loc {
        self.loc
    }

    pub fn value(self) -> T {
        self.val
    }

    pub fn as_value(&self) -> &T {
        &self.val
    }

    pub fn transfer<S>(&self, s: S) -> Located<S> {
        Located::with_loc(self.loc, s)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Diagnostic {
    UnresolvedSymbol(String),
    MissingOperand(String),
    UnknownInstruction(String),
    DuplicateLabel(LabelName, Address),
    ExtraTokens(String, usize),
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::UnresolvedSymbol(_)
            | Diagnostic::MissingOperand(_)
            | Diagnostic::UnknownInstruction(_) => Severity::Error,
            Diagnostic::DuplicateLabel(_, _) | Diagnostic::ExtraTokens(_, _) => Severity::Warning,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnresolvedSymbol(name) => write!(f, "Unresolved symbol '{}'", name),
            Diagnostic::MissingOperand(mnemonic) => {
                write!(f, "Instruction '{}' requires an operand", mnemonic)
            }
            Diagnostic::UnknownInstruction(mnemonic) => {
                write!(f, "Unknown instruction '{}'", mnemonic)
            }
            Diagnostic::DuplicateLabel(label, prev) => write!(
                f,
                "Label '{}' redefined (previously bound to address {}), last definition wins",
                label, prev
            ),
            Diagnostic::ExtraTokens(mnemonic, count) => write!(
                f,
                "Ignoring {} trailing token(s) after the operand of '{}'",
                count, mnemonic
            ),
        }
    }
}
