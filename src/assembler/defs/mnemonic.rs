use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub type Opcode = u8;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Arity {
    Nullary,
    Address,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumIter)]
#[strum(serialize_all = "shouty_snake_case")]
pub enum Mnemonic {
    Load,
    Store,
    Add,
    Sub,
    Jmp,
    Hlt,
}

impl Mnemonic {
    pub fn opcode(self) -> Opcode {
        match self {
            Mnemonic::Load => 0x01,
            Mnemonic::Store => 0x02,
            Mnemonic::Add => 0x03,
            Mnemonic::Sub => 0x04,
            Mnemonic::Jmp => 0x05,
            Mnemonic::Hlt => 0xFF,
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Mnemonic::Hlt => Arity::Nullary,
            _ => Arity::Address,
        }
    }

    /// Expects an already uppercased mnemonic, as produced by the tokenizer.
    pub fn lookup(name: &str) -> Option<Mnemonic> {
        BY_NAME.get(name).copied()
    }

    pub fn from_opcode(opcode: Opcode) -> Option<Mnemonic> {
        BY_OPCODE.get(&opcode).copied()
    }
}

static BY_NAME: Lazy<HashMap<String, Mnemonic>> =
    Lazy::new(|| Mnemonic::iter().map(|m| (m.to_string(), m)).collect());

static BY_OPCODE: Lazy<HashMap<Opcode, Mnemonic>> =
    Lazy::new(|| Mnemonic::iter().map(|m| (m.opcode(), m)).collect());
