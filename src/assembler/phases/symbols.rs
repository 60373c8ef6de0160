use super::types::{Address, Diagnostic, LabelName, LineKind, Located};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    labels: HashMap<LabelName, Address>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `label`, returning the address it was previously bound to, if any.
    pub fn define(&mut self, label: LabelName, addr: Address) -> Option<Address> {
        self.labels.insert(label, addr)
    }

    pub fn get(&self, label: &str) -> Option<Address> {
        self.labels.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Entries ordered by address, then by name.
    pub fn sorted(&self) -> impl Iterator<Item = (&str, Address)> {
        self.labels
            .iter()
            .map(|(label, addr)| (label.as_str(), *addr))
            .sorted_by(|(l1, a1), (l2, a2)| a1.cmp(a2).then_with(|| l1.cmp(l2)))
    }
}

pub fn build(statements: &[Located<LineKind>]) -> (SymbolTable, Vec<Located<Diagnostic>>) {
    let mut table = SymbolTable::new();
    let mut diagnostics = Vec::new();

    let mut addr: Address = 0;
    for stmt in statements {
        match stmt.as_value() {
            LineKind::LabelDefinition(label) => {
                trace!("binding '{}' to {}", label, addr);
                if let Some(prev) = table.define(label.clone(), addr) {
                    diagnostics
                        .push(stmt.transfer(Diagnostic::DuplicateLabel(label.clone(), prev)));
                }
            }
            kind if kind.is_instruction() => addr += 1,
            _ => (),
        }
    }

    debug!(
        "pass 1: {} label(s) over {} instruction(s)",
        table.len(),
        addr
    );

    (table, diagnostics)
}
