use super::{
    resolve,
    symbols::SymbolTable,
    types::{Address, Diagnostic, LineKind, Located},
};
use crate::assembler::{
    defs::mnemonic::{Arity, Mnemonic},
    model::{Entry, MachineCodeLine, Operand},
};
use log::{debug, trace};

fn encode(
    mnemonic: &str,
    operand: Option<&str>,
    symbols: &SymbolTable,
) -> (MachineCodeLine, Option<Diagnostic>) {
    let mnemonic_def = match Mnemonic::lookup(mnemonic) {
        Some(def) => def,
        None => {
            return (
                MachineCodeLine::Unknown(mnemonic.to_owned()),
                Some(Diagnostic::UnknownInstruction(mnemonic.to_owned())),
            )
        }
    };

    match mnemonic_def.arity() {
        // Any operand given to a nullary instruction is ignored.
        Arity::Nullary => (MachineCodeLine::Halt, None),
        Arity::Address => {
            let operand = resolve::resolve(operand, symbols);
            let diag = match &operand {
                Operand::Unresolved(None) => Some(Diagnostic::MissingOperand(mnemonic.to_owned())),
                Operand::Unresolved(Some(name)) => Some(Diagnostic::UnresolvedSymbol(name.clone())),
                _ => None,
            };
            (MachineCodeLine::Encoded(mnemonic_def, operand), diag)
        }
    }
}

pub fn generate(
    statements: &[Located<LineKind>],
    symbols: &SymbolTable,
) -> (Vec<Entry>, Vec<Located<Diagnostic>>) {
    let mut entries = Vec::new();
    let mut diagnostics = Vec::new();

    let mut addr: Address = 0;
    for stmt in statements {
        if let LineKind::Instruction(mnemonic, operand) = stmt.as_value() {
            let (code, diag) = encode(mnemonic, operand.as_deref(), symbols);
            trace!("{:>4}: {} -> {}", addr, mnemonic, code);

            if let Some(diag) = diag {
                diagnostics.push(stmt.transfer(diag));
            }
            entries.push(Entry::new(addr, stmt.loc(), code));
            addr += 1;
        }
    }

    debug!(
        "pass 2: {} instruction(s), {} diagnostic(s)",
        entries.len(),
        diagnostics.len()
    );

    (entries, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::super::{symbols, tokenize::tokenize, types::Diagnostic};
    use super::generate;
    use crate::assembler::model::Entry;

    fn run(source: &str) -> (Vec<Entry>, Vec<Diagnostic>) {
        let (statements, _) = tokenize(source);
        let (table, _) = symbols::build(&statements);
        let (entries, diagnostics) = generate(&statements, &table);
        (
            entries,
            diagnostics.into_iter().map(|diag| diag.value()).collect(),
        )
    }

    fn codes(entries: &[Entry]) -> Vec<String> {
        entries.iter().map(|e| e.code.to_string()).collect()
    }

    #[test]
    fn sequential_addresses() {
        let (entries, diagnostics) = run("LOAD 1\nSTORE 2\nADD 3\nSUB 4\nJMP 5\nHLT");
        assert!(diagnostics.is_empty());
        assert_eq!(
            entries.iter().map(|e| e.addr).collect::<Vec<_>>(),
            (0..6).collect::<Vec<_>>()
        );
        assert_eq!(
            codes(&entries),
            vec!["01 1", "02 2", "03 3", "04 4", "05 5", "FF"]
        );
    }

    #[test]
    fn halt_ignores_operand() {
        let (entries, diagnostics) = run("HLT 5\nhlt\nHlt somewhere");
        assert!(diagnostics.is_empty());
        assert_eq!(codes(&entries), vec!["FF", "FF", "FF"]);
    }

    #[test]
    fn unknown_instruction_still_consumes_an_address() {
        let (entries, diagnostics) = run("FOO 1\nL: HLT\nJMP L");
        assert_eq!(codes(&entries), vec!["?? UNKNOWN INSTRUCTION", "FF", "05 1"]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnknownInstruction(String::from("FOO"))]
        );
    }

    #[test]
    fn missing_and_unresolved_operands() {
        let (entries, diagnostics) = run("LOAD\nSTORE nowhere");
        assert_eq!(codes(&entries), vec!["01 ??", "02 ??"]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::MissingOperand(String::from("LOAD")),
                Diagnostic::UnresolvedSymbol(String::from("nowhere")),
            ]
        );
    }
}
