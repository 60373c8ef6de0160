pub mod disasm;
pub mod model;
pub mod phases;

pub mod defs;

pub use model::Listing;
pub use phases::{
    symbols::SymbolTable,
    types::{Address, Diagnostic, LineKind, Loc, Located, Severity},
};

/// Runs both passes and keeps everything they learned: the emitted entries, the symbol
/// table, and a diagnostic for every marker that ended up in the text.
pub fn assemble_listing(source: &str) -> Listing {
    let (statements, mut diagnostics) = phases::tokenize(source);
    let (symbols, symbol_diags) = phases::symbols::build(&statements);
    let (entries, generate_diags) = phases::generate(&statements, &symbols);

    diagnostics.extend(symbol_diags);
    diagnostics.extend(generate_diags);
    diagnostics.sort_by_key(|diag| (diag.loc().line(), diag.loc().col()));

    Listing::new(entries, symbols, diagnostics)
}

/// Assembles `source` into its textual machine-code listing, one `\n`-terminated line per
/// instruction. Never fails; problems show up as `??` markers in the text.
pub fn assemble(source: &str) -> String {
    assemble_listing(source).to_string()
}
