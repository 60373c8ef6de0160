use super::symbols::SymbolTable;
use crate::assembler::model::Operand;

fn is_decimal_literal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Decides whether an operand is a literal address or a reference to a label. Never fails:
/// anything that is neither degrades to `Operand::Unresolved`.
pub fn resolve(operand: Option<&str>, symbols: &SymbolTable) -> Operand {
    match operand {
        None => Operand::Unresolved(None),
        Some(token) if is_decimal_literal(token) => Operand::Literal(token.to_owned()),
        Some(token) => match symbols.get(token) {
            Some(addr) => Operand::Label(token.to_owned(), addr),
            None => Operand::Unresolved(Some(token.to_owned())),
        },
    }
}

/// The textual form of `resolve`: the literal itself, the label's address, or `??`.
pub fn resolve_text(operand: &str, symbols: &SymbolTable) -> String {
    resolve(Some(operand), symbols).to_string()
}
