use super::types::{Diagnostic, LineKind, Loc, Located};
use log::trace;

pub const COMMENT_CHAR: char = ';';
pub const LABEL_CHAR: char = ':';

/// Splits one line at runs of whitespace, remembering where each token started.
/// Columns are 1-based byte offsets into the untrimmed line.
pub(crate) fn raw_tokens(line_no: usize, line: &str) -> Vec<Located<&str>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(start_idx)) => {
                tokens.push(Located::with_loc(
                    Loc::new(line_no, start_idx + 1),
                    &line[start_idx..idx],
                ));
                start = None;
            }
            (false, None) => start = Some(idx),
            _ => (),
        }
    }

    if let Some(start_idx) = start {
        tokens.push(Located::with_loc(
            Loc::new(line_no, start_idx + 1),
            &line[start_idx..],
        ));
    }

    tokens
}

fn is_comment(token: &str) -> bool {
    token.starts_with(COMMENT_CHAR)
}

fn classify_tokens(tokens: &[&str]) -> LineKind {
    match tokens.first() {
        None => LineKind::Blank,
        Some(first) if is_comment(first) => LineKind::Comment,
        Some(first) => match first.strip_suffix(LABEL_CHAR) {
            Some(label) => LineKind::LabelDefinition(label.to_owned()),
            None => LineKind::Instruction(
                first.to_uppercase(),
                tokens.get(1).map(|operand| (*operand).to_owned()),
            ),
        },
    }
}

/// Classifies a single line by its first token. Pure; a line holding a label followed by an
/// instruction classifies as the `LabelDefinition`.
pub fn classify(line: &str) -> LineKind {
    classify_tokens(&line.split_whitespace().collect::<Vec<_>>())
}

fn tokenize_line(
    line_no: usize,
    line: &str,
    statements: &mut Vec<Located<LineKind>>,
    diagnostics: &mut Vec<Located<Diagnostic>>,
) {
    let tokens = raw_tokens(line_no, line);
    let mut rest = &tokens[..];

    loop {
        let loc = rest
            .first()
            .map(Located::loc)
            .unwrap_or_else(|| Loc::new(line_no, 1));
        let words = rest.iter().map(|tok| *tok.as_value()).collect::<Vec<_>>();
        let kind = classify_tokens(&words);
        trace!("line {}: {:?}", line_no, kind);

        let more = match &kind {
            LineKind::LabelDefinition(_) => {
                rest = &rest[1..];
                !rest.is_empty()
            }
            LineKind::Instruction(mnemonic, _) => {
                let extra = match words.get(1) {
                    Some(operand) if is_comment(operand) => 0,
                    _ => words
                        .iter()
                        .skip(2)
                        .take_while(|word| !is_comment(word))
                        .count(),
                };
                if extra > 0 {
                    diagnostics.push(Located::with_loc(
                        loc,
                        Diagnostic::ExtraTokens(mnemonic.clone(), extra),
                    ));
                }
                false
            }
            LineKind::Blank | LineKind::Comment => false,
        };

        statements.push(Located::with_loc(loc, kind));

        if !more {
            break;
        }
    }
}

/// Splits the source at each newline and classifies every line. A label definition is
/// peeled off the front of its line and the remainder is classified again, so one source
/// line may yield several statements.
pub fn tokenize(source: &str) -> (Vec<Located<LineKind>>, Vec<Located<Diagnostic>>) {
    let mut statements = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, line) in source.split('\n').enumerate() {
        tokenize_line(idx + 1, line, &mut statements, &mut diagnostics);
    }

    (statements, diagnostics)
}
