#[macro_use]
mod common;

use tpasm::assembler::{
    self, defs::mnemonic::Mnemonic, disasm, model::MachineCodeLine, Diagnostic, Loc, Located,
};

#[test]
fn end_to_end_example() {
    assert_listing!(
        ["START: LOAD 5", "ADD 5", "JMP START", "HLT"] => ["01 5", "03 5", "05 0", "FF"]
    );
}

#[test]
fn addresses_follow_instruction_order() {
    let src = ["LOAD 9", "STORE 8", "ADD 7", "SUB 6", "JMP 5", "HLT", "LOAD 3"].join("\n");
    let listing = assembler::assemble_listing(&src);

    assert!(listing.diagnostics().is_empty());
    for (n, entry) in listing.entries().iter().enumerate() {
        assert_eq!(entry.addr, n);
    }

    let expected_opcodes = ["01", "02", "03", "04", "05", "FF", "01"];
    let text = listing.to_string();
    assert_eq!(text.lines().count(), expected_opcodes.len());
    for (line, opcode) in text.lines().zip(expected_opcodes.iter()) {
        assert!(line.starts_with(opcode), "{} vs {}", line, opcode);
    }
}

#[test]
fn label_binds_to_following_instruction() {
    assert_listing!(
        ["LOAD 1", "ADD 1", "here:", "SUB 1", "JMP here"] => ["01 1", "03 1", "04 1", "05 2"]
    );
}

#[test]
fn forward_reference() {
    assert_listing!(
        ["JMP END", "LOAD 1", "END: HLT"] => ["05 2", "01 1", "FF"]
    );
}

#[test]
fn unknown_mnemonic() {
    assert_eq!(assembler::assemble("FOO 1"), "?? UNKNOWN INSTRUCTION\n");
}

#[test]
fn undefined_symbol() {
    assert_eq!(assembler::assemble("STORE nowhere"), "02 ??\n");
}

#[test]
fn halt_operand_is_ignored() {
    assert_listing!(["HLT", "HLT 3", "hlt label"] => ["FF", "FF", "FF"]);
}

#[test]
fn blanks_and_comments_produce_nothing() {
    assert_listing!(
        ["", "; header", "   ", "LOAD 1", "\t; indented", "", "x: JMP x", ""]
            => ["01 1", "05 1"]
    );
    assert_eq!(assembler::assemble(""), "");
    assert_eq!(assembler::assemble("; only\n\n"), "");
}

#[test]
fn mnemonics_are_case_insensitive_but_labels_are_not() {
    assert_listing!(
        ["Loop: load 1", "jmp Loop", "jmp loop"] => ["01 1", "05 0", "05 ??"]
    );
}

#[test]
fn carriage_returns_are_whitespace() {
    assert_eq!(
        assembler::assemble("START: LOAD 5\r\nJMP START\r\n"),
        "01 5\n05 0\n"
    );
}

#[test]
fn comment_after_mnemonic_is_not_an_extra_token() {
    let listing = assembler::assemble_listing("HLT ; halt the machine\nLOAD 1 ; load it");
    assert_eq!(listing.to_string(), "FF\n01 1\n");
    assert!(listing.diagnostics().is_empty());
}

#[test]
fn duplicate_labels_last_wins_with_warning() {
    let listing = assembler::assemble_listing("a: LOAD 1\na: ADD 1\nJMP a");
    assert_eq!(listing.to_string(), "01 1\n03 1\n05 1\n");
    assert!(!listing.has_errors());
    assert_eq!(
        listing.diagnostics(),
        &[Located::with_loc(
            Loc::new(2, 1),
            Diagnostic::DuplicateLabel(String::from("a"), 0)
        )]
    );
}

#[test]
fn diagnostics_point_at_their_lines() {
    let listing = assembler::assemble_listing("FOO 1\n\nLOAD\nx: STORE y\nHLT");
    assert!(listing.has_errors());
    assert_eq!(
        listing.diagnostics(),
        &[
            Located::with_loc(
                Loc::new(1, 1),
                Diagnostic::UnknownInstruction(String::from("FOO"))
            ),
            Located::with_loc(
                Loc::new(3, 1),
                Diagnostic::MissingOperand(String::from("LOAD"))
            ),
            Located::with_loc(
                Loc::new(4, 4),
                Diagnostic::UnresolvedSymbol(String::from("y"))
            ),
        ]
    );
    assert_eq!(listing.to_string(), "?? UNKNOWN INSTRUCTION\n01 ??\n02 ??\nFF\n");
}

#[test]
fn listing_keeps_typed_entries() {
    let listing = assembler::assemble_listing("top: LOAD 0\nJMP top");
    assert_eq!(listing.entries().len(), 2);
    assert_eq!(listing.entries()[1].loc, Loc::new(2, 1));
    assert_eq!(listing.entries()[0].code.opcode(), Some(Mnemonic::Load.opcode()));
    assert!(matches!(
        listing.entries()[1].code,
        MachineCodeLine::Encoded(Mnemonic::Jmp, _)
    ));
    assert_eq!(listing.symbols().get("top"), Some(0));
    assert_eq!(
        listing.annotated(),
        format!("0000  {:<24}; line 1\n0001  {:<24}; line 2\n", "01 0", "05 0")
    );
}

#[test]
fn disassembly_reassembles_to_the_same_listing() {
    let src = ["LOAD 12", "STORE 013", "BOGUS", "ADD nope", "SUB 1", "JMP 0", "HLT"].join("\n");
    let listing = assembler::assemble(&src);
    let recovered = disasm::disassemble(&listing).unwrap();
    assert_eq!(assembler::assemble(&recovered), listing);
}

#[test]
fn assemble_is_reentrant_across_threads() {
    let handles = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let src = format!("L{}: LOAD {}\nJMP L{}", n, n, n);
                assembler::assemble(&src)
            })
        })
        .collect::<Vec<_>>();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("01 {}\n05 0\n", n));
    }
}
