/// Assembles the given source lines and compares the result, line by line, with the
/// expected listing lines.
#[macro_export]
macro_rules! assert_listing {
    ([$($src:expr),* $(,)?] => [$($out:expr),* $(,)?]) => {
        assert_eq!(
            tpasm::assemble(&[$($src),*].join("\n")),
            [$($out),*]
                .iter()
                .map(|line: &&str| format!("{}\n", line))
                .collect::<String>()
        )
    };
}
