pub mod types;

pub mod generate;
pub mod resolve;
pub mod symbols;
pub mod tokenize;

pub use generate::generate;
pub use resolve::resolve;
pub use tokenize::{classify, tokenize};
