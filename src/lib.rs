pub mod assets;

pub mod assembler;

pub mod cli;

pub use assembler::{assemble, assemble_listing};
