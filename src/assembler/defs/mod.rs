pub mod mnemonic;
