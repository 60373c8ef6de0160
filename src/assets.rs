use std::path::PathBuf;

pub const SOURCE_EXT: &str = "tas";
pub const LISTING_EXT: &str = "lst";

// RUSTFIX make this const once `PathBuf` is.
pub fn default_suite_dir() -> PathBuf {
    ["asm", "test"].iter().collect()
}
