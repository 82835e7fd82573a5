pub mod compress;
pub mod decompress;
pub mod diff;
