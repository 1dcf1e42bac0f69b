// File plumbing shared by the encrypt/decrypt operations

pub mod blocks;

pub use blocks::{read_blocks, write_blocks};
