pub mod dictionary;
pub mod error;
pub mod extract;
pub mod filename;
pub mod hasher;
pub mod pack;
pub mod read;
pub mod resolve;

mod compression;
mod serde_util;
mod spec;
