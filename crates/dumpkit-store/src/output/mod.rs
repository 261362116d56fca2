//! JSON output files
//!
//! Provides:
//! - Record rendering (bare list or counted envelope)
//! - Atomic temp-then-rename writes
//! - SHA-256 digests of written bytes

mod atomic;
mod digest;
mod writer;

pub use atomic::atomic_write;
pub use digest::sha256_hex;
pub use writer::{render_records, write_records, WrittenOutput};
