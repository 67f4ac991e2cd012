//! The two hash primitives: a serialized MD5 digest and a freely concurrent
//! CRC32-C checksum. Both are pure, deterministic, and infallible for any
//! string input.

use md5::{Digest as _, Md5};
use std::fmt::Write;

use crate::pipeline::context::SerialLock;

/// CRC32-C of the input bytes, rendered as the decimal string of the u32
/// value. Cheap; safe to call from any number of tasks at once.
pub fn checksum(data: &str) -> String {
    crc32c::crc32c(data.as_bytes()).to_string()
}

/// MD5 of the input bytes as 32 lowercase hex chars. The underlying resource
/// tolerates only one in-flight call, so every invocation goes through
/// `lock`; the guard is held for the computation and nothing else.
pub fn digest(lock: &SerialLock, data: &str) -> String {
    let _guard = lock.acquire();
    let sum = Md5::digest(data.as_bytes());
    let mut hex = String::with_capacity(sum.len() * 2);
    for byte in sum {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
