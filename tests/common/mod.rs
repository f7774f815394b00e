//! Common test utilities for integration tests.
//!
//! This module provides a tracked byte source and helpers for splitting
//! input into chunks.

pub mod mocks;

pub use mocks::*;

use bytes::Bytes;

/// Split `text` into chunks at the given byte offsets.
///
/// Offsets must be ascending and fall on character boundaries.
#[allow(dead_code)]
pub fn split_at_offsets(text: &str, offsets: &[usize]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut last = 0;
    for &offset in offsets {
        chunks.push(text[last..offset].to_string());
        last = offset;
    }
    chunks.push(text[last..].to_string());
    chunks
}

/// Split raw bytes into chunks of `size` bytes.
#[allow(dead_code)]
pub fn byte_chunks(bytes: &[u8], size: usize) -> Vec<Bytes> {
    bytes.chunks(size).map(Bytes::copy_from_slice).collect()
}
