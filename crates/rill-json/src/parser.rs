//! Buffered and streaming parse entry points.
//!
//! Both paths drive the same [`TreeBuilder`](crate::builder); the streaming
//! loop additionally owns a carry buffer so tokens split across chunk
//! boundaries are simply rescanned once the next chunk arrives. Pulling the
//! next chunk is the only blocking point in a parse; everything else runs on
//! bytes already in hand.
//!
//! The loop stops as soon as the source reports completion and the carry is
//! drained. It does **not** verify that no tokens follow a structurally
//! complete root value — trailing garbage after a closed root container is
//! folded into it or ignored, a documented compatibility quirk of the wire
//! format this parser replicates.

use crate::builder::{Step, TreeBuilder};
use crate::error::{JsonError, Result};
use crate::value::JsonValue;
use std::collections::VecDeque;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Bytes handed over per [`ReaderSource`] pull.
const PULL_SIZE: usize = 4096;

/// One pull's worth of bytes plus the end-of-input flag.
pub struct Chunk {
    pub bytes: Vec<u8>,
    /// No further bytes will follow this chunk.
    pub done: bool,
}

/// A pull-based source of byte chunks. The parse loop never closes the
/// underlying transport; lifetime management stays with the caller.
pub trait ByteSource {
    fn pull(&mut self) -> std::io::Result<Chunk>;
}

/// Adapts any [`Read`] into a byte source with fixed-size pulls.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource { reader }
    }

    /// Hand the reader back, e.g. to keep consuming the transport after a
    /// parse.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn pull(&mut self) -> std::io::Result<Chunk> {
        let mut bytes = vec![0u8; PULL_SIZE];
        let n = self.reader.read(&mut bytes)?;
        bytes.truncate(n);
        Ok(Chunk {
            bytes,
            done: n == 0,
        })
    }
}

/// An in-memory source that yields a fixed sequence of chunks, preserving
/// the exact fragment boundaries it was given. Useful for exercising
/// non-token-aligned deliveries.
pub struct ChunkSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ChunkSource {
    pub fn new(chunks: impl IntoIterator<Item = Vec<u8>>) -> Self {
        ChunkSource {
            chunks: chunks.into_iter().collect(),
        }
    }
}

impl ByteSource for ChunkSource {
    fn pull(&mut self) -> std::io::Result<Chunk> {
        let bytes = self.chunks.pop_front().unwrap_or_default();
        Ok(Chunk {
            bytes,
            done: self.chunks.is_empty(),
        })
    }
}

/// A shared cancellation flag, checked before every pull. Cloning shares the
/// flag; cancelling any clone aborts the parse with
/// [`JsonError::Cancelled`].
#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Parse a complete in-memory buffer into a document tree.
pub fn parse(bytes: impl AsRef<[u8]>) -> Result<JsonValue> {
    let bytes = bytes.as_ref();
    let mut builder = TreeBuilder::new();
    let mut offset = 0;
    loop {
        match builder.step(&bytes[offset..], true)? {
            Step::Consumed(n) => offset += n,
            Step::NeedMore => break,
        }
    }
    builder.finish()
}

/// Parse a document incrementally from a byte source.
///
/// Each iteration pulls one chunk, appends it to any bytes retained from the
/// previous iteration, and runs the builder as far as the available bytes
/// permit. A token cut off by a chunk boundary (an open string, a numeric
/// run touching the buffer's end, a literal prefix) is retained and
/// rescanned with the next chunk appended.
///
/// Fails with [`JsonError::UnterminatedToken`] when the source completes
/// mid-token, [`JsonError::MalformedSyntax`] when it completes with open
/// containers, and [`JsonError::Cancelled`] when the token is signalled —
/// partial state is discarded, and the source is left open either way.
pub fn parse_streaming<S: ByteSource>(source: &mut S, cancel: &CancelToken) -> Result<JsonValue> {
    let mut builder = TreeBuilder::new();
    let mut carry: Vec<u8> = Vec::new();
    let mut done = false;

    while !done {
        if cancel.is_cancelled() {
            return Err(JsonError::Cancelled);
        }

        let chunk = source.pull()?;
        done = chunk.done;
        if carry.is_empty() {
            carry = chunk.bytes;
        } else {
            carry.extend_from_slice(&chunk.bytes);
        }

        let mut offset = 0;
        loop {
            match builder.step(&carry[offset..], done)? {
                Step::Consumed(n) => offset += n,
                Step::NeedMore => break,
            }
        }
        carry.drain(..offset);
    }

    builder.finish()
}
