//! # rill-json
//!
//! A JSON document model with an incremental, chunk-driven parser and a
//! pluggable, type-keyed serializer registry.
//!
//! The parser assembles a tree from byte fragments that may arrive in
//! arbitrary, non-token-aligned sizes (e.g. off a network stream), using an
//! explicit container stack instead of recursive descent. Numeric literals
//! are classified integer-vs-double by an epsilon rule, and string payloads
//! keep their source escape sequences verbatim, so emitted text stays
//! byte-compatible with the wire format this crate interoperates with.
//!
//! ## Quick start
//!
//! ```rust
//! use rill_json::parse;
//!
//! let doc = parse(r#"{"name":"Alice","scores":[95,87,92]}"#).unwrap();
//! assert_eq!(doc.get("name").unwrap().as_str().unwrap(), "Alice");
//! assert_eq!(doc.to_text(false), r#"{"name":"Alice","scores":[95,87,92]}"#);
//! ```
//!
//! Streaming, from any chunked source:
//!
//! ```rust
//! use rill_json::{parse_streaming, CancelToken, ChunkSource};
//!
//! let mut source = ChunkSource::new(vec![
//!     br#"{"prop1":"#.to_vec(),
//!     br#""test"}"#.to_vec(),
//! ]);
//! let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
//! assert_eq!(doc.get("prop1").unwrap().as_str().unwrap(), "test");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the document sum type, accessors, and the two emitters
//! - [`parser`] — buffered and streaming parse loops, [`ByteSource`],
//!   [`CancelToken`]
//! - [`registry`] — type-keyed serializer registry for typed round trips
//! - [`error`] — the failure taxonomy

pub mod error;
pub mod parser;
pub mod registry;
pub mod value;

mod builder;
mod tokenizer;

pub use error::{JsonError, Result};
pub use parser::{parse, parse_streaming, ByteSource, CancelToken, Chunk, ChunkSource, ReaderSource};
pub use registry::{JsonSerializer, SerializerRegistry};
pub use value::{JsonProperty, JsonValue};
