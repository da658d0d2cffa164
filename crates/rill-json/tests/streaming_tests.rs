use rill_json::{
    parse, parse_streaming, ByteSource, CancelToken, Chunk, ChunkSource, JsonError, ReaderSource,
};
use std::io::Cursor;

fn chunked(parts: &[&str]) -> ChunkSource {
    ChunkSource::new(parts.iter().map(|p| p.as_bytes().to_vec()))
}

// ============================================================================
// Chunk-Boundary Handling
// ============================================================================

#[test]
fn split_mid_structure() {
    let mut source = chunked(&[r#"{"prop1":"#, r#""test"}"#]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(doc.get("prop1").unwrap().as_str().unwrap(), "test");
}

#[test]
fn split_mid_string() {
    let mut source = chunked(&["[\"te", "st\"]"]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(doc.as_array().unwrap()[0].as_str().unwrap(), "test");
}

#[test]
fn split_mid_escape_sequence() {
    let mut source = chunked(&["[\"a\\", "\"b\"]"]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(doc.as_array().unwrap()[0].as_str().unwrap(), "a\\\"b");
}

#[test]
fn split_mid_literal() {
    let mut source = chunked(&["[nu", "ll]"]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert!(doc.as_array().unwrap()[0].is_null());
}

#[test]
fn split_mid_number() {
    let mut source = chunked(&["[12", "34, 5.", "5]"]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    let items = doc.as_array().unwrap();
    assert_eq!(items[0].as_integer().unwrap(), 1234);
    assert_eq!(items[1].as_double().unwrap(), 5.5);
}

#[test]
fn byte_at_a_time_equals_buffered_parse() {
    let text =
        r#"{"obj1":{"name":"test","int":2,"float":1.234},"arr":[-1,0,1,2,3],"missing":null}"#;
    let mut source = ChunkSource::new(text.bytes().map(|b| vec![b]));
    let streamed = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(streamed, parse(text).unwrap());
}

#[test]
fn empty_interleaved_chunks_are_harmless() {
    let mut source = chunked(&["", "[1,", "", "2]", ""]);
    let doc = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(doc.as_array().unwrap().len(), 2);
}

// ============================================================================
// Reader Sources
// ============================================================================

#[test]
fn reader_source_parses_multi_pull_documents() {
    // Well past one 4096-byte pull.
    let mut text = String::from("[");
    for i in 0..4000 {
        if i > 0 {
            text.push(',');
        }
        text.push_str(&i.to_string());
    }
    text.push(']');

    let mut source = ReaderSource::new(Cursor::new(text.clone().into_bytes()));
    let streamed = parse_streaming(&mut source, &CancelToken::new()).unwrap();
    assert_eq!(streamed, parse(&text).unwrap());
    assert_eq!(streamed.as_array().unwrap().len(), 4000);
}

// ============================================================================
// Truncated Sources
// ============================================================================

#[test]
fn source_ending_mid_string_fails_unterminated() {
    let mut source = chunked(&["[\"abc"]);
    let err = parse_streaming(&mut source, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, JsonError::UnterminatedToken { .. }), "{err}");
}

#[test]
fn source_ending_mid_literal_fails_unterminated() {
    let mut source = chunked(&["[tr"]);
    let err = parse_streaming(&mut source, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, JsonError::UnterminatedToken { .. }), "{err}");
}

#[test]
fn source_ending_with_open_container_fails() {
    let mut source = chunked(&[r#"{"a":1"#]);
    let err = parse_streaming(&mut source, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, JsonError::MalformedSyntax { .. }), "{err}");
}

#[test]
fn empty_source_fails() {
    let mut source = ChunkSource::new(Vec::<Vec<u8>>::new());
    let err = parse_streaming(&mut source, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, JsonError::MalformedSyntax { .. }), "{err}");
}

// ============================================================================
// Cancellation
// ============================================================================

/// Counts pulls so tests can assert the loop never touched the source.
struct CountingSource {
    inner: ChunkSource,
    pulls: usize,
}

impl ByteSource for CountingSource {
    fn pull(&mut self) -> std::io::Result<Chunk> {
        self.pulls += 1;
        self.inner.pull()
    }
}

#[test]
fn pre_cancelled_parse_never_pulls() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut source = CountingSource {
        inner: chunked(&["[1]"]),
        pulls: 0,
    };
    let err = parse_streaming(&mut source, &cancel).unwrap_err();
    assert!(matches!(err, JsonError::Cancelled));
    assert_eq!(source.pulls, 0);
}

/// Cancels its shared token after the first pull, simulating a caller
/// aborting a parse that is already underway.
struct CancelAfterFirstPull {
    inner: ChunkSource,
    cancel: CancelToken,
}

impl ByteSource for CancelAfterFirstPull {
    fn pull(&mut self) -> std::io::Result<Chunk> {
        self.cancel.cancel();
        self.inner.pull()
    }
}

#[test]
fn cancellation_mid_parse_aborts() {
    let cancel = CancelToken::new();
    let mut source = CancelAfterFirstPull {
        inner: chunked(&["[1,", "2,", "3]"]),
        cancel: cancel.clone(),
    };
    let err = parse_streaming(&mut source, &cancel).unwrap_err();
    assert!(matches!(err, JsonError::Cancelled));
}

#[test]
fn source_io_error_propagates() {
    struct FailingSource;
    impl ByteSource for FailingSource {
        fn pull(&mut self) -> std::io::Result<Chunk> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
    }
    let err = parse_streaming(&mut FailingSource, &CancelToken::new()).unwrap_err();
    assert!(matches!(err, JsonError::Io(_)), "{err}");
}
