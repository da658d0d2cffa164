use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use rill_json::{parse, parse_streaming, CancelToken, ChunkSource};

fn nested_fixture() -> String {
    r#"{"obj1":{"name":"test","int":2,"float":1.234},"arr":[-1,0,1,2,3],"missing":null}"#
        .to_string()
}

fn wide_fixture(items: usize) -> String {
    let mut text = String::from("[");
    for i in 0..items {
        if i > 0 {
            text.push(',');
        }
        text.push_str(&format!(r#"{{"id":{i},"score":{i}.5,"ok":true}}"#));
    }
    text.push(']');
    text
}

fn bench_parse(c: &mut Criterion) {
    let nested = nested_fixture();
    let wide = wide_fixture(500);

    c.bench_function("parse_nested", |b| {
        b.iter(|| parse(black_box(&nested)).unwrap())
    });

    c.bench_function("parse_wide_500", |b| {
        b.iter(|| parse(black_box(&wide)).unwrap())
    });

    c.bench_function("parse_streaming_64b_chunks", |b| {
        b.iter(|| {
            let chunks: Vec<Vec<u8>> = wide.as_bytes().chunks(64).map(|c| c.to_vec()).collect();
            let mut source = ChunkSource::new(chunks);
            parse_streaming(&mut source, &CancelToken::new()).unwrap()
        })
    });
}

fn bench_emit(c: &mut Criterion) {
    let doc = parse(wide_fixture(500)).unwrap();

    c.bench_function("emit_compact_wide_500", |b| {
        b.iter(|| black_box(&doc).to_text(false))
    });

    c.bench_function("emit_pretty_wide_500", |b| {
        b.iter(|| black_box(&doc).to_text(true))
    });
}

criterion_group!(benches, bench_parse, bench_emit);
criterion_main!(benches);
