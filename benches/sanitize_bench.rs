//! Benchmarks for the text sanitizing functions.
//!
//! Each operation runs over clean and dirty inputs at several sizes:
//!
//! - **Clean**: valid UTF-8 mixing ASCII, accented Latin, CJK and emoji
//! - **Dirty**: the same text with stray Latin-1 bytes and control characters
//! - **Escaped**: ASCII text dense with `\uXXXX` escapes
//! - **Entities**: text with `&nbsp;` entities and U+00A0 characters
//! - **Noisy**: clean text with about 2% of bytes overwritten at random

use charsan::{
    cleanup_utf8, decode_hex_code_points, decode_non_breaking_spaces, is_utf8, remove_accents,
    strip_invalid_utf8,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SIZES: [usize; 4] = [1024, 10 * 1024, 100 * 1024, 1024 * 1024];

/// Repeat `pattern` until `size` bytes, padding the tail with `pad`.
fn fill(pattern: &[u8], size: usize, pad: u8) -> Vec<u8> {
    let mut result = Vec::with_capacity(size);
    while result.len() + pattern.len() <= size {
        result.extend_from_slice(pattern);
    }
    result.resize(size, pad);
    result
}

fn generate_clean(size: usize) -> Vec<u8> {
    let pattern = "Crème brûlée at the Straße café, Łódź. 日本語 テキスト 🎉 plain ASCII follows.\n";
    fill(pattern.as_bytes(), size, b'a')
}

fn generate_dirty(size: usize) -> Vec<u8> {
    // Latin-1 é and ü without continuation bytes, a lone continuation byte,
    // controls and a truncated 3-byte sequence
    let pattern = b"Clich\xE9 caf\xE9 \xFCber\x01 \x80stray \x1B[0m \xE6\x97 tail text\n";
    fill(pattern, size, b'd')
}

fn generate_noisy(size: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut data = generate_clean(size);
    for _ in 0..size / 50 {
        let pos = rng.gen_range(0..data.len());
        data[pos] = rng.gen();
    }
    data
}

fn generate_escaped(size: usize) -> Vec<u8> {
    let pattern = b"Gr\\u00fc\\u00df Gott, na\\u00efve \\u20ac 5, \\ud83c\\udf89 \\u00411 done\n";
    fill(pattern, size, b'e')
}

fn generate_entities(size: usize) -> Vec<u8> {
    let pattern = "1&nbsp;000\u{A0}€ and&nbsp;more text&nbsp;with\u{A0}spacing\n";
    fill(pattern.as_bytes(), size, b'n')
}

fn bench_group<F>(c: &mut Criterion, name: &str, generate: fn(usize) -> Vec<u8>, op: F)
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    let mut group = c.benchmark_group(name);
    for size in SIZES {
        let data = generate(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format_size(size)),
            &data,
            |b, data| {
                b.iter(|| op(black_box(data)));
            },
        );
    }
    group.finish();
}

fn bench_is_utf8(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_utf8");
    for size in SIZES {
        let data = generate_clean(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format_size(size)),
            &data,
            |b, data| {
                b.iter(|| is_utf8(black_box(data)));
            },
        );
    }
    group.finish();
}

fn bench_cleanup(c: &mut Criterion) {
    bench_group(c, "cleanup_utf8_clean", generate_clean, cleanup_utf8);
    bench_group(c, "cleanup_utf8_dirty", generate_dirty, cleanup_utf8);
    bench_group(c, "cleanup_utf8_noisy", generate_noisy, cleanup_utf8);
}

fn bench_strip(c: &mut Criterion) {
    bench_group(c, "strip_invalid_utf8_clean", generate_clean, strip_invalid_utf8);
    bench_group(c, "strip_invalid_utf8_dirty", generate_dirty, strip_invalid_utf8);
    bench_group(c, "strip_invalid_utf8_noisy", generate_noisy, strip_invalid_utf8);
}

fn bench_decode(c: &mut Criterion) {
    for encoding in ["UCS-2BE", "UTF-16BE", "Windows-1252"] {
        let name = format!("decode_hex_{}", encoding.to_lowercase());
        bench_group(c, &name, generate_escaped, |data| {
            decode_hex_code_points(data, encoding).unwrap_or_default()
        });
    }
}

fn bench_nbsp(c: &mut Criterion) {
    bench_group(c, "decode_nbsp", generate_entities, decode_non_breaking_spaces);
}

fn bench_accents(c: &mut Criterion) {
    bench_group(c, "remove_accents", generate_clean, remove_accents);
}

fn format_size(size: usize) -> String {
    if size >= 1024 * 1024 {
        format!("{}mb", size / (1024 * 1024))
    } else if size >= 1024 {
        format!("{}kb", size / 1024)
    } else {
        format!("{}b", size)
    }
}

criterion_group!(
    benches,
    bench_is_utf8,
    bench_cleanup,
    bench_strip,
    bench_decode,
    bench_nbsp,
    bench_accents
);
criterion_main!(benches);
