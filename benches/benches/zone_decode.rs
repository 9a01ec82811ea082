//! Benchmark suite for ZEL zone decoding
//!
//! This benchmark measures whole-frame decode throughput across container
//! sizes and zone compression types, and opening/validation cost
//! separately from decode.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use zel_benches::{generate_test_zel_data, sizes};
use zel_types::context::Context;
use zel_types::header::CompressionType;

fn bench_decode_index8(c: &mut Criterion) {
	let mut group = c.benchmark_group("zone_decode_index8");

	for (name, (width, height)) in
		[("tiny", sizes::TINY), ("small", sizes::SMALL), ("medium", sizes::MEDIUM)]
	{
		for compression in [CompressionType::None, CompressionType::Lz4] {
			let data = generate_test_zel_data(width, height, 1, compression);
			let ctx = Context::open_memory(&data).unwrap();
			let mut dst = vec![0u8; width as usize * height as usize];

			let pixels = width as u64 * height as u64;
			group.throughput(Throughput::Elements(pixels));
			group.bench_with_input(
				BenchmarkId::new(format!("{name}_{compression:?}"), pixels),
				&ctx,
				|b, ctx| {
					b.iter(|| {
						ctx.decode_frame_index8(0, black_box(&mut dst), width as usize).unwrap();
					});
				},
			);
		}
	}

	group.finish();
}

fn bench_decode_rgb565(c: &mut Criterion) {
	let mut group = c.benchmark_group("zone_decode_rgb565");

	for (name, (width, height)) in [("tiny", sizes::TINY), ("small", sizes::SMALL)] {
		let data = generate_test_zel_data(width, height, 1, CompressionType::None);
		let ctx = Context::open_memory(&data).unwrap();
		let mut dst = vec![0u16; width as usize * height as usize];

		let pixels = width as u64 * height as u64;
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new(name, pixels), &ctx, |b, ctx| {
			b.iter(|| {
				ctx.decode_frame_rgb565(0, black_box(&mut dst), width as usize).unwrap();
			});
		});
	}

	group.finish();
}

fn bench_single_zone_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("zone_decode_single_zone");

	let data = generate_test_zel_data(sizes::MEDIUM.0, sizes::MEDIUM.1, 1, CompressionType::None);
	let ctx = Context::open_memory(&data).unwrap();
	let mut dst = vec![0u8; 16 * 16];

	group.throughput(Throughput::Elements(1));
	group.bench_function("one_zone_of_many", |b| {
		b.iter(|| {
			ctx.decode_frame_index8_zone(0, black_box(0), &mut dst).unwrap();
		});
	});

	group.finish();
}

fn bench_context_open(c: &mut Criterion) {
	let mut group = c.benchmark_group("zone_decode_open");

	for (name, (width, height)) in [("tiny", sizes::TINY), ("medium", sizes::MEDIUM)] {
		let data = generate_test_zel_data(width, height, 4, CompressionType::None);
		group.bench_function(name, |b| {
			b.iter(|| {
				let ctx = Context::open_memory(black_box(&data)).unwrap();
				black_box(ctx)
			});
		});
	}

	group.finish();
}

criterion_group!(
	benches,
	bench_decode_index8,
	bench_decode_rgb565,
	bench_single_zone_decode,
	bench_context_open,
);

criterion_main!(benches);
