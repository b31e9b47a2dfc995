use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dnahmm_core::algorithms::{decode, log_likelihood};
use dnahmm_core::config::AnalyzerConfig;
use dnahmm_core::model::presets;
use dnahmm_core::DnaHmmAnalyzer;

use criterion_config::{configure_criterion, sample_size_for};

const SEQUENCE_LENGTHS: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// Deterministic pseudo-random DNA with alternating GC-rich and AT-rich stretches.
fn synthetic_sequence(length: usize) -> Vec<u8> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    (0..length)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let gc_rich = (i / 500) % 2 == 0;
            match (state % 10, gc_rich) {
                (0..=6, true) => if state & 1 == 0 { b'G' } else { b'C' },
                (0..=6, false) => if state & 1 == 0 { b'A' } else { b'T' },
                (_, true) => if state & 1 == 0 { b'A' } else { b'T' },
                (_, false) => if state & 1 == 0 { b'G' } else { b'C' },
            }
        })
        .collect()
}

fn bench_decode(c: &mut Criterion) {
    let model = presets::gc_content().expect("preset model");
    let mut group = c.benchmark_group("viterbi_decode");

    for &length in &SEQUENCE_LENGTHS {
        let sequence = synthetic_sequence(length);
        group.throughput(Throughput::Bytes(length as u64));
        group.sample_size(sample_size_for(length));
        group.bench_with_input(BenchmarkId::from_parameter(length), &sequence, |b, seq| {
            b.iter(|| decode(black_box(&model), black_box(seq)).expect("decode"))
        });
    }

    group.finish();
}

fn bench_forward(c: &mut Criterion) {
    let model = presets::gc_content().expect("preset model");
    let mut group = c.benchmark_group("forward_log_likelihood");

    for &length in &SEQUENCE_LENGTHS {
        let sequence = synthetic_sequence(length);
        group.throughput(Throughput::Bytes(length as u64));
        group.sample_size(sample_size_for(length));
        group.bench_with_input(BenchmarkId::from_parameter(length), &sequence, |b, seq| {
            b.iter(|| log_likelihood(black_box(&model), black_box(seq)).expect("forward"))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let sequences: Vec<String> = (0..64)
        .map(|i| String::from_utf8_lossy(&synthetic_sequence(5_000 + i * 100)).into_owned())
        .collect();
    let mut group = c.benchmark_group("analyze_batch");

    for threads in [1, 2, 4] {
        let config = AnalyzerConfig {
            num_threads: Some(threads),
            quiet: true,
            ..Default::default()
        };
        let analyzer = DnaHmmAnalyzer::new(presets::gc_content().expect("preset model"), config)
            .expect("analyzer");
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &sequences,
            |b, seqs| b.iter(|| analyzer.analyze_batch(black_box(seqs))),
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_decode, bench_forward, bench_batch
}
criterion_main!(benches);
