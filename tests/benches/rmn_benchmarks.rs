//! # RMN Remote Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | report digest | < 50µs |
//! | verify, f+1 signatures | < 1ms per signature |
//! | is_cursed | O(1) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rmn_remote::{report_digest, InMemoryEventLog, Rmn, RmnRemoteApi, Subject};
use rmn_tests::integration::support::{configured_remote, context, roots, Committee, OFFRAMP, OWNER};
use std::sync::Arc;
use std::time::Duration;

const REMOTE: [u8; 20] = [0xA1; 20];
const CONFIG_DIGEST: [u8; 32] = [0x55; 32];

fn bench_report_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("rmn-report-digest");
    let ctx = context(REMOTE, OFFRAMP, CONFIG_DIGEST);

    for count in [1usize, 10, 50] {
        let roots = roots(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("roots", count), &roots, |b, roots| {
            b.iter(|| black_box(report_digest(&ctx, roots)))
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("rmn-verify");
    group.measurement_time(Duration::from_secs(10));

    for f in [1u64, 5, 10] {
        let committee = Committee::new((2 * f + 1) as usize);
        let remote = configured_remote(
            REMOTE,
            &committee,
            f,
            CONFIG_DIGEST,
            Arc::new(InMemoryEventLog::new()),
        )
        .expect("configured remote");
        let roots = roots(4);
        let signatures = committee.sign(
            &context(REMOTE, OFFRAMP, CONFIG_DIGEST),
            &roots,
            (f + 1) as usize,
        );

        group.throughput(Throughput::Elements(f + 1));
        group.bench_with_input(BenchmarkId::new("quorum", f + 1), &signatures, |b, sigs| {
            b.iter(|| black_box(remote.verify(OFFRAMP, &roots, sigs).is_ok()))
        });
    }
    group.finish();
}

fn bench_is_cursed(c: &mut Criterion) {
    let mut group = c.benchmark_group("rmn-curses");
    let committee = Committee::new(3);
    let remote = configured_remote(
        REMOTE,
        &committee,
        1,
        CONFIG_DIGEST,
        Arc::new(InMemoryEventLog::new()),
    )
    .expect("configured remote");

    let subjects: Vec<Subject> = (1..=1000).map(Subject::from_chain_selector).collect();
    remote.curse_many(OWNER, &subjects).expect("curse succeeds");

    let probe = Subject::from_chain_selector(5000);
    group.bench_function("is_cursed_1000", |b| {
        b.iter(|| black_box(remote.is_cursed(&probe)))
    });
    group.finish();
}

criterion_group!(benches, bench_report_digest, bench_verify, bench_is_cursed);
criterion_main!(benches);
