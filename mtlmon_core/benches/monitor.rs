use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mtlmon_core::*;

#[inline(always)]
fn pattern(len: i64) -> Vec<(Time, char)> {
    (0..len)
        .map(|t| (t / 2, if t % 5 == 0 { 'b' } else { 'a' }))
        .collect()
}

#[inline(always)]
fn until(end: u32) -> Formula<char> {
    Formula::until(Formula::atom('a'), Formula::atom('b'), Interval::new(0, end))
}

#[inline(always)]
fn nested(end: u32) -> Formula<char> {
    Formula::or(
        Formula::since(
            Formula::not(Formula::atom('b')),
            Formula::atom('a'),
            Interval::new(1, end),
        ),
        Formula::next(
            Formula::previous(Formula::atom('a'), Interval::new(0, end)),
            Interval::new(0, end),
        ),
    )
}

fn monitor_benchmark(c: &mut Criterion) {
    let pattern = pattern(1000);
    for end in [1, 4, 16] {
        c.bench_with_input(BenchmarkId::new("until", end), &end, |b, &end| {
            let mut monitor = Monitor::new(until(end));
            b.iter(|| monitor.run(pattern.iter().copied()).expect("run"))
        });
        c.bench_with_input(BenchmarkId::new("nested", end), &end, |b, &end| {
            let mut monitor = Monitor::new(nested(end));
            b.iter(|| monitor.run(pattern.iter().copied()).expect("run"))
        });
    }
}

criterion_group!(benches, monitor_benchmark);
criterion_main!(benches);
