mod expressions_chainparse;
mod expressions_nom;

use chainparse::LOG_TARGET;
use criterion::{black_box, criterion_group, Criterion};
use expressions_chainparse::{memoized_parser, plain_parser};
use expressions_nom::nom_parser;
use log::trace;

const SHALLOW: &str = "    (1*7 + 1 + (2*3+\t4/2))  ";

const DEEP: &str = "((((1 + 2) * (3 + 4)) - ((5 * 6) / (7 - 8))) \
    * (((9 + 10) * 11) - (12 / (13 + 14)))) \
    + (1 * (2 * (3 * (4 * (5 * (6 * (7 * (8 + 9))))))))";

pub fn bench_nom(c: &mut Criterion) {
    c.bench_function("expressions_nom_shallow", |b| b.iter(|| nom_parser(black_box(SHALLOW))));
    c.bench_function("expressions_nom_deep", |b| b.iter(|| nom_parser(black_box(DEEP))));
}

pub fn bench_memoized(c: &mut Criterion) {
    assert_eq!(memoized_parser(SHALLOW), nom_parser(SHALLOW));
    assert_eq!(memoized_parser(DEEP), nom_parser(DEEP));
    c.bench_function("expressions_memoized_shallow", |b| {
        b.iter(|| memoized_parser(black_box(SHALLOW)))
    });
    c.bench_function("expressions_memoized_deep", |b| {
        b.iter(|| memoized_parser(black_box(DEEP)))
    });
}

pub fn bench_plain(c: &mut Criterion) {
    assert_eq!(plain_parser(SHALLOW), nom_parser(SHALLOW));
    c.bench_function("expressions_plain_shallow", |b| {
        b.iter(|| plain_parser(black_box(SHALLOW)))
    });
    c.bench_function("expressions_plain_deep", |b| {
        b.iter(|| plain_parser(black_box(DEEP)))
    });
}

criterion_group!(benches, bench_nom, bench_memoized, bench_plain);

fn main() {
    env_logger::init();
    trace!(target: LOG_TARGET, "Logging enabled");
    benches();
    Criterion::default().configure_from_args().final_summary();
}
