use criterion::{criterion_group, criterion_main};

mod terminal;

criterion_group!(
    benches,
    terminal::session::bench_dispatch,
    terminal::session::bench_base64,
    terminal::session::bench_recall,
    terminal::session::bench_persistent_toggle
);
criterion_main!(benches);
