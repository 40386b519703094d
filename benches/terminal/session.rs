use criterion::{BatchSize, Criterion, Throughput};
use rand::Rng;
use std::hint::black_box;
use termsite::settings::{MemorySettings, PersistentSettings};
use termsite::storage::RamStorage;
use termsite::terminal::{BufferSurface, Key, Platform, Session};

#[derive(Default)]
struct SilentPlatform;

impl Platform for SilentPlatform {
    fn beep(&mut self) {}

    fn now_millis(&self) -> u64 {
        1_700_000_000_000
    }
}

fn session() -> Session<BufferSurface, MemorySettings, SilentPlatform> {
    Session::new(BufferSurface::new(), MemorySettings::new(), SilentPlatform)
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for line in ["HELP", "INFO", "FOO bar"] {
        group.bench_function(line, |b| {
            b.iter_batched_ref(
                session,
                |session| {
                    black_box(session.submit(line));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

pub fn bench_base64(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let text: String = (0..256)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    let line = format!("BASE64 ENCODE {}", text);

    let mut group = c.benchmark_group("base64");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("encode", |b| {
        b.iter_batched_ref(
            session,
            |session| {
                black_box(session.submit(&line));
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

pub fn bench_recall(c: &mut Criterion) {
    let mut session = session();
    for i in 0..100 {
        session.submit(&format!("LINE{}", i));
    }

    c.bench_function("recall_previous", |b| {
        b.iter(|| {
            black_box(session.handle_key(Key::ArrowUp));
        });
    });
}

pub fn bench_persistent_toggle(c: &mut Criterion) {
    c.bench_function("audio_toggle_persisted", |b| {
        b.iter_batched_ref(
            || {
                Session::new(
                    BufferSurface::new(),
                    PersistentSettings::open(RamStorage::<1024>::new()),
                    SilentPlatform,
                )
            },
            |session| {
                black_box(session.submit("AUDIO DISABLE"));
                black_box(session.submit("AUDIO ENABLE"));
            },
            BatchSize::SmallInput,
        );
    });
}
