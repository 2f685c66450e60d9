use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use editor_core_wrap::{
    LineBreakData, MonospaceLineBreaksComputerFactory, WrapLayout, WrappingIndent, WrappingParams,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "(wrap)", "line-breaks", "你好世界",
    "\t", "computer", "猫", "benchmark,", "column.",
];

fn random_lines(line_count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..line_count)
        .map(|_| {
            let words = rng.gen_range(4..40);
            (0..words)
                .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn params(column: usize) -> WrappingParams {
    WrappingParams::new(4, Some(column)).with_wrapping_indent(WrappingIndent::Same)
}

fn compute_all(
    factory: &MonospaceLineBreaksComputerFactory,
    lines: &[String],
    previous: Vec<Option<LineBreakData>>,
    column: usize,
) -> Vec<Option<LineBreakData>> {
    let mut computer = factory.create_line_breaks_computer(params(column));
    for (line, previous) in lines.iter().zip(previous) {
        computer.add_request(line.as_str(), None, previous);
    }
    computer.finalize()
}

fn bench_fresh_batch(c: &mut Criterion) {
    let factory = MonospaceLineBreaksComputerFactory::default();
    let lines = random_lines(10_000);
    c.bench_function("fresh_batch/10k_lines", |b| {
        b.iter(|| {
            let results = compute_all(&factory, black_box(&lines), vec![None; lines.len()], 80);
            black_box(results.len());
        })
    });
}

fn bench_incremental_rewrap(c: &mut Criterion) {
    let factory = MonospaceLineBreaksComputerFactory::default();
    let lines = random_lines(10_000);
    let wrapped = compute_all(&factory, &lines, vec![None; lines.len()], 80);

    c.bench_function("incremental_rewrap/10k_lines_80_to_72", |b| {
        b.iter_batched(
            || wrapped.clone(),
            |previous| {
                let results = compute_all(&factory, black_box(&lines), previous, 72);
                black_box(results.len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_layout_resize(c: &mut Criterion) {
    let text = random_lines(10_000).join("\n");
    c.bench_function("layout_resize/10k_lines", |b| {
        b.iter_batched(
            || WrapLayout::from_text(MonospaceLineBreaksComputerFactory::default(), params(100), &text),
            |mut layout| {
                for column in [96, 90, 84, 80] {
                    layout.set_wrapping_column(Some(column));
                }
                black_box(layout.visual_line_count());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_fresh_batch,
    bench_incremental_rewrap,
    bench_layout_resize
);
criterion_main!(benches);
