use criterion::{Criterion, criterion_group, criterion_main};
use opticif_engine::{BlockScanner, ScanMode, lines::split_lines};
mod common;

fn bench_scan_automata(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    group.sample_size(10);

    for count in [100, 1000] {
        let names = common::plant_names(count);
        let lines = split_lines(&common::generate_automata(&names));
        let scanner =
            BlockScanner::for_mode(ScanMode::Automaton, names.iter().map(String::as_str)).unwrap();

        group.bench_function(format!("automata_{count}"), |b| {
            b.iter(|| {
                let out = scanner.scan(std::hint::black_box(&lines)).unwrap();
                std::hint::black_box(out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scan_automata);
criterion_main!(benches);
