use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricequote::{calculate, options_for, PriceBook, PriceListReader};

fn price_list(rows: usize) -> String {
    let mut text = String::from("Size;Series;Material;Seat;Price;PriceCAD;Note\n");
    for i in 0..rows {
        let series = if i % 10 == 0 { "Cyl" } else { "V100" };
        text.push_str(&format!(
            "{};{};M{};\"Seat {}\";{},{:02};{};\n",
            i % 40,
            series,
            i % 7,
            i % 5,
            100 + i,
            i % 100,
            135 + i
        ));
    }
    text
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1000, 10000].iter() {
        let text = price_list(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let rows = PriceListReader::from_text(text.as_str()).rows();
                black_box(rows);
            });
        });
    }

    group.finish();
}

fn benchmark_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("index");

    for size in [100, 1000, 10000].iter() {
        let rows = PriceListReader::from_text(price_list(*size)).rows();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let book = PriceBook::from_rows(rows.clone());
                black_box(options_for(book.main_rows(), "Size", &[]));
            });
        });
    }

    group.finish();
}

fn benchmark_calculate(c: &mut Criterion) {
    c.bench_function("calculate", |b| {
        b.iter(|| {
            let quote = calculate(
                black_box("1234.56"),
                black_box("85.00"),
                black_box("TierC"),
                black_box(&["5.25", "-1.10", ""]),
            );
            black_box(quote)
        });
    });
}

criterion_group!(benches, benchmark_parse, benchmark_index, benchmark_calculate);
criterion_main!(benches);
