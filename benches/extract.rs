//! Benchmarks for gazette rate extraction

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dof_fx::dof::{DofRowExtractor, RateExtract};

/// Build a month page the size and shape of the real publication
fn month_page() -> String {
    let mut page = String::from("<html><body><table class=\"Tabla_borde\">");
    page.push_str("<tr><th>Fecha</th><th>Valor</th></tr>");
    for day in 1..=31 {
        page.push_str(&format!(
            "<tr>\n  <td class=\"txt_azul\">{day:02}/10/2025</td>\n  <td>18.{:04}</td>\n</tr>",
            1000 + day
        ));
    }
    page.push_str("</table></body></html>");
    page
}

fn benchmark_extract_hit(c: &mut Criterion) {
    let extractor = DofRowExtractor::new();
    let page = month_page();
    let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();

    c.bench_function("extract_mid_month", |b| {
        b.iter(|| extractor.extract(black_box(&page), black_box(date)))
    });
}

fn benchmark_extract_miss(c: &mut Criterion) {
    let extractor = DofRowExtractor::new();
    let page = month_page();
    let date = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();

    c.bench_function("extract_missing_date", |b| {
        b.iter(|| extractor.extract(black_box(&page), black_box(date)))
    });
}

criterion_group!(benches, benchmark_extract_hit, benchmark_extract_miss);
criterion_main!(benches);
