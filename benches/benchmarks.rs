//! Benchmarks for indexing and pagination

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use markup_pager::{
    Document, Fragment, MeasuredSurface, Paginator, PaginatorConfig, PositionIndex,
};

fn book(chapters: usize) -> String {
    let mut markup = String::new();
    for i in 0..chapters {
        markup.push_str(&format!("<h2 id=\"ch{}\">Chapter {}</h2>", i, i));
        for j in 0..20 {
            markup.push_str(&format!(
                "<p>Paragraph {} contains <em>enough</em> text to span multiple lines and test the \
                 line breaking algorithm, with a <a href=\"#ch{}\">link</a> thrown in.</p>",
                j, i
            ));
        }
    }
    markup
}

fn bench_parse(c: &mut Criterion) {
    let markup = book(10);
    c.bench_function("parse_document", |b| {
        b.iter(|| {
            black_box(Document::parse(black_box(&markup)).unwrap());
        });
    });
}

fn bench_build_index(c: &mut Criterion) {
    let document = Document::parse(&book(10)).unwrap();
    c.bench_function("build_position_index", |b| {
        b.iter(|| {
            black_box(PositionIndex::build(&document).unwrap());
        });
    });
}

fn bench_extract_fragment(c: &mut Criterion) {
    let document = Document::parse(&book(10)).unwrap();
    let index = PositionIndex::build(&document).unwrap();
    let mid = index.max_position() / 2;

    c.bench_function("extract_fragment", |b| {
        b.iter(|| {
            black_box(Fragment::extract(&document, &index, mid..mid + 2000));
        });
    });
}

fn bench_first_page(c: &mut Criterion) {
    let markup = book(10);
    c.bench_function("first_page", |b| {
        b.iter(|| {
            let mut paginator = Paginator::from_markup(
                &markup,
                MeasuredSurface::default(),
                PaginatorConfig::default(),
            )
            .unwrap();
            black_box(paginator.get_page(1));
        });
    });
}

fn bench_paginate_all(c: &mut Criterion) {
    let markup = book(10);
    c.bench_function("paginate_all", |b| {
        b.iter(|| {
            let mut paginator = Paginator::from_markup(
                &markup,
                MeasuredSurface::default(),
                PaginatorConfig::default(),
            )
            .unwrap();
            black_box(paginator.paginate_all());
        });
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_build_index,
    bench_extract_fragment,
    bench_first_page,
    bench_paginate_all,
);

criterion_main!(benches);
