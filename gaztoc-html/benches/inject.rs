#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::{fmt::Write, hint::black_box};

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gaztoc_html::{RunOptions, process_source, slugify};

const PAGE_SMALL: &str = r"<h1>Deploying the site</h1>
<p>This page describes how the site is deployed.</p>
<h2>1. Prerequisites</h2>
<p>You need an FTP account.</p>
<h2>2. Configuration</h2>
<h3>Environments</h3>
<p>dev, staging and prod.</p>
<h3>Credentials</h3>
<h4>Storing passwords</h4>
<p>Never commit them.</p>
<h2>3. Running the deploy</h2>
";

/// A long generated page with many sections and repeated titles, which
/// exercises id collision handling.
fn page_large() -> String {
  let mut page = String::from("<h1>Reference</h1>\n");
  for section in 0..60 {
    let _ = writeln!(page, "<h2>Section {section}</h2>\n<p>Intro text.</p>");
    for sub in 0..4 {
      let _ = writeln!(
        page,
        "<h3>Overview</h3>\n<p>Sub {sub}.</p>\n<h4>Example <code>x_{sub}</code></h4>"
      );
    }
  }
  page
}

fn bench_inject(c: &mut Criterion) {
  let mut group = c.benchmark_group("inject");
  let options = RunOptions::default();
  let large = page_large();

  for (name, page) in [("small", PAGE_SMALL), ("large", large.as_str())] {
    group.bench_with_input(BenchmarkId::from_parameter(name), page, |b, page| {
      b.iter(|| process_source(black_box(page), &options));
    });
  }
  group.finish();
}

fn bench_strip(c: &mut Criterion) {
  let options = RunOptions::default();
  let (_, injected) = process_source(&page_large(), &options);
  let injected = injected.unwrap();
  let strip = RunOptions {
    strip: true,
    ..RunOptions::default()
  };

  c.bench_function("strip/large", |b| {
    b.iter(|| process_source(black_box(&injected), &strip));
  });
}

fn bench_slugify(c: &mut Criterion) {
  c.bench_function("slugify", |b| {
    b.iter(|| {
      black_box(slugify(black_box("1. Meta Tags (index.html)")));
      black_box(slugify(black_box(
        "Using <code>snake_case</code> &amp; friends",
      )));
    });
  });
}

criterion_group!(benches, bench_inject, bench_strip, bench_slugify);
criterion_main!(benches);
