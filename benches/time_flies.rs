use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bramble::Grammar;

const GRAMMAR_SRC: &str = include_str!("../grammars/english.gr");
const LEXICON_SRC: &str = include_str!("../grammars/english.lex");

fn parse(g: &Grammar, input: &[&str]) -> usize {
  g.parse_chart(input)
    .map(|chart| chart.trees().count())
    .unwrap_or(0)
}

fn criterion_benchmark(c: &mut Criterion) {
  let src = format!("{}\n{}", GRAMMAR_SRC, LEXICON_SRC);
  let grammar = Grammar::from_src(&src, "S").unwrap();
  let simple_input = "the flies time the arrow".split(' ').collect::<Vec<_>>();
  let ambiguous_input = "time flies like an arrow".split(' ').collect::<Vec<_>>();

  c.bench_function("parse simple", |b| {
    b.iter(|| parse(black_box(&grammar), black_box(&simple_input)))
  });

  c.bench_function("parse ambiguous", |b| {
    b.iter(|| parse(black_box(&grammar), black_box(&ambiguous_input)))
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
