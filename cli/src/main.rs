use std::env;
use std::io;
use std::io::Write;
use std::process;

use tracing_subscriber::EnvFilter;

use bramble::{Error, Grammar};

fn usage(prog_name: &str) -> String {
  format!(
    r"Usage: {} GRAMMAR LEXICON [options]

Reads sentences from stdin and prints every parse tree the grammar and
lexicon admit, one bracketed tree per line.

Options:
  -h, --help       Print this message
  -c, --chart      Print the packed chart for each sentence
  -s, --start SYM  Designated start symbol (defaults to S)
  -l, --limit N    Print at most N trees per sentence (defaults to 16)",
    prog_name
  )
}

fn parse(g: &Grammar, sentence: &str, print_chart: bool, limit: usize) {
  let words = sentence.split(' ').collect::<Vec<_>>();

  let chart = match g.parse_chart(&words) {
    Ok(chart) => chart,
    Err(err) => {
      println!("{}", err);
      return;
    }
  };

  if print_chart {
    println!("chart:\n{}", chart);
  }

  // one past the limit so we can tell "exactly limit" from "capped"
  let trees = chart.trees().take(limit + 1).collect::<Vec<_>>();
  if trees.len() > limit {
    println!("Parsed more than {} trees, showing {}:", limit, limit);
  } else {
    println!(
      "Parsed {} tree{}",
      trees.len(),
      if trees.len() == 1 { "" } else { "s" }
    );
  }

  for tree in trees.iter().take(limit) {
    println!("{}", tree);
  }
}

struct Args {
  grammar: String,
  lexicon: String,
  start: String,
  print_chart: bool,
  limit: usize,
}

impl Args {
  fn make_error_message(msg: &str, prog_name: impl AsRef<str>) -> String {
    format!("argument error: {}.\n\n{}", msg, usage(prog_name.as_ref()))
  }

  fn parse(v: Vec<String>) -> Result<Self, String> {
    if v.is_empty() {
      return Err(Self::make_error_message("bad argument vector", "bramble"));
    }

    let mut iter = v.into_iter();
    let prog_name = iter.next().unwrap();

    let mut paths: Vec<String> = Vec::new();
    let mut start = "S".to_string();
    let mut print_chart = false;
    let mut limit = 16usize;

    while let Some(o) = iter.next() {
      if o == "-h" || o == "--help" {
        println!("{}", usage(&prog_name));
        process::exit(0);
      } else if o == "-c" || o == "--chart" {
        print_chart = true;
      } else if o == "-s" || o == "--start" {
        match iter.next() {
          Some(sym) => start = sym,
          None => return Err(Self::make_error_message("--start needs a symbol", prog_name)),
        }
      } else if o == "-l" || o == "--limit" {
        let value = iter.next().and_then(|n| n.parse::<usize>().ok());
        match value {
          Some(n) if n > 0 => limit = n,
          _ => return Err(Self::make_error_message("--limit needs a count", prog_name)),
        }
      } else if !o.starts_with('-') && paths.len() < 2 {
        paths.push(o);
      } else {
        return Err(Self::make_error_message("invalid arguments", prog_name));
      }
    }

    if paths.len() == 2 {
      let mut paths = paths.into_iter();
      Ok(Self {
        grammar: paths.next().unwrap(),
        lexicon: paths.next().unwrap(),
        start,
        print_chart,
        limit,
      })
    } else {
      Err(Self::make_error_message(
        "need a grammar file and a lexicon file",
        prog_name,
      ))
    }
  }
}

fn main() -> Result<(), Error> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let opts = match Args::parse(env::args().collect()) {
    Ok(opts) => opts,
    Err(msg) => {
      eprintln!("{}", msg);
      process::exit(255);
    }
  };

  let g = Grammar::read_from_files(&opts.grammar, &opts.lexicon, &opts.start)?;

  let mut input = String::new();
  loop {
    print!("> ");
    io::stdout().flush()?;

    match io::stdin().read_line(&mut input) {
      Ok(_) => {
        if input.is_empty() {
          // ctrl+d
          return Ok(());
        }
        input.make_ascii_lowercase();
        parse(&g, input.trim(), opts.print_chart, opts.limit);
        input.clear();
      }
      Err(error) => return Err(error.into()),
    }
  }
}
