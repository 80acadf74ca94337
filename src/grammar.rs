use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Error;
use crate::parse_grammar::parse_rules;
use crate::rules::{Rule, Symbol};

/// The reverse (bottom-up) indices over a CNF ruleset, plus the designated
/// start symbol. Immutable once built: recognition only calls the two
/// lookups, nothing mutates.
#[derive(Debug)]
pub struct Grammar {
  start: Symbol,
  /// (left child, right child) -> symbols with a rule producing that pair
  binary: HashMap<(Symbol, Symbol), Vec<Symbol>>,
  /// word -> preterminals that can label it
  lexical: HashMap<String, Vec<Symbol>>,
}

/// Insertion-ordered set semantics: repeated rule lines collapse, and lookup
/// results keep a stable, deterministic order for forest extraction.
fn insert_unique(set: &mut Vec<Symbol>, symbol: &Symbol) -> bool {
  if set.contains(symbol) {
    false
  } else {
    set.push(symbol.clone());
    true
  }
}

impl Grammar {
  pub fn new(start: Symbol, rules: impl IntoIterator<Item = Rule>) -> Self {
    let mut binary: HashMap<(Symbol, Symbol), Vec<Symbol>> = HashMap::new();
    let mut lexical: HashMap<String, Vec<Symbol>> = HashMap::new();
    let mut units: Vec<(Symbol, Symbol)> = Vec::new();

    for rule in rules {
      match rule {
        Rule::Binary { lhs, left, right } => {
          insert_unique(binary.entry((left, right)).or_default(), &lhs);
        }
        Rule::Lexical { lhs, word } => {
          insert_unique(lexical.entry(word).or_default(), &lhs);
        }
        Rule::Unit { lhs, rhs } => units.push((lhs, rhs)),
      }
    }

    Self::fold_units(&units, &mut binary, &mut lexical);

    debug!(
      pairs = binary.len(),
      words = lexical.len(),
      units = units.len(),
      "built grammar indices"
    );

    Self {
      start,
      binary,
      lexical,
    }
  }

  /// Standard unit-production elimination, so the chart only ever deals in
  /// binary and lexical expansions: wherever `b` can be derived, a rule
  /// `a -> b` lets `a` be derived too. Iterated to a fixpoint to cover unit
  /// chains; cycles simply stop producing new entries.
  fn fold_units(
    units: &[(Symbol, Symbol)],
    binary: &mut HashMap<(Symbol, Symbol), Vec<Symbol>>,
    lexical: &mut HashMap<String, Vec<Symbol>>,
  ) {
    let mut changed = true;
    while changed {
      changed = false;
      for (a, b) in units {
        for producers in binary.values_mut() {
          if producers.contains(b) {
            changed |= insert_unique(producers, a);
          }
        }
        for labels in lexical.values_mut() {
          if labels.contains(b) {
            changed |= insert_unique(labels, a);
          }
        }
      }
    }
  }

  pub fn from_src(src: &str, start: &str) -> Result<Self, Error> {
    Ok(Self::new(Symbol::new(start), parse_rules(src)?))
  }

  pub fn read_from_file(path: impl AsRef<Path>, start: &str) -> Result<Self, Error> {
    Self::from_src(&fs::read_to_string(path)?, start)
  }

  /// The split grammar-file + dictionary-file layout. Both files use the
  /// same rule format; their rules are unioned.
  pub fn read_from_files(
    grammar: impl AsRef<Path>,
    lexicon: impl AsRef<Path>,
    start: &str,
  ) -> Result<Self, Error> {
    let mut rules = parse_rules(&fs::read_to_string(grammar)?)?;
    rules.extend(parse_rules(&fs::read_to_string(lexicon)?)?);
    Ok(Self::new(Symbol::new(start), rules))
  }

  pub fn start(&self) -> &Symbol {
    &self.start
  }

  /// Symbols `A` such that `A -> left right` is a rule. Empty when no rule
  /// produces that child pair.
  pub fn lookup_binary(&self, left: &Symbol, right: &Symbol) -> &[Symbol] {
    self
      .binary
      .get(&(left.clone(), right.clone()))
      .map_or(&[], Vec::as_slice)
  }

  /// Preterminals that can label `word`. Empty when the word is unknown.
  pub fn lookup_lexical(&self, word: &str) -> &[Symbol] {
    self.lexical.get(word).map_or(&[], Vec::as_slice)
  }
}
