use std::fmt;
use std::rc::Rc;

/// An atomic grammar category: a terminal's preterminal label or an interior
/// nonterminal. Shared behind an `Rc` so chart cells and backpointer fan-out
/// can clone it cheaply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Rc<str>);

impl Symbol {
  pub fn new(name: &str) -> Self {
    Self(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A single loaded rule line, before inversion into the bottom-up indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
  /// `A -> B C`
  Binary {
    lhs: Symbol,
    left: Symbol,
    right: Symbol,
  },
  /// `A -> B`; folded away during `Grammar` construction, the chart never
  /// sees unit expansions
  Unit { lhs: Symbol, rhs: Symbol },
  /// `A -> word`
  Lexical { lhs: Symbol, word: String },
}

impl Rule {
  pub fn lhs(&self) -> &Symbol {
    match self {
      Self::Binary { lhs, .. } => lhs,
      Self::Unit { lhs, .. } => lhs,
      Self::Lexical { lhs, .. } => lhs,
    }
  }
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Binary { lhs, left, right } => write!(f, "{} -> {} {}", lhs, left, right),
      Self::Unit { lhs, rhs } => write!(f, "{} -> {}", lhs, rhs),
      Self::Lexical { lhs, word } => write!(f, "{} -> {}", lhs, word),
    }
  }
}

#[test]
fn test_display() {
  let rule = Rule::Binary {
    lhs: Symbol::new("S"),
    left: Symbol::new("NP"),
    right: Symbol::new("VP"),
  };
  assert_eq!(rule.to_string(), "S -> NP VP");
  assert_eq!(rule.lhs().name(), "S");

  let rule = Rule::Lexical {
    lhs: Symbol::new("Det"),
    word: "the".to_string(),
  };
  assert_eq!(rule.to_string(), "Det -> the");
}
