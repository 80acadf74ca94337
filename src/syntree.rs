use std::fmt;

use crate::rules::Symbol;

/// A labeled span in a finished tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Constituent {
  pub symbol: Symbol,
  pub span: (usize, usize),
}

/// The token a leaf covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
  pub text: String,
  pub position: usize,
}

/// One unpacked derivation. CNF keeps the shape rigid: an interior node has
/// exactly two children, a leaf is a preterminal over a single word.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseTree {
  Leaf(Constituent, Word),
  Branch(Constituent, Box<ParseTree>, Box<ParseTree>),
}

impl ParseTree {
  pub fn constituent(&self) -> &Constituent {
    match self {
      Self::Leaf(c, _) => c,
      Self::Branch(c, _, _) => c,
    }
  }

  pub fn symbol(&self) -> &Symbol {
    &self.constituent().symbol
  }

  pub fn span(&self) -> (usize, usize) {
    self.constituent().span
  }

  pub fn is_leaf(&self) -> bool {
    matches!(self, Self::Leaf(_, _))
  }
}

/// The canonical bracketed form, e.g. `(S (NP time) (VP (V flies) ...))`.
/// One line, child order preserved, so equal trees render equally.
impl fmt::Display for ParseTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Leaf(c, w) => write!(f, "({} {})", c.symbol, w.text),
      Self::Branch(c, left, right) => write!(f, "({} {} {})", c.symbol, left, right),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn leaf(symbol: &str, text: &str, position: usize) -> ParseTree {
    ParseTree::Leaf(
      Constituent {
        symbol: Symbol::new(symbol),
        span: (position, position + 1),
      },
      Word {
        text: text.to_string(),
        position,
      },
    )
  }

  #[test]
  fn brackets_nest_in_child_order() {
    let np = ParseTree::Branch(
      Constituent {
        symbol: Symbol::new("NP"),
        span: (0, 2),
      },
      Box::new(leaf("Det", "the", 0)),
      Box::new(leaf("N", "arrow", 1)),
    );
    assert_eq!(np.to_string(), "(NP (Det the) (N arrow))");
    assert_eq!(np.span(), (0, 2));
    assert_eq!(np.symbol().name(), "NP");
    assert!(!np.is_leaf());
  }

  #[test]
  fn leaves_render_their_word() {
    let l = leaf("N", "time", 3);
    assert!(l.is_leaf());
    assert_eq!(l.to_string(), "(N time)");
    assert_eq!(l.span(), (3, 4));
  }
}
