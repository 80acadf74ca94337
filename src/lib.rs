//! A CYK recognizer over grammars in Chomsky Normal Form, with ambiguous
//! derivations packed into shared chart nodes and unpacked on demand as a
//! lazy stream of parse trees.
//!
//! ```
//! use bramble::Grammar;
//!
//! let g = Grammar::from_src(
//!   "S -> NP VP\nNP -> Det N\nVP -> V NP\nDet -> the\nN -> cat\nN -> dog\nV -> saw\n",
//!   "S",
//! )
//! .unwrap();
//!
//! let chart = g.parse_chart(&["the", "cat", "saw", "the", "dog"]).unwrap();
//! let tree = chart.trees().next().unwrap();
//! assert_eq!(
//!   tree.to_string(),
//!   "(S (NP (Det the) (N cat)) (VP (V saw) (NP (Det the) (N dog))))"
//! );
//! ```

#[macro_use]
extern crate lazy_static;

pub mod cyk;
pub mod error;
pub mod forest;
pub mod grammar;
pub mod parse_grammar;
pub mod rules;
pub mod syntree;

pub use crate::cyk::{Chart, ChartNode, NodeId, parse_chart};
pub use crate::error::Error;
pub use crate::forest::{Trees, extract};
pub use crate::grammar::Grammar;
pub use crate::rules::{Rule, Symbol};
pub use crate::syntree::ParseTree;

impl Grammar {
  /// Builds the packed chart for `input`; see [`cyk::parse_chart`]. Walk the
  /// result with [`Chart::trees`].
  pub fn parse_chart(&self, input: &[&str]) -> Result<Chart, Error> {
    parse_chart(self, input)
  }
}
