use crate::cyk::{Chart, NodeId};
use crate::syntree::{Constituent, ParseTree, Word};

/// Lazily enumerates every tree packed under `id`, in canonical order: for
/// each backpointer pair in insertion order, the cross-product of left
/// subtrees (outer loop) with right subtrees (inner loop). Nothing is
/// materialized up front; the tree count grows combinatorially with
/// ambiguity, so bound consumption with `Iterator::take` rather than
/// collecting on untrusted input.
pub fn extract(chart: &Chart, id: NodeId) -> Trees<'_> {
  Trees::new(chart, id)
}

impl Chart {
  /// All parses of the whole sentence, rooted at the start symbol.
  pub fn trees(&self) -> Trees<'_> {
    extract(self, self.root())
  }
}

#[derive(Debug)]
pub struct Trees<'a> {
  chart: &'a Chart,
  id: NodeId,
  state: State<'a>,
}

#[derive(Debug)]
enum State<'a> {
  /// Lexical leaf: yields its one-leaf tree, once.
  Leaf { done: bool },
  /// Interior node: walks `pairs` in order, holding the current left
  /// subtree while the right-hand enumeration drains, then re-deriving the
  /// right side for the next left subtree.
  Packed {
    pair: usize,
    left: Box<Trees<'a>>,
    cur_left: Option<ParseTree>,
    right: Box<Trees<'a>>,
  },
}

impl<'a> Trees<'a> {
  fn new(chart: &'a Chart, id: NodeId) -> Self {
    let pairs = &chart.node(id).pairs;
    let state = match pairs.first() {
      None => State::Leaf { done: false },
      Some(&(l, r)) => State::Packed {
        pair: 0,
        left: Box::new(Trees::new(chart, l)),
        cur_left: None,
        right: Box::new(Trees::new(chart, r)),
      },
    };
    Self { chart, id, state }
  }

  fn constituent(&self) -> Constituent {
    Constituent {
      symbol: self.chart.node(self.id).symbol.clone(),
      span: self.chart.span(self.id),
    }
  }
}

impl Iterator for Trees<'_> {
  type Item = ParseTree;

  fn next(&mut self) -> Option<ParseTree> {
    let chart = self.chart;
    let id = self.id;
    let constituent = self.constituent();

    match &mut self.state {
      State::Leaf { done } => {
        if *done {
          return None;
        }
        *done = true;
        let (position, _) = chart.span(id);
        Some(ParseTree::Leaf(
          constituent,
          Word {
            text: chart.words()[position].clone(),
            position,
          },
        ))
      }
      State::Packed {
        pair,
        left,
        cur_left,
        right,
      } => loop {
        let Some(left_tree) = cur_left else {
          match left.next() {
            Some(tree) => {
              // fresh right-hand enumeration for this left subtree
              **right = Trees::new(chart, chart.node(id).pairs[*pair].1);
              *cur_left = Some(tree);
            }
            None => {
              *pair += 1;
              let Some(&(l, _)) = chart.node(id).pairs.get(*pair) else {
                return None;
              };
              **left = Trees::new(chart, l);
            }
          }
          continue;
        };

        match right.next() {
          Some(right_tree) => {
            return Some(ParseTree::Branch(
              constituent,
              Box::new(left_tree.clone()),
              Box::new(right_tree),
            ));
          }
          None => *cur_left = None,
        }
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::Grammar;
  use crate::cyk::parse_chart;
  use crate::rules::Symbol;

  /// `S -> S S | s` over a run of `s` tokens: the span of k words has
  /// Catalan(k - 1) distinct bracketings, all through one packed chart.
  fn runs() -> Grammar {
    Grammar::from_src("S -> S S\nS -> s\n", "S").unwrap()
  }

  #[test]
  fn a_leaf_node_yields_exactly_its_leaf() {
    let g = runs();
    let chart = parse_chart(&g, &["s"]).unwrap();
    let trees = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
    assert_eq!(trees, ["(S s)"]);
  }

  #[test]
  fn an_unambiguous_sentence_yields_one_tree() {
    let g = Grammar::from_src(
      "S -> NP VP\nNP -> Det N\nVP -> V NP\nDet -> the\nN -> cat\nN -> dog\nV -> saw\n",
      "S",
    )
    .unwrap();
    let chart = parse_chart(&g, &["the", "cat", "saw", "the", "dog"]).unwrap();
    let trees = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
    assert_eq!(
      trees,
      ["(S (NP (Det the) (N cat)) (VP (V saw) (NP (Det the) (N dog))))"]
    );
  }

  #[test]
  fn every_distinct_bracketing_is_yielded_once() {
    let g = runs();
    let chart = parse_chart(&g, &["s", "s", "s"]).unwrap();
    let trees = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
    // pairs are inserted split-ascending, so the right-branching tree leads
    assert_eq!(
      trees,
      [
        "(S (S s) (S (S s) (S s)))",
        "(S (S (S s) (S s)) (S s))",
      ]
    );
  }

  #[test]
  fn tree_counts_follow_the_catalan_numbers() {
    let g = runs();
    for (words, expected) in [(1, 1), (2, 1), (3, 2), (4, 5), (5, 14)] {
      let input = vec!["s"; words];
      let chart = parse_chart(&g, &input).unwrap();
      assert_eq!(chart.trees().count(), expected, "{} words", words);

      let mut rendered = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
      rendered.sort();
      rendered.dedup();
      assert_eq!(rendered.len(), expected, "duplicate trees at {} words", words);
    }
  }

  #[test]
  fn enumeration_can_be_capped_without_draining() {
    let g = runs();
    let chart = parse_chart(&g, &vec!["s"; 10]).unwrap();
    // 10 words pack 4862 trees; taking a handful must not enumerate them all
    let first = chart.trees().take(3).collect::<Vec<_>>();
    assert_eq!(first.len(), 3);
  }

  #[test]
  fn extraction_restarts_identically() {
    let g = runs();
    let chart = parse_chart(&g, &["s", "s", "s", "s"]).unwrap();
    let once = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
    let twice = chart.trees().map(|t| t.to_string()).collect::<Vec<_>>();
    assert_eq!(once, twice);
  }

  #[test]
  fn subspan_nodes_extract_their_own_forest() {
    let g = runs();
    let chart = parse_chart(&g, &["s", "s", "s"]).unwrap();
    let id = chart.find_node(1, 2, &Symbol::new("S")).unwrap();
    let trees = extract(&chart, id).map(|t| t.to_string()).collect::<Vec<_>>();
    assert_eq!(trees, ["(S (S s) (S s))"]);
  }
}
