use std::fmt;

use tracing::debug;

use crate::error::Error;
use crate::grammar::Grammar;
use crate::rules::Symbol;

/// Stable address of a packed node: cell index in the triangular layout plus
/// position within the cell. Backpointers hold these instead of references.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeId {
  pub cell: usize,
  pub node: usize,
}

/// One packed entry: every derivation of `symbol` over the owning cell's
/// span shares this node, with one `pairs` entry per distinct
/// (split, left, right) justification. An empty list marks a lexical leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartNode {
  pub symbol: Symbol,
  pub pairs: Vec<(NodeId, NodeId)>,
}

#[derive(Debug, Clone, PartialEq)]
struct Cell {
  start: usize,
  len: usize,
  nodes: Vec<ChartNode>,
}

/// The filled triangular table for one sentence, plus the sentence itself
/// (leaves render their word from it). Built in a single pass by
/// `parse_chart` and read-only afterwards.
#[derive(Debug)]
pub struct Chart {
  words: Vec<String>,
  cells: Vec<Cell>,
  root: NodeId,
}

/// Cells are laid out length-major, matching fill order: all spans of length
/// 1, then length 2, and so on up to the full sentence.
fn cell_index(n: usize, start: usize, len: usize) -> usize {
  debug_assert!(len >= 1 && start + len <= n);
  (len - 1) * (n + 1) - (len - 1) * len / 2 + start
}

impl Chart {
  /// Sentence length in words.
  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn words(&self) -> &[String] {
    &self.words
  }

  /// Packed nodes over the span `(start, start + len)`.
  pub fn cell(&self, start: usize, len: usize) -> &[ChartNode] {
    &self.cells[cell_index(self.len(), start, len)].nodes
  }

  pub fn node(&self, id: NodeId) -> &ChartNode {
    &self.cells[id.cell].nodes[id.node]
  }

  /// The `(start, end)` span the node at `id` covers.
  pub fn span(&self, id: NodeId) -> (usize, usize) {
    let cell = &self.cells[id.cell];
    (cell.start, cell.start + cell.len)
  }

  /// The node for `symbol` over `(start, start + len)`, if derivable.
  pub fn find_node(&self, start: usize, len: usize, symbol: &Symbol) -> Option<NodeId> {
    let cell = cell_index(self.len(), start, len);
    self.cells[cell]
      .nodes
      .iter()
      .position(|node| node.symbol == *symbol)
      .map(|node| NodeId { cell, node })
  }

  /// The start-symbol node covering the whole sentence.
  pub fn root(&self) -> NodeId {
    self.root
  }
}

impl fmt::Display for Chart {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for cell in self.cells.iter().rev() {
      if cell.nodes.is_empty() {
        continue;
      }
      write!(f, "{}..{}:", cell.start, cell.start + cell.len)?;
      for node in &cell.nodes {
        write!(f, " {}", node.symbol)?;
        if !node.pairs.is_empty() {
          write!(f, "({})", node.pairs.len())?;
        }
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

/// Builds the packed chart for `input` bottom-up: seed the diagonal from the
/// lexicon, then complete strictly by increasing span length, so every
/// combination step reads only finished cells. Fails fast with
/// `UnknownWord` during seeding and with `Unparseable` when the completed
/// top cell lacks the grammar's start symbol.
pub fn parse_chart(g: &Grammar, input: &[&str]) -> Result<Chart, Error> {
  let n = input.len();
  if n == 0 {
    return Err(Error::Unparseable {
      start: g.start().clone(),
    });
  }

  let mut cells = Vec::with_capacity(n * (n + 1) / 2);

  for (i, word) in input.iter().enumerate() {
    let labels = g.lookup_lexical(word);
    if labels.is_empty() {
      return Err(Error::UnknownWord {
        word: (*word).to_string(),
        position: i,
      });
    }
    let nodes = labels
      .iter()
      .map(|symbol| ChartNode {
        symbol: symbol.clone(),
        pairs: Vec::new(),
      })
      .collect();
    cells.push(Cell {
      start: i,
      len: 1,
      nodes,
    });
  }
  debug!(words = n, "seeded diagonal");

  for len in 2..=n {
    for start in 0..=(n - len) {
      let mut nodes: Vec<ChartNode> = Vec::new();
      for split in (start + 1)..(start + len) {
        let left_cell = cell_index(n, start, split - start);
        let right_cell = cell_index(n, split, start + len - split);
        for (li, left) in cells[left_cell].nodes.iter().enumerate() {
          for (ri, right) in cells[right_cell].nodes.iter().enumerate() {
            for symbol in g.lookup_binary(&left.symbol, &right.symbol) {
              let pair = (
                NodeId {
                  cell: left_cell,
                  node: li,
                },
                NodeId {
                  cell: right_cell,
                  node: ri,
                },
              );
              // the packing step: one node per symbol, one pair per
              // justification
              match nodes.iter_mut().find(|node| node.symbol == *symbol) {
                Some(node) => node.pairs.push(pair),
                None => nodes.push(ChartNode {
                  symbol: symbol.clone(),
                  pairs: vec![pair],
                }),
              }
            }
          }
        }
      }
      cells.push(Cell { start, len, nodes });
    }
    debug!(len, "completed spans");
  }

  let top = cell_index(n, 0, n);
  let root = cells[top]
    .nodes
    .iter()
    .position(|node| node.symbol == *g.start())
    .map(|node| NodeId { cell: top, node })
    .ok_or_else(|| Error::Unparseable {
      start: g.start().clone(),
    })?;

  Ok(Chart {
    words: input.iter().map(|w| (*w).to_string()).collect(),
    cells,
    root,
  })
}
