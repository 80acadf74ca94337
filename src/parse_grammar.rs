use regex::Regex;
/// Line-oriented parsing of rule files: one `LHS -> RHS` per line
use crate::error::Error;
use crate::rules::{Rule, Symbol};

/// helper macro for initializing a regex with lazy_static!
macro_rules! regex_static {
  ($name:ident, $pattern:expr) => {
    lazy_static! {
      static ref $name: Regex = Regex::new($pattern).unwrap();
    }
  };
}

regex_static!(NAME, r"^[a-zA-Z0-9\-_]+$");

/// Nonterminals are upper-case initial, words lower-case. This is how a
/// one-token RHS is told apart from a unit production.
fn is_nonterminal(token: &str) -> bool {
  token.chars().next().is_some_and(|c| c.is_uppercase())
}

fn bad_rule(line: usize, msg: String) -> Error {
  Error::Format { line, msg }
}

fn parse_symbol(token: &str, line: usize) -> Result<Symbol, Error> {
  if !NAME.is_match(token) {
    return Err(bad_rule(line, format!("bad symbol `{}`", token)));
  }
  if !is_nonterminal(token) {
    return Err(bad_rule(
      line,
      format!("`{}` must be a nonterminal (upper-case initial)", token),
    ));
  }
  Ok(Symbol::new(token))
}

/// Parses rule text into `Rule`s. Blank lines and `//` comments are skipped.
/// Duplicate lines are passed through; `Grammar` construction absorbs them.
pub fn parse_rules(src: &str) -> Result<Vec<Rule>, Error> {
  let mut rules = Vec::new();

  for (idx, raw) in src.lines().enumerate() {
    let line = idx + 1;
    let text = raw.split("//").next().unwrap_or("").trim();
    if text.is_empty() {
      continue;
    }

    let Some((lhs, rhs)) = text.split_once("->") else {
      return Err(bad_rule(line, "missing `->`".to_string()));
    };
    let lhs = parse_symbol(lhs.trim(), line)?;

    let rhs = rhs.split_whitespace().collect::<Vec<_>>();
    let rule = match rhs.as_slice() {
      [] => return Err(bad_rule(line, "empty right-hand side".to_string())),
      [token] if is_nonterminal(token) => Rule::Unit {
        lhs,
        rhs: parse_symbol(token, line)?,
      },
      [word] => {
        if !NAME.is_match(word) {
          return Err(bad_rule(line, format!("bad word `{}`", word)));
        }
        Rule::Lexical {
          lhs,
          word: (*word).to_string(),
        }
      }
      [left, right] => Rule::Binary {
        lhs,
        left: parse_symbol(left, line)?,
        right: parse_symbol(right, line)?,
      },
      _ => {
        return Err(bad_rule(
          line,
          format!("expected one word or two symbols, got {} tokens", rhs.len()),
        ));
      }
    };
    rules.push(rule);
  }

  Ok(rules)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_each_rule_kind() {
    let rules = parse_rules("S -> NP VP\nNP -> N\nDet -> the\n").unwrap();
    assert_eq!(
      rules,
      vec![
        Rule::Binary {
          lhs: Symbol::new("S"),
          left: Symbol::new("NP"),
          right: Symbol::new("VP"),
        },
        Rule::Unit {
          lhs: Symbol::new("NP"),
          rhs: Symbol::new("N"),
        },
        Rule::Lexical {
          lhs: Symbol::new("Det"),
          word: "the".to_string(),
        },
      ]
    );
  }

  #[test]
  fn skips_blanks_and_comments() {
    let src = r"
      // determiners
      Det -> the  // trailing comment

      Det -> an
    ";
    let rules = parse_rules(src).unwrap();
    assert_eq!(rules.len(), 2);
  }

  #[test]
  fn missing_arrow_is_a_format_error() {
    let err = parse_rules("S -> NP VP\nNP Det N\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 2, .. }), "{:?}", err);
  }

  #[test]
  fn overlong_rhs_is_a_format_error() {
    let err = parse_rules("S -> NP VP PP\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }), "{:?}", err);
  }

  #[test]
  fn empty_rhs_is_a_format_error() {
    let err = parse_rules("S ->\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }), "{:?}", err);
  }

  #[test]
  fn word_lhs_is_a_format_error() {
    let err = parse_rules("the -> Det\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }), "{:?}", err);
  }

  #[test]
  fn word_inside_binary_rhs_is_a_format_error() {
    let err = parse_rules("VP -> V eat\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }), "{:?}", err);
  }

  #[test]
  fn rejects_symbols_with_punctuation() {
    let err = parse_rules("S' -> NP VP\n").unwrap_err();
    assert!(matches!(err, Error::Format { line: 1, .. }), "{:?}", err);
  }
}
