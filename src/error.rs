use std::error;
use std::fmt;
use std::io;

use crate::rules::Symbol;

/// Everything that can fail between loading a ruleset and walking a chart.
/// The three parse-related kinds are distinct so a caller can tell a
/// malformed grammar from unknown vocabulary from a plain non-parse.
#[derive(Debug)]
pub enum Error {
  /// A malformed rule line, reported with its 1-based line number. Fails the
  /// whole load; no partial grammar is usable.
  Format { line: usize, msg: String },
  /// A sentence token with no preterminal in the lexicon. Raised before
  /// chart completion begins.
  UnknownWord { word: String, position: usize },
  /// The chart completed but the designated start symbol is absent from the
  /// top cell.
  Unparseable { start: Symbol },
  Io(io::Error),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Format { line, msg } => write!(f, "bad rule on line {}: {}", line, msg),
      Self::UnknownWord { word, position } => {
        write!(f, "unknown word `{}` at position {}", word, position)
      }
      Self::Unparseable { start } => write!(f, "sentence does not derive `{}`", start),
      Self::Io(err) => write!(f, "{}", err),
    }
  }
}

impl error::Error for Error {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      Self::Io(err) => Some(err),
      _ => None,
    }
  }
}

impl From<io::Error> for Error {
  fn from(err: io::Error) -> Self {
    Self::Io(err)
  }
}

#[test]
fn test_messages_name_the_failure() {
  let err = Error::Format {
    line: 3,
    msg: "missing `->`".to_string(),
  };
  assert_eq!(err.to_string(), "bad rule on line 3: missing `->`");

  let err = Error::UnknownWord {
    word: "arow".to_string(),
    position: 4,
  };
  assert_eq!(err.to_string(), "unknown word `arow` at position 4");

  let err = Error::Unparseable {
    start: Symbol::new("S"),
  };
  assert_eq!(err.to_string(), "sentence does not derive `S`");
}
