//! Lexical scanning for the complexity engine
//!
//! Reduces raw source text to the fixed vocabulary of control-flow tokens
//! the scorer understands. Comments and string literals are blanked out
//! first so their contents can never produce tokens, then each cleaned
//! line is matched against the vocabulary with word-boundary discipline.

use regex::Regex;
use tracing::debug;

/// Vocabulary of tokens the scorer understands: whole-word keywords, the
/// two brace characters, the two-character logical operators, and the
/// ternary pair.
const VOCABULARY_PATTERN: &str =
  r"\b(?:if|else|while|for|do|switch|case|catch|try|finally|function|goto|break|continue)\b|[{}]|&&|\|\||[?:]";

/// Label-like identifier or bare integer directly after a jump keyword.
const LABEL_PATTERN: &str = r"^\s*([A-Za-z_$][A-Za-z0-9_$]*|[0-9]+)";

/// Kind of a scanned token.
///
/// `case`, `try`, and `finally` are recognized by the vocabulary but
/// dropped before emission, so they never appear here. A `Label` is only
/// ever emitted directly after a `Break`, `Continue`, or `Goto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  If,
  Else,
  While,
  For,
  Do,
  Switch,
  Catch,
  Function,
  Break,
  Continue,
  Goto,
  Label,
  LeftBrace,
  RightBrace,
  And,
  Or,
  Question,
  Colon,
}

/// A single vocabulary match, tagged with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  /// 1-based line number.
  pub line: usize,
  /// 0-based character offset within the cleaned line.
  pub column: usize,
}

/// Blank out comments and string literals.
///
/// Whole literals are deleted, quotes included, so token columns are
/// defined against the cleaned line. Every newline in the input survives,
/// keeping line numbers source-true across multi-line comments and
/// template literals. Whichever construct opens first wins: a `//` inside
/// a string is string content, a quote inside a comment is comment text.
/// Unterminated constructs run to the end of the input.
pub fn strip_comments_and_strings(source: &str) -> String {
  let mut cleaned = String::with_capacity(source.len());
  let mut chars = source.chars().peekable();

  while let Some(ch) = chars.next() {
    match ch {
      '/' if chars.peek() == Some(&'/') => {
        chars.next();
        // Line comment: drop up to the newline, which the outer loop keeps.
        while chars.peek().is_some_and(|&next| next != '\n') {
          chars.next();
        }
      }
      '/' if chars.peek() == Some(&'*') => {
        chars.next();
        let mut prev = '\0';
        for next in chars.by_ref() {
          if next == '\n' {
            cleaned.push('\n');
          }
          if prev == '*' && next == '/' {
            break;
          }
          prev = next;
        }
      }
      '"' | '\'' | '`' => {
        while let Some(next) = chars.next() {
          match next {
            '\\' => {
              // Escaped delimiters stay inside the literal.
              if chars.next() == Some('\n') {
                cleaned.push('\n');
              }
            }
            '\n' => cleaned.push('\n'),
            _ if next == ch => break,
            _ => {}
          }
        }
      }
      _ => cleaned.push(ch),
    }
  }

  cleaned
}

/// Map a vocabulary match to its token kind.
///
/// Returns `None` for matches that are recognized only to be excluded
/// from the stream.
fn classify(lexeme: &str, line: &str, start: usize, end: usize) -> Option<TokenKind> {
  let kind = match lexeme {
    "if" => TokenKind::If,
    "else" => TokenKind::Else,
    "while" => TokenKind::While,
    "for" => TokenKind::For,
    "do" => TokenKind::Do,
    "switch" => TokenKind::Switch,
    "catch" => TokenKind::Catch,
    "function" => TokenKind::Function,
    "break" => TokenKind::Break,
    "continue" => TokenKind::Continue,
    "goto" => TokenKind::Goto,
    "{" => TokenKind::LeftBrace,
    "}" => TokenKind::RightBrace,
    "&&" => TokenKind::And,
    "||" => TokenKind::Or,
    "?" if is_ternary_question(line, start, end) => TokenKind::Question,
    ":" => TokenKind::Colon,
    // case, try, finally, and non-ternary question marks stay out.
    _ => return None,
  };
  Some(kind)
}

/// A `?` only counts as the ternary operator when it stands alone:
/// optional chaining (`?.`) and nullish coalescing (`??`) are excluded.
fn is_ternary_question(line: &str, start: usize, end: usize) -> bool {
  let before = line[..start].chars().next_back();
  let after = line[end..].chars().next();
  before != Some('?') && after != Some('?') && after != Some('.')
}

/// Tokenize source text into the scoring vocabulary.
///
/// Never fails: arbitrary or malformed input yields whatever tokens the
/// vocabulary matches and nothing more.
pub fn tokenize(source: &str) -> Vec<Token> {
  let vocabulary = Regex::new(VOCABULARY_PATTERN).unwrap();
  let label = Regex::new(LABEL_PATTERN).unwrap();

  let cleaned = strip_comments_and_strings(source);
  let mut tokens = Vec::new();

  for (index, line) in cleaned.lines().enumerate() {
    let line_number = index + 1;
    // End of the region claimed by a jump keyword's label, so label text
    // is never re-scanned as vocabulary.
    let mut claimed_until = 0;

    for m in vocabulary.find_iter(line) {
      if m.start() < claimed_until {
        continue;
      }

      let kind = match classify(m.as_str(), line, m.start(), m.end()) {
        Some(kind) => kind,
        None => continue,
      };

      let column = line[..m.start()].chars().count();
      tokens.push(Token { kind, line: line_number, column });

      if matches!(kind, TokenKind::Break | TokenKind::Continue | TokenKind::Goto) {
        if let Some(label_match) = label.captures(&line[m.end()..]).and_then(|caps| caps.get(1)) {
          let column = line[..m.end() + label_match.start()].chars().count();
          tokens.push(Token { kind: TokenKind::Label, line: line_number, column });
          claimed_until = m.end() + label_match.end();
        }
      }
    }
  }

  debug!("tokenized {} tokens", tokens.len());
  tokens
}
