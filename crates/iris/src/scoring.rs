//! Cognitive complexity scoring
//!
//! Single forward pass over the scanner's token stream. Control-flow
//! keywords pay a nesting-weighted cost, else branches and boolean
//! operator runs pay a flat cost, and braces drive the nesting level.
//! The pass uses one token of lookahead and one of lookbehind; it never
//! backtracks and never fails.

use serde::Serialize;
use tracing::trace;

use crate::scanner::{self, Token, TokenKind};

/// One scored event, anchored to the token that caused it.
///
/// The description is informational only; callers should key off
/// `contribution`, `line`, and `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
  pub line: usize,
  pub column: usize,
  pub contribution: u32,
  pub description: String,
}

/// Full result of scoring one unit of source text.
///
/// `total_complexity` is the sum of the contribution magnitudes,
/// saturating at `u32::MAX` on degenerate input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
  pub total_complexity: u32,
  pub contributions: Vec<Contribution>,
}

/// Analyze source text and return the full contribution breakdown.
pub fn analyze_cognitive_complexity(source: &str) -> Analysis {
  let tokens = scanner::tokenize(source);
  score(&tokens)
}

/// Analyze source text and return only the total score.
pub fn calculate_cognitive_complexity(source: &str) -> u32 {
  analyze_cognitive_complexity(source).total_complexity
}

/// Describe a nesting-weighted construct at the depth it fired.
fn describe(construct: &str, nesting: u32) -> String {
  if nesting == 0 {
    construct.to_string()
  } else {
    format!("nested {} (nesting={})", construct, nesting)
  }
}

/// Append one scored event.
fn add(analysis: &mut Analysis, token: &Token, contribution: u32, description: String) {
  trace!("line {}, col {}: +{} {}", token.line, token.column, contribution, description);
  analysis.total_complexity = analysis.total_complexity.saturating_add(contribution);
  analysis.contributions.push(Contribution {
    line: token.line,
    column: token.column,
    contribution,
    description,
  });
}

/// Score a token stream in a single pass.
fn score(tokens: &[Token]) -> Analysis {
  let mut analysis = Analysis::default();
  let mut nesting: u32 = 0;
  // One-slot flag: does the previous token license the next `{` to nest?
  // Set by nesting-eligible keywords, cleared by any other token.
  let mut armed = false;
  let mut index = 0;

  while index < tokens.len() {
    let token = &tokens[index];
    let was_armed = armed;
    armed = false;
    let mut advance = 1;

    match token.kind {
      TokenKind::If => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("if statement", nesting));
        armed = true;
      }
      TokenKind::While => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("while loop", nesting));
        armed = true;
      }
      TokenKind::For => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("for loop", nesting));
        armed = true;
      }
      TokenKind::Do => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("do-while loop", nesting));
        armed = true;
      }
      TokenKind::Switch => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("switch statement", nesting));
        armed = true;
      }
      TokenKind::Catch => {
        add(&mut analysis, token, nesting.saturating_add(1), describe("catch clause", nesting));
        armed = true;
      }
      TokenKind::Else => {
        // An else-if pair is one flat event; the paired if is consumed
        // here and never separately scored.
        if tokens.get(index + 1).map(|next| next.kind) == Some(TokenKind::If) {
          add(&mut analysis, token, 1, "else if branch".to_string());
          advance = 2;
        } else {
          add(&mut analysis, token, 1, "else branch".to_string());
        }
        armed = true;
      }
      TokenKind::Question => {
        add(
          &mut analysis,
          token,
          nesting.saturating_add(1),
          describe("ternary expression", nesting),
        );
        armed = true;
      }
      TokenKind::Function => {
        armed = true;
      }
      TokenKind::And | TokenKind::Or => {
        // A contiguous run of logical operators scores once, on the token
        // that starts the run.
        let run_continues =
          index > 0 && matches!(tokens[index - 1].kind, TokenKind::And | TokenKind::Or);
        if !run_continues {
          add(&mut analysis, token, 1, "logical operator sequence".to_string());
        }
      }
      TokenKind::Break | TokenKind::Continue | TokenKind::Goto => {
        // Only labeled or multi-level jumps score; a bare jump is free.
        if tokens.get(index + 1).map(|next| next.kind) == Some(TokenKind::Label) {
          let construct = match token.kind {
            TokenKind::Break => "labeled break",
            TokenKind::Continue => "labeled continue",
            _ => "labeled goto",
          };
          add(&mut analysis, token, 1, construct.to_string());
        }
      }
      TokenKind::LeftBrace => {
        if was_armed {
          nesting = nesting.saturating_add(1);
        }
      }
      TokenKind::RightBrace => {
        nesting = nesting.saturating_sub(1);
      }
      TokenKind::Label | TokenKind::Colon => {}
    }

    index += advance;
  }

  analysis
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_input_scores_zero() {
    let analysis = analyze_cognitive_complexity("");
    assert_eq!(analysis.total_complexity, 0);
    assert!(analysis.contributions.is_empty());
  }

  #[test]
  fn test_single_if() {
    assert_eq!(calculate_cognitive_complexity("if (x) { }"), 1);
  }

  #[test]
  fn test_nested_if_pays_nesting_penalty() {
    let analysis = analyze_cognitive_complexity("if (a) { if (b) { } }");
    assert_eq!(analysis.total_complexity, 3);
    assert_eq!(analysis.contributions[0].contribution, 1);
    assert_eq!(analysis.contributions[1].contribution, 2);
    assert_eq!(analysis.contributions[1].description, "nested if statement (nesting=1)");
  }

  #[test]
  fn test_else_if_is_one_flat_event() {
    let analysis = analyze_cognitive_complexity("if (a) { } else if (b) { }");
    assert_eq!(analysis.total_complexity, 2);
    assert_eq!(analysis.contributions.len(), 2);
    assert_eq!(analysis.contributions[1].description, "else if branch");
  }

  #[test]
  fn test_else_scores_flat() {
    assert_eq!(calculate_cognitive_complexity("if (a) { } else { }"), 2);
  }

  #[test]
  fn test_else_if_chain() {
    let source = "if (a) { } else if (b) { } else { }";
    let analysis = analyze_cognitive_complexity(source);
    assert_eq!(analysis.total_complexity, 3);
    assert_eq!(analysis.contributions[2].description, "else branch");
  }

  #[test]
  fn test_logical_operator_run_collapses() {
    assert_eq!(calculate_cognitive_complexity("while (a && b || c) { }"), 2);
  }

  #[test]
  fn test_separate_logical_runs_score_separately() {
    // The if between the runs breaks the contiguity.
    assert_eq!(calculate_cognitive_complexity("if (a && b) { } if (c || d) { }"), 4);
  }

  #[test]
  fn test_switch_case_bare_break() {
    assert_eq!(calculate_cognitive_complexity("switch (x) { case 1: break; }"), 1);
  }

  #[test]
  fn test_labeled_break_scores() {
    let analysis = analyze_cognitive_complexity("outer: for (;;) { break outer; }");
    assert_eq!(analysis.total_complexity, 2);
    assert_eq!(analysis.contributions[1].description, "labeled break");
  }

  #[test]
  fn test_labeled_continue_scores() {
    let analysis = analyze_cognitive_complexity("while (a) { continue retry; }");
    assert_eq!(analysis.total_complexity, 2);
    assert_eq!(analysis.contributions[1].description, "labeled continue");
  }

  #[test]
  fn test_comments_and_literals_score_zero() {
    assert_eq!(calculate_cognitive_complexity("// if (x) {}"), 0);
    assert_eq!(calculate_cognitive_complexity("let s = `if (x) {}`;"), 0);
  }

  #[test]
  fn test_try_catch_only_catch_scores() {
    let analysis = analyze_cognitive_complexity("try { } catch (e) { } finally { }");
    assert_eq!(analysis.total_complexity, 1);
    assert_eq!(analysis.contributions[0].description, "catch clause");
  }

  #[test]
  fn test_function_nests_without_scoring() {
    let analysis = analyze_cognitive_complexity("function f() { if (x) { } }");
    assert_eq!(analysis.total_complexity, 2);
    assert_eq!(analysis.contributions.len(), 1);
  }

  #[test]
  fn test_ternary_scores_with_nesting() {
    let analysis = analyze_cognitive_complexity("if (a) { x = b ? 1 : 2; }");
    assert_eq!(analysis.total_complexity, 3);
    assert_eq!(analysis.contributions[1].description, "nested ternary expression (nesting=1)");
  }

  #[test]
  fn test_do_while_scores_both_keywords() {
    assert_eq!(calculate_cognitive_complexity("do { } while (x)"), 2);
  }

  #[test]
  fn test_deeply_nested_weighting() {
    let source = "if (a) { while (b) { for (;;) { if (c) { } } } }";
    // 1 + 2 + 3 + 4
    assert_eq!(calculate_cognitive_complexity(source), 10);
  }

  #[test]
  fn test_unmatched_braces_degrade_gracefully() {
    assert_eq!(calculate_cognitive_complexity("} } if (x) { }"), 1);
    assert_eq!(calculate_cognitive_complexity("{ { { if (x)"), 1);
  }

  #[test]
  fn test_extreme_nesting_saturates_total() {
    // Every line opens another armed block, so the true contribution sum
    // is ~5e9 and no longer fits in u32. The total clamps at u32::MAX.
    let source = "if {\n".repeat(100_000);
    let analysis = analyze_cognitive_complexity(&source);
    assert_eq!(analysis.total_complexity, u32::MAX);
    assert_eq!(analysis.contributions.len(), 100_000);
  }

  #[test]
  fn test_contribution_positions_point_at_tokens() {
    let analysis = analyze_cognitive_complexity("if (a) {\n  while (b) { }\n}");
    assert_eq!((analysis.contributions[0].line, analysis.contributions[0].column), (1, 0));
    assert_eq!((analysis.contributions[1].line, analysis.contributions[1].column), (2, 2));
  }

  #[test]
  fn test_total_equals_sum_of_contributions() {
    let source = "function f(a) {\n  if (a && b) {\n    for (;;) {\n      break top;\n    }\n  } else {\n    x = a ? 1 : 2;\n  }\n}";
    let analysis = analyze_cognitive_complexity(source);
    let sum: u32 = analysis.contributions.iter().map(|c| c.contribution).sum();
    assert_eq!(analysis.total_complexity, sum);
  }

  #[test]
  fn test_calculate_matches_analyze() {
    let source = "if (a) { while (b || c) { } }";
    assert_eq!(
      calculate_cognitive_complexity(source),
      analyze_cognitive_complexity(source).total_complexity
    );
  }

  #[test]
  fn test_rerun_is_stable() {
    let source = "if (a) { if (b) { } } else { }";
    assert_eq!(analyze_cognitive_complexity(source), analyze_cognitive_complexity(source));
  }
}
