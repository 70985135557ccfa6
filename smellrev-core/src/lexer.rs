//! Best-effort lexical tokenizer for fragment display.
//!
//! This is a colorizer, not a compiler front end: each line is split and
//! classified independently, with no lexical state carried between lines. A
//! block comment spanning lines is therefore not tracked as a single comment
//! — a designed limitation. Tracking it would require threading carry-over
//! state between successive lines.
//!
//! The split retains boundary matches as tokens in their own right, so
//! concatenating all tokens of all lines (rejoined with `'\n'`) reproduces
//! the input exactly.

/// Display class of a single token. Exactly one per token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    StringLit,
    Number,
    Comment,
    Operator,
    /// Identifiers, punctuation, whitespace — everything unclassified.
    Plain,
}

/// One token: a slice of the source line plus its display class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

/// One source line: its display line number and its ordered tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens<'a> {
    pub number: u32,
    pub tokens: Vec<Token<'a>>,
}

/// Reserved words recognized as keywords, tuned for the JS/TS corpus the
/// fragments are drawn from.
const KEYWORDS: &[&str] = &[
    "function", "const", "let", "var", "if", "else", "for", "while", "return", "class",
    "interface", "type", "enum", "import", "export", "from", "default", "async", "await",
    "try", "catch", "finally", "throw", "new", "this", "super", "extends", "implements",
    "public", "private", "protected", "static",
];

/// Characters that terminate a word run and become single-character tokens.
const DELIMITERS: &str = "(){}[],.;:+-*/%=<>!&|";

/// Characters that make up operator tokens.
const OPERATOR_CHARS: &str = "+-*/%=<>!&|";

/// Tokenizes `code` into classified display lines.
///
/// Lines are numbered from `start_line` (line N of the fragment displays as
/// `start_line + N`). The returned iterator is lazy and restartable: calling
/// again on the same input yields the same sequence — classification is a
/// pure function of the token text alone.
pub fn tokenize(code: &str, start_line: u32) -> impl Iterator<Item = LineTokens<'_>> {
    code.split('\n').enumerate().map(move |(index, line)| LineTokens {
        number: start_line.saturating_add(index as u32),
        tokens: split_line(line)
            .into_iter()
            .map(|text| Token { text, kind: classify(text) })
            .collect(),
    })
}

/// Splits one line on the fixed boundary pattern, keeping the boundaries.
///
/// A boundary is either a maximal whitespace run (one token) or a single
/// delimiter character (one token each). Everything between boundaries is a
/// word token. No text is dropped.
fn split_line(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if ch.is_whitespace() {
            if let Some(start) = word_start.take() {
                tokens.push(&line[start..i]);
            }
            // Extend to the end of the whitespace run.
            let mut end = i + ch.len_utf8();
            while let Some(&(j, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = j + next.len_utf8();
                chars.next();
            }
            tokens.push(&line[i..end]);
        } else if DELIMITERS.contains(ch) {
            if let Some(start) = word_start.take() {
                tokens.push(&line[start..i]);
            }
            tokens.push(&line[i..i + ch.len_utf8()]);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        tokens.push(&line[start..]);
    }
    tokens
}

/// Classifies a token into exactly one display class. First matching rule
/// wins; classification is independent across tokens.
fn classify(token: &str) -> TokenKind {
    if KEYWORDS.contains(&token) {
        TokenKind::Keyword
    } else if is_string_literal(token) {
        TokenKind::StringLit
    } else if is_number(token) {
        TokenKind::Number
    } else if token.starts_with("//") || token.starts_with("/*") {
        TokenKind::Comment
    } else if is_operator(token) {
        TokenKind::Operator
    } else {
        TokenKind::Plain
    }
}

/// A token fully quoted by a matching delimiter pair (`"…"`, `'…'`, `` `…` ``).
fn is_string_literal(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), token.chars().last()) {
        (Some(first), Some(last)) => {
            token.len() >= 2 && first == last && matches!(first, '"' | '\'' | '`')
        }
        _ => false,
    }
}

/// Digits with at most one decimal point, starting with a digit.
fn is_number(token: &str) -> bool {
    let mut seen_dot = false;
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => return false,
        }
    }
    true
}

/// Non-empty and composed entirely of operator characters.
fn is_operator(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| OPERATOR_CHARS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(code: &str) -> String {
        tokenize(code, 1)
            .map(|line| line.tokens.iter().map(|t| t.text).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn round_trip_is_lossless() {
        let samples = [
            "const x = 1;\nfunction f(a, b) {\n  return a + b;\n}",
            "",
            "   leading and trailing   ",
            "let s = \"hi there\";\n\n\ttabbed\n",
            "weird !== chars && a||b",
        ];
        for code in samples {
            assert_eq!(reconstruct(code), code, "round trip failed for {code:?}");
        }
    }

    #[test]
    fn tokenizer_is_pure() {
        let code = "const n = 3.14; // pi";
        let first: Vec<LineTokens> = tokenize(code, 10).collect();
        let second: Vec<LineTokens> = tokenize(code, 10).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn lines_are_numbered_from_start_line() {
        let numbers: Vec<u32> = tokenize("a\nb\nc", 41).map(|l| l.number).collect();
        assert_eq!(numbers, vec![41, 42, 43]);
    }

    #[test]
    fn classification_rules_in_order() {
        assert_eq!(classify("return"), TokenKind::Keyword);
        assert_eq!(classify("\"quoted\""), TokenKind::StringLit);
        assert_eq!(classify("'a'"), TokenKind::StringLit);
        assert_eq!(classify("`tpl`"), TokenKind::StringLit);
        assert_eq!(classify("42"), TokenKind::Number);
        assert_eq!(classify("3.14"), TokenKind::Number);
        assert_eq!(classify("5."), TokenKind::Number);
        assert_eq!(classify("//"), TokenKind::Comment);
        assert_eq!(classify("/*x"), TokenKind::Comment);
        assert_eq!(classify("="), TokenKind::Operator);
        assert_eq!(classify("+"), TokenKind::Operator);
        assert_eq!(classify("identifier"), TokenKind::Plain);
        assert_eq!(classify("("), TokenKind::Plain);
        assert_eq!(classify("  "), TokenKind::Plain);
    }

    #[test]
    fn mismatched_quotes_are_not_string_literals() {
        assert_eq!(classify("\"mixed'"), TokenKind::Plain);
        assert_eq!(classify("\""), TokenKind::Plain);
    }

    #[test]
    fn numbers_reject_second_dot_and_leading_dot() {
        assert_eq!(classify("1.2.3"), TokenKind::Plain);
        assert_eq!(classify(".5"), TokenKind::Plain);
    }

    #[test]
    fn delimiters_split_as_single_tokens() {
        let line: Vec<LineTokens> = tokenize("a.b(c)", 1).collect();
        let texts: Vec<&str> = line[0].tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", ".", "b", "(", "c", ")"]);
    }

    #[test]
    fn whitespace_runs_stay_single_tokens() {
        let line: Vec<LineTokens> = tokenize("a   b", 1).collect();
        let texts: Vec<&str> = line[0].tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "   ", "b"]);
    }

    #[test]
    fn empty_input_is_one_empty_line() {
        let lines: Vec<LineTokens> = tokenize("", 7).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 7);
        assert!(lines[0].tokens.is_empty());
    }
}
