use std::fmt;

use logos::Logos;

use crate::error::LexError;

/// The lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier-shaped names such as `SQRT`, `ANS` or `MOD`.
    Keyword,
    /// Decimal literals, optionally carrying a fused leading sign.
    Numeric,
    /// A single operator or punctuation character such as `+` or `(`.
    Symbol,
}

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by
/// [`tokenize`]. Tokens are immutable; the parser reads them through a
/// cursor without consuming the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind:     TokenKind,
    text:     String,
    position: usize,
}

impl Token {
    /// Creates a token of `kind` starting at character `position`.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self { kind,
               text: text.into(),
               position }
    }

    /// The lexical class of the token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text of the token.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character offset at which the token starts.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` for a `Symbol` token whose text is `text`.
    #[must_use]
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == text
    }

    /// Returns `true` for a `+` or `-` symbol.
    #[must_use]
    pub fn is_sign(&self) -> bool {
        self.is_symbol("+") || self.is_symbol("-")
    }

    /// Character offset just past the end of the token.
    #[must_use]
    pub fn end(&self) -> usize {
        self.position + self.text.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Raw lexemes recognized by the generated scanner.
///
/// Signs are always scanned as symbols here; [`tokenize`] decides afterwards
/// whether a sign belongs to the numeral that follows it.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum Lexeme {
    /// `[A-Za-z_][A-Za-z0-9_]*`
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Keyword,
    /// `12`, `0`, `3.25`, `4.` or `.5`. A leading zero is only ever a
    /// numeral on its own, so `007` scans as three numerals.
    #[regex(r"[0-9]+\.[0-9]*")]
    #[regex(r"\.[0-9]+")]
    #[regex(r"[1-9][0-9]*")]
    #[token("0")]
    Numeric,
    /// Operators and punctuation.
    #[regex(r"[-+*/^%(),!&|<>=~@?:;\[\]{}$]")]
    Symbol,
    /// Spaces, tabs, line breaks and feeds.
    #[regex(r"[ \t\n\x0B\f\r]+", logos::skip)]
    Whitespace,
}

impl From<Lexeme> for TokenKind {
    fn from(lexeme: Lexeme) -> Self {
        match lexeme {
            Lexeme::Keyword => Self::Keyword,
            Lexeme::Numeric => Self::Numeric,
            Lexeme::Symbol | Lexeme::Whitespace => Self::Symbol,
        }
    }
}

/// A scanned lexeme together with its byte span.
struct Scanned {
    token:      Token,
    byte_start: usize,
    byte_end:   usize,
}

/// Converts increasing byte offsets of one source into character offsets.
struct CharOffsets<'a> {
    source:    &'a str,
    last_byte: usize,
    last_char: usize,
}

impl<'a> CharOffsets<'a> {
    const fn new(source: &'a str) -> Self {
        Self { source,
               last_byte: 0,
               last_char: 0 }
    }

    fn at(&mut self, byte: usize) -> usize {
        if byte >= self.last_byte {
            self.last_char += self.source[self.last_byte..byte].chars().count();
        } else {
            self.last_char = self.source[..byte].chars().count();
        }
        self.last_byte = byte;
        self.last_char
    }
}

/// Converts source text into an ordered sequence of tokens.
///
/// Whitespace between tokens is skipped. At every offset the scanner tries a
/// keyword, then a numeral, then a symbol, consuming the longest match.
/// Adjacent numerals are never merged.
///
/// A `+` or `-` directly followed by a numeral is fused into that numeral
/// when it stands where an operand is expected: at the start of the input or
/// after any symbol other than `)`. After a numeral, a keyword or `)` the
/// sign stays a symbol so it can act as a binary operator.
///
/// # Parameters
/// - `source`: The expression text.
///
/// # Returns
/// The tokens in source order. An empty or all-whitespace source yields an
/// empty vector.
///
/// # Errors
/// Returns a [`LexError`] carrying the first character that matches no
/// token pattern and its character offset.
///
/// # Example
/// ```
/// use decalc::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("-5 + 3").unwrap();
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
/// assert_eq!(texts, ["-5", "+", "3"]);
/// assert_eq!(tokens[0].kind(), TokenKind::Numeric);
///
/// let err = tokenize("2#3").unwrap_err();
/// assert_eq!((err.character, err.offset), ('#', 1));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let scanned = scan(source)?;
    let mut tokens: Vec<Token> = Vec::with_capacity(scanned.len());
    let mut lexemes = scanned.into_iter().peekable();

    while let Some(current) = lexemes.next() {
        if current.token.is_sign()
           && expects_operand(tokens.last())
           && let Some(next) = lexemes.peek()
           && next.token.kind == TokenKind::Numeric
           && next.byte_start == current.byte_end
        {
            let mut text = current.token.text;
            text.push_str(&next.token.text);
            tokens.push(Token::new(TokenKind::Numeric, text, current.token.position));
            lexemes.next();
            continue;
        }
        tokens.push(current.token);
    }

    Ok(tokens)
}

/// Runs the generated scanner over the whole source.
fn scan(source: &str) -> Result<Vec<Scanned>, LexError> {
    let mut offsets = CharOffsets::new(source);
    let mut lexer = Lexeme::lexer(source);
    let mut scanned = Vec::new();

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let position = offsets.at(span.start);

        let Ok(lexeme) = lexeme else {
            let character = source[span.start..].chars().next().unwrap_or('\u{FFFD}');
            return Err(LexError { character,
                                  offset: position });
        };

        scanned.push(Scanned { token:      Token::new(lexeme.into(), lexer.slice(), position),
                               byte_start: span.start,
                               byte_end:   span.end, });
    }

    Ok(scanned)
}

/// Whether the token before a sign leaves the parser expecting an operand.
fn expects_operand(previous: Option<&Token>) -> bool {
    previous.is_none_or(|token| token.kind == TokenKind::Symbol && token.text != ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|t| t.text)
                        .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|t| t.kind)
                        .collect()
    }

    #[test]
    fn classifies_each_token_kind() {
        assert_eq!(kinds("SQRT(2.5)"),
                   [TokenKind::Keyword, TokenKind::Symbol, TokenKind::Numeric, TokenKind::Symbol]);
    }

    #[test]
    fn records_character_positions_after_whitespace() {
        let tokens = tokenize("  12 *\t(ANS)").unwrap();
        let positions: Vec<usize> = tokens.iter().map(Token::position).collect();
        assert_eq!(positions, [2, 5, 7, 8, 11]);
    }

    #[test]
    fn positions_count_characters_not_bytes() {
        let err = tokenize("1 + é").unwrap_err();
        assert_eq!(err.character, 'é');
        assert_eq!(err.offset, 4);

        let tokens = tokenize("(1)").unwrap();
        assert_eq!(tokens[2].position(), 2);
    }

    #[test]
    fn sign_after_operand_stays_a_symbol() {
        assert_eq!(texts("2+3"), ["2", "+", "3"]);
        assert_eq!(texts("ANS-1"), ["ANS", "-", "1"]);
        assert_eq!(texts("(4)-1"), ["(", "4", ")", "-", "1"]);
    }

    #[test]
    fn sign_in_operand_position_is_fused() {
        assert_eq!(texts("-5+3"), ["-5", "+", "3"]);
        assert_eq!(texts("5- -3"), ["5", "-", "-3"]);
        assert_eq!(texts("2*+.5"), ["2", "*", "+.5"]);
        assert_eq!(texts("AVG(-1,-2)"), ["AVG", "(", "-1", ",", "-2", ")"]);
    }

    #[test]
    fn sign_separated_by_whitespace_is_not_fused() {
        assert_eq!(texts("- 5"), ["-", "5"]);
    }

    #[test]
    fn adjacent_numerals_are_not_coalesced() {
        assert_eq!(texts("007"), ["0", "0", "7"]);
        assert_eq!(texts("2 3"), ["2", "3"]);
        assert_eq!(texts("1.2.3"), ["1.2", ".3"]);
        assert_eq!(kinds("2 3"), [TokenKind::Numeric, TokenKind::Numeric]);
    }

    #[test]
    fn keywords_absorb_trailing_digits() {
        assert_eq!(texts("x1_y 2"), ["x1_y", "2"]);
        assert_eq!(texts("2e5"), ["2", "e5"]);
    }

    #[test]
    fn decimal_point_forms() {
        assert_eq!(texts("4. + .5"), ["4.", "+", ".5"]);
    }

    #[test]
    fn lone_decimal_point_is_rejected() {
        let err = tokenize("1 + .").unwrap_err();
        assert_eq!(err, LexError { character: '.',
                                   offset:    4, });
    }

    #[test]
    fn empty_and_blank_sources_have_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \t\n ").unwrap().is_empty());
    }
}
