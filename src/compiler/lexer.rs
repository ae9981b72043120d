use logos::Logos;

use crate::error::ParseError;

/// Distinguishes the ways a scan can fail.
///
/// Logos reports `InvalidCharacter` for input no pattern matches; the
/// malformed-number pattern reports `MalformedNumber` through its callback.
/// Both are turned into a [`ParseError`] naming the offending slice by
/// [`tokenize`].
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexicalError {
    /// A character outside the formula alphabet.
    #[default]
    InvalidCharacter,
    /// A number literal whose decimal point has no digit after it.
    MalformedNumber,
}

/// Represents a lexical token in a formula.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the formula language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexicalError)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `42` or `2.1e-10`.
    ///
    /// The source text is kept verbatim; nothing is converted to a value at
    /// scan time. The exponent accepts a sign and zero or more digits, so a
    /// bare trailing marker (`1.5e`) scans as part of the number. A decimal
    /// point with no digit after it (`1.`) fails the scan instead.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]*)?", raw_number)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]*)?", raw_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]*)?", raw_number)]
    #[regex(r"[0-9]*\.", missing_fraction_digit)]
    Number(String),
    /// Identifier tokens; variable or function names such as `x` or `sin`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    OpenParen,
    /// `)`
    #[token(")")]
    CloseParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `&`
    #[token("&")]
    And,
    /// `|`
    #[token("|")]
    Or,
    /// `=`
    #[token("=")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `!`
    #[token("!")]
    Not,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `+`
    #[token("+")]
    Add,
    /// `-`
    #[token("-")]
    Sub,
    /// `*`
    #[token("*")]
    Mul,
    /// `/`
    #[token("/")]
    Div,
    /// `^`
    #[token("^")]
    Power,
}

/// Keeps a numeric literal as its original source text.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// The matched slice, owned.
fn raw_number(lex: &logos::Lexer<Token>) -> String {
    lex.slice().to_string()
}
/// Rejects a numeric literal whose decimal point is not followed by a digit.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// Always `Err(LexicalError::MalformedNumber)`; the matched slice (e.g. `1.`)
/// stays available on the lexer for error reporting.
fn missing_fraction_digit(_lex: &logos::Lexer<Token>) -> Result<String, LexicalError> {
    Err(LexicalError::MalformedNumber)
}

/// Scans a formula into its token sequence.
///
/// Whitespace (space, tab, carriage return, line feed) separates tokens and is
/// otherwise ignored. The scan stops at the first lexical error; the cursor
/// has already advanced past the offending slice when that happens.
///
/// # Errors
/// - [`ParseError::InvalidCharacter`] for a character outside the formula
///   alphabet, naming the character.
/// - [`ParseError::ExpectedDigitAfterDot`] for a literal like `1.`, naming the
///   literal.
///
/// # Examples
/// ```
/// use formula::compiler::lexer::{Token, tokenize};
///
/// let tokens = tokenize("fade * .5 <= 1").unwrap();
/// assert_eq!(tokens[0], Token::Identifier("fade".to_string()));
/// assert_eq!(tokens[1], Token::Mul);
/// assert_eq!(tokens[2], Token::Number(".5".to_string()));
/// assert_eq!(tokens[3], Token::LessEqual);
///
/// assert!(tokenize("1 ? 2").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        match token {
            Ok(tok) => tokens.push(tok),
            Err(LexicalError::MalformedNumber) => {
                return Err(ParseError::ExpectedDigitAfterDot { literal: lexer.slice().to_string(), });
            },
            Err(LexicalError::InvalidCharacter) => {
                let character = lexer.slice().chars().next().unwrap_or(' ');
                return Err(ParseError::InvalidCharacter { character });
            },
        }
    }

    Ok(tokens)
}
