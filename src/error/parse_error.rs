use crate::machine::functions::MAX_ARITY;

#[derive(Debug)]
/// Represents all errors that can occur while lexing or compiling a formula.
pub enum ParseError {
    /// Encountered a character that is not part of the formula language.
    InvalidCharacter {
        /// The offending character. The scan position has already moved past
        /// it when the error is reported.
        character: char,
    },
    /// A number literal contained a decimal point with no digit after it.
    ExpectedDigitAfterDot {
        /// The malformed literal as written, e.g. `1.`.
        literal: String,
    },
    /// A closing parenthesis `)` had no matching opener.
    UnmatchedCloseParen,
    /// A comma appeared outside the argument list of a function call.
    MisplacedComma,
    /// The input ended with at least one parenthesis still open.
    MissingCloseParen,
    /// A function call supplied more arguments than any registered function
    /// can take.
    TooManyArguments {
        /// The name of the called function.
        name:  String,
        /// The number of arguments the call supplied.
        count: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character } => {
                write!(f, "Invalid character: '{character}'.")
            },

            Self::ExpectedDigitAfterDot { literal } => {
                write!(f, "Expected digit after '.' in number '{literal}'.")
            },

            Self::UnmatchedCloseParen => write!(f, "Unmatched closing parenthesis ')'."),

            Self::MisplacedComma => write!(f, "Comma outside of a function call."),

            Self::MissingCloseParen => write!(f, "Missing ')'."),

            Self::TooManyArguments { name, count } => write!(f,
                                                             "Too many arguments in call to '{name}': {count} supplied, at most {MAX_ARITY} allowed."),
        }
    }
}

impl std::error::Error for ParseError {}
