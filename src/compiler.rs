/// The lexer module tokenizes formula text for conversion.
///
/// The lexer (tokenizer) reads the raw formula and produces a stream of
/// tokens, each corresponding to a meaningful element such as a number,
/// identifier, operator, parenthesis, or comma. This is the first stage of
/// compilation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Keeps numeric literals as their original text; nothing is evaluated here.
/// - Reports lexical errors for invalid characters and malformed numbers.
pub mod lexer;
/// The shunting-yard module converts token streams into postfix programs.
///
/// The converter processes the token stream produced by the lexer in a single
/// left-to-right pass, reordering it into postfix (reverse Polish) form with
/// an operator stack. Parentheses, operator precedence and associativity,
/// contextual unary minus, and function-call argument counting are all
/// resolved here; what comes out is a flat program with none of them left.
///
/// # Responsibilities
/// - Converts tokens into a postfix instruction sequence.
/// - Applies the precedence and associativity rules of the formula language.
/// - Counts call arguments and enforces the registry-wide arity ceiling.
/// - Reports unbalanced parentheses and misplaced commas.
pub mod shunting_yard;
