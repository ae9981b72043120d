/// Compilation errors.
///
/// Defines all error types that can occur while lexing and compiling a
/// formula. Parse errors include invalid characters, malformed number
/// literals, unbalanced parentheses, misplaced commas, and calls with more
/// arguments than any registered function supports.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a compiled program runs.
/// Runtime errors include unknown variables or functions, argument count
/// mismatches, and operand stack underflow. Arithmetic itself never fails:
/// division by zero and other edge cases follow IEEE semantics.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
