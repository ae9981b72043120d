#[derive(Debug)]
/// Represents all errors that can occur while a compiled program runs.
pub enum RuntimeError {
    /// Tried to read a variable with no binding.
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function that is not in the registry.
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// A call was compiled with a different number of arguments than the
    /// registered function takes.
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// The number of arguments the registered function takes.
        expected: usize,
        /// The number of arguments the call supplied.
        found:    usize,
    },
    /// An instruction needed more operands than the stack held.
    StackUnderflow {
        /// The instruction that could not be executed, as displayed.
        instruction: String,
    },
    /// A number literal carried from the source could not be read as a value.
    MalformedNumber {
        /// The literal text.
        literal: String,
    },
    /// The program finished with nothing on the operand stack.
    MissingResult,
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name } => {
                write!(f, "Unknown variable '{name}'.")
            },
            Self::UnknownFunction { name } => {
                write!(f, "Unknown function '{name}'.")
            },
            Self::ArgumentCountMismatch { name, expected, found } => write!(f,
                                                                            "Function '{name}' takes {expected} argument(s), but the call supplies {found}."),

            Self::StackUnderflow { instruction } => {
                write!(f, "Not enough operands for '{instruction}'.")
            },
            Self::MalformedNumber { literal } => {
                write!(f, "Malformed number literal '{literal}'.")
            },
            Self::MissingResult => write!(f, "The program produced no result."),
        }
    }
}

impl std::error::Error for RuntimeError {}
