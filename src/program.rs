/// Represents an operator in a compiled program.
///
/// Operators cover arithmetic, comparisons, and boolean logic. Each operator
/// knows its precedence, its associativity, and how many operands it consumes
/// from the evaluation stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Logical or (`|`)
    Or,
    /// Logical and (`&`)
    And,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Power,
    /// Arithmetic negation (prefix `-`)
    Negate,
    /// Logical NOT (prefix `!`)
    Not,
}

impl Operator {
    /// Returns the binding strength of this operator.
    ///
    /// Higher values bind tighter. The full ladder, loosest to tightest:
    /// `|` < `&` < `=` `!=` < `<` `<=` `>` `>=` < `+` `-` < `*` `/` <
    /// prefix `-` `!` < `^`.
    ///
    /// ## Example
    /// ```
    /// use formula::program::Operator;
    ///
    /// assert!(Operator::Mul.precedence() > Operator::Add.precedence());
    /// assert!(Operator::Power.precedence() > Operator::Negate.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => 3,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div => 6,
            Self::Negate | Self::Not => 7,
            Self::Power => 8,
        }
    }

    /// Tests whether this operator groups to the right.
    ///
    /// Exponentiation is the one right-associative infix operator, so
    /// `2 ^ 3 ^ 2` means `2 ^ (3 ^ 2)`. The prefix operators bind their single
    /// operand to the right by nature.
    #[must_use]
    pub const fn is_right_associative(&self) -> bool {
        matches!(self, Self::Power | Self::Negate | Self::Not)
    }

    /// Returns the number of operands this operator consumes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Negate | Self::Not => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Operator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, Negate, Not,
            NotEqual, Or, Power, Sub,
        };
        let symbol = match self {
            Or => "|",
            And => "&",
            Equal => "=",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Power => "^",
            Negate => "neg",
            Not => "!",
        };
        write!(f, "{symbol}")
    }
}

/// A single step of a compiled program.
///
/// Instructions are executed left to right against an operand stack: operands
/// push, operators and calls pop their inputs and push one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A numeric literal, kept as its original source text. The text is not
    /// converted at compile time; the evaluator parses it when the instruction
    /// executes.
    Number(String),
    /// A reference to a named variable, resolved by the evaluator.
    Variable(String),
    /// An operator applied to the top of the operand stack.
    Operator(Operator),
    /// A call to a registered function.
    Call {
        /// The name of the function being called.
        name:  String,
        /// The number of arguments, fixed when the call's `)` was compiled.
        arity: usize,
    },
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(text) => write!(f, "{text}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Call { name, arity } => write!(f, "{name}:{arity}"),
        }
    }
}

/// A compiled formula: a flat, append-only postfix instruction sequence.
///
/// Programs are produced by [`compile`](crate::compiler::shunting_yard::compile)
/// and consumed by [`Evaluator::run`](crate::machine::evaluator::Evaluator::run).
/// Two formulas with the same meaning compile to equal programs regardless of
/// redundant grouping, so `Program` implements `PartialEq` and displays as a
/// normalized, space-delimited string.
///
/// ## Example
/// ```
/// use formula::compiler::shunting_yard::compile;
///
/// let program = compile("1 + 2 * 3").unwrap();
/// assert_eq!(program.to_string(), "1 2 3 * +");
/// assert_eq!(program, compile("(1 + 2 * 3)").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wraps a finished instruction sequence.
    #[must_use]
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Returns the instructions in execution order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Returns the number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Tests whether the program contains no instructions at all.
    ///
    /// The empty source string compiles to an empty program; running one is a
    /// runtime error, not a parse error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}
