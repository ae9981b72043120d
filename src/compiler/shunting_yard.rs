use crate::{
    compiler::lexer::{Token, tokenize},
    error::ParseError,
    machine::functions::MAX_ARITY,
    program::{Instruction, Operator, Program},
};

/// The result of a compilation step.
pub type ParseResult<T> = Result<T, ParseError>;

/// One entry on the converter's operator stack.
///
/// Parentheses live on the same stack as the operators they fence off. A call
/// entry is the boundary marker for a function's argument list and carries the
/// argument count accumulated so far, so the count can never drift out of step
/// with the call nesting.
enum StackEntry {
    /// A pending operator waiting for its right-hand side.
    Operator(Operator),
    /// A plain grouping parenthesis.
    Grouping,
    /// The opening parenthesis of a function call.
    Call {
        /// The name of the called function.
        name:           String,
        /// Arguments completed so far; the final count plus one is the arity.
        argument_count: usize,
    },
}

/// Compiles a formula into a postfix [`Program`].
///
/// The expression is wrapped in one implicit parenthesis pair before scanning,
/// so a well-formed input always drains the operator stack through the
/// ordinary close-parenthesis path. Conversion is a single left-to-right pass:
/// values are emitted immediately, operators wait on a stack until an operator
/// of no higher precedence (or a parenthesis) forces them out.
///
/// Grouping that does not change meaning does not change the result:
/// `1 + 2 * 3` and `((1 + 2 * 3))` compile to equal programs.
///
/// A `-` where a value is expected (at the start, after `(`, after `,`, or
/// after another operator) is arithmetic negation; everywhere else it is
/// subtraction. `!` is always prefix. Prefix operators go on the stack without
/// popping anything, since their operand has not been emitted yet.
///
/// Function names are not resolved here: a call only has its argument count
/// checked against the registry-wide ceiling [`MAX_ARITY`]. Whether the name
/// exists, and whether its arity matches, is the evaluator's concern.
///
/// # Errors
/// - [`ParseError::InvalidCharacter`] / [`ParseError::ExpectedDigitAfterDot`]
///   from the scan.
/// - [`ParseError::UnmatchedCloseParen`] for a `)` with no opener.
/// - [`ParseError::MisplacedComma`] for a `,` outside a call's argument list.
/// - [`ParseError::TooManyArguments`] for a call with more than [`MAX_ARITY`]
///   arguments.
/// - [`ParseError::MissingCloseParen`] when input ends with a parenthesis
///   still open.
///
/// # Examples
/// ```
/// use formula::compiler::shunting_yard::compile;
///
/// let program = compile("1 + 2 * 3").unwrap();
/// assert_eq!(program.to_string(), "1 2 3 * +");
///
/// // Exponentiation groups to the right, negation binds below it.
/// assert_eq!(compile("2 ^ 3 ^ 2").unwrap().to_string(), "2 3 2 ^ ^");
/// assert_eq!(compile("-2 ^ 2").unwrap().to_string(), "2 2 ^ neg");
///
/// assert!(compile("(1 + 2").is_err());
/// ```
pub fn compile(expression: &str) -> ParseResult<Program> {
    let wrapped = format!("({expression})");
    let tokens = tokenize(&wrapped)?;

    let mut yard = ShuntingYard::new();
    let mut stream = tokens.into_iter().peekable();

    while let Some(token) = stream.next() {
        match token {
            Token::Number(text) => yard.emit_value(Instruction::Number(text)),
            Token::Identifier(name) => {
                if matches!(stream.peek(), Some(Token::OpenParen)) {
                    stream.next();
                    yard.open_call(name);
                } else {
                    yard.emit_value(Instruction::Variable(name));
                }
            },
            Token::OpenParen => yard.open_grouping(),
            Token::CloseParen => yard.close_group()?,
            Token::Comma => yard.next_argument()?,
            Token::Sub => {
                if yard.expecting_value {
                    yard.push_prefix(Operator::Negate);
                } else {
                    yard.push_infix(Operator::Sub);
                }
            },
            Token::Not => yard.push_prefix(Operator::Not),
            Token::And => yard.push_infix(Operator::And),
            Token::Or => yard.push_infix(Operator::Or),
            Token::Equal => yard.push_infix(Operator::Equal),
            Token::NotEqual => yard.push_infix(Operator::NotEqual),
            Token::Less => yard.push_infix(Operator::Less),
            Token::LessEqual => yard.push_infix(Operator::LessEqual),
            Token::Greater => yard.push_infix(Operator::Greater),
            Token::GreaterEqual => yard.push_infix(Operator::GreaterEqual),
            Token::Add => yard.push_infix(Operator::Add),
            Token::Mul => yard.push_infix(Operator::Mul),
            Token::Div => yard.push_infix(Operator::Div),
            Token::Power => yard.push_infix(Operator::Power),
        }
    }

    yard.finish()
}

/// Working state of one conversion pass.
struct ShuntingYard {
    /// Pending operators and parenthesis markers.
    operators:       Vec<StackEntry>,
    /// The postfix instructions emitted so far.
    output:          Vec<Instruction>,
    /// Whether the next token sits where a value belongs. Decides between
    /// subtraction and negation for `-`.
    expecting_value: bool,
}

impl ShuntingYard {
    fn new() -> Self {
        Self { operators:       Vec::new(),
               output:          Vec::new(),
               expecting_value: true, }
    }

    /// Emits a literal or variable reference straight to the output.
    fn emit_value(&mut self, instruction: Instruction) {
        self.output.push(instruction);
        self.expecting_value = false;
    }

    /// Opens a plain grouping parenthesis.
    fn open_grouping(&mut self) {
        self.operators.push(StackEntry::Grouping);
        self.expecting_value = true;
    }

    /// Opens a function call: the name waits on the stack until its `)`
    /// resolves the arity.
    fn open_call(&mut self, name: String) {
        self.operators.push(StackEntry::Call { name,
                                               argument_count: 0, });
        self.expecting_value = true;
    }

    /// Pushes an infix operator, first emitting every stacked operator that
    /// binds at least as tightly.
    ///
    /// A stacked operator of equal precedence is emitted only when the
    /// incoming operator is left-associative; that keeps `10 - 2 - 3` grouped
    /// as `(10 - 2) - 3` while `2 ^ 3 ^ 2` stays `2 ^ (3 ^ 2)`.
    fn push_infix(&mut self, operator: Operator) {
        while let Some(StackEntry::Operator(top)) = self.operators.last() {
            if top.precedence() < operator.precedence()
               || (top.precedence() == operator.precedence()
                   && operator.is_right_associative())
            {
                break;
            }
            self.output.push(Instruction::Operator(*top));
            self.operators.pop();
        }
        self.operators.push(StackEntry::Operator(operator));
        self.expecting_value = true;
    }

    /// Pushes a prefix operator without popping: its operand is still ahead
    /// in the input, so nothing below it can be complete yet.
    fn push_prefix(&mut self, operator: Operator) {
        self.operators.push(StackEntry::Operator(operator));
        self.expecting_value = true;
    }

    /// Finishes one call argument at a `,`.
    ///
    /// Stacked operators belong to the argument just completed and are
    /// emitted. The entry left on top must be a call boundary; a comma whose
    /// nearest open parenthesis is a plain grouping (or nothing at all) is
    /// outside any argument list.
    fn next_argument(&mut self) -> ParseResult<()> {
        while let Some(StackEntry::Operator(top)) = self.operators.last() {
            self.output.push(Instruction::Operator(*top));
            self.operators.pop();
        }

        match self.operators.last_mut() {
            Some(StackEntry::Call { argument_count, .. }) => {
                *argument_count += 1;
                self.expecting_value = true;
                Ok(())
            },
            _ => Err(ParseError::MisplacedComma),
        }
    }

    /// Closes the nearest parenthesis at a `)`.
    ///
    /// Operators above the parenthesis are emitted in pop order. A grouping
    /// marker is discarded; a call marker resolves to arity `count + 1` and
    /// emits the call instruction, after checking the registry-wide ceiling.
    /// An empty argument list still counts as one argument by that rule; the
    /// mismatch surfaces when the call executes.
    fn close_group(&mut self) -> ParseResult<()> {
        loop {
            match self.operators.pop() {
                Some(StackEntry::Operator(operator)) => {
                    self.output.push(Instruction::Operator(operator));
                },
                Some(StackEntry::Grouping) => {
                    self.expecting_value = false;
                    return Ok(());
                },
                Some(StackEntry::Call { name, argument_count }) => {
                    let arity = argument_count + 1;
                    if arity > MAX_ARITY {
                        return Err(ParseError::TooManyArguments { name, count: arity });
                    }
                    self.output.push(Instruction::Call { name, arity });
                    self.expecting_value = false;
                    return Ok(());
                },
                None => return Err(ParseError::UnmatchedCloseParen),
            }
        }
    }

    /// Drains the stack at end of input and hands over the program.
    ///
    /// A parenthesis marker still on the stack means an opener was never
    /// closed. With the implicit outer pair in place, a well-formed input
    /// reaches this point with the stack already empty.
    fn finish(mut self) -> ParseResult<Program> {
        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::Operator(operator) => {
                    self.output.push(Instruction::Operator(operator));
                },
                StackEntry::Grouping | StackEntry::Call { .. } => {
                    return Err(ParseError::MissingCloseParen);
                },
            }
        }

        Ok(Program::new(self.output))
    }
}
