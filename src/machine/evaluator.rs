use std::collections::HashMap;

use crate::{
    error::RuntimeError,
    machine::functions::{FunctionRegistry, NativeFunction},
    program::{Instruction, Operator, Program},
    util::num::{is_true, parse_number, truth_value},
};

/// The result of running a program or part of one.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Executes compiled programs against a function registry and a set of
/// variable bindings.
///
/// The evaluator holds no per-run state: [`Evaluator::run`] borrows it
/// immutably and keeps its operand stack on the call frame, so one evaluator
/// can run many programs, or the same program many times with different
/// variable bindings in between.
pub struct Evaluator {
    functions: FunctionRegistry,
    variables: HashMap<String, f64>,
}

#[allow(clippy::new_without_default)]
impl Evaluator {
    /// Creates an evaluator with the default function registry and no
    /// variable bindings.
    #[must_use]
    pub fn new() -> Self {
        Self { functions: FunctionRegistry::with_defaults(),
               variables: HashMap::new(), }
    }

    /// Returns the function registry.
    #[must_use]
    pub const fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Returns the function registry for modification.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Restores the function registry to the default table, dropping every
    /// other registration.
    pub fn reset_functions(&mut self) {
        self.functions.clear();
        self.functions.install_defaults();
    }

    /// Binds `name` to `value`, replacing any previous binding.
    ///
    /// ## Example
    /// ```
    /// use formula::{compiler::shunting_yard::compile, machine::evaluator::Evaluator};
    ///
    /// let program = compile("x ^ 2 + 1").unwrap();
    ///
    /// let mut evaluator = Evaluator::new();
    /// evaluator.set_variable("x", 3.0);
    /// assert_eq!(evaluator.run(&program).unwrap(), 10.0);
    ///
    /// evaluator.set_variable("x", 4.0);
    /// assert_eq!(evaluator.run(&program).unwrap(), 17.0);
    /// ```
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.variables.insert(name.to_string(), value);
    }

    /// Returns the current binding of `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    /// Drops every variable binding.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }

    /// Runs a compiled program and returns the value left on top of the
    /// operand stack.
    ///
    /// Instructions execute left to right: literals and variables push,
    /// operators pop their operands (right-hand side first) and push one
    /// result, calls look up the named function, re-check its arity, and
    /// invoke it the same way. Arithmetic follows IEEE `f64` semantics
    /// throughout; dividing by zero yields an infinity, not an error.
    ///
    /// # Errors
    /// - [`RuntimeError::MalformedNumber`] if a literal's text cannot be read
    ///   as a value.
    /// - [`RuntimeError::UnknownVariable`] / [`RuntimeError::UnknownFunction`]
    ///   for names with no binding or registration.
    /// - [`RuntimeError::ArgumentCountMismatch`] if a call's compiled arity
    ///   differs from the registered function's.
    /// - [`RuntimeError::StackUnderflow`] if an instruction needs more
    ///   operands than the stack holds.
    /// - [`RuntimeError::MissingResult`] if the program leaves the stack
    ///   empty, as the empty program does.
    ///
    /// # Examples
    /// ```
    /// use formula::{compiler::shunting_yard::compile, machine::evaluator::Evaluator};
    ///
    /// let evaluator = Evaluator::new();
    ///
    /// let program = compile("max(2 ^ 3 ^ 2, 100)").unwrap();
    /// assert_eq!(evaluator.run(&program).unwrap(), 512.0);
    ///
    /// let divide = compile("1 / 0").unwrap();
    /// assert_eq!(evaluator.run(&divide).unwrap(), f64::INFINITY);
    /// ```
    pub fn run(&self, program: &Program) -> EvalResult<f64> {
        let mut stack: Vec<f64> = Vec::new();

        for instruction in program.instructions() {
            match instruction {
                Instruction::Number(text) => {
                    let value = parse_number(text).ok_or_else(|| {
                                                      RuntimeError::MalformedNumber { literal: text.clone(), }
                                                  })?;
                    stack.push(value);
                },

                Instruction::Variable(name) => {
                    let value = self.variables
                                    .get(name)
                                    .copied()
                                    .ok_or_else(|| RuntimeError::UnknownVariable { name: name.clone(), })?;
                    stack.push(value);
                },

                Instruction::Operator(operator) => {
                    let value = if operator.arity() == 1 {
                        let operand = pop_operand(&mut stack, instruction)?;
                        unary_value(*operator, operand)
                    } else {
                        let right = pop_operand(&mut stack, instruction)?;
                        let left = pop_operand(&mut stack, instruction)?;
                        binary_value(*operator, left, right)
                    };
                    stack.push(value);
                },

                Instruction::Call { name, arity } => {
                    let function = self.functions
                                       .lookup(name)
                                       .ok_or_else(|| RuntimeError::UnknownFunction { name: name.clone(), })?;
                    if function.arity() != *arity {
                        return Err(RuntimeError::ArgumentCountMismatch { name:     name.clone(),
                                                                         expected: function.arity(),
                                                                         found:    *arity, });
                    }
                    let value = match function {
                        NativeFunction::Unary(call) => {
                            let argument = pop_operand(&mut stack, instruction)?;
                            call(argument)
                        },
                        NativeFunction::Binary(call) => {
                            let second = pop_operand(&mut stack, instruction)?;
                            let first = pop_operand(&mut stack, instruction)?;
                            call(first, second)
                        },
                    };
                    stack.push(value);
                },
            }
        }

        stack.pop().ok_or(RuntimeError::MissingResult)
    }
}

/// Pops one operand for `instruction`, or reports which instruction starved.
fn pop_operand(stack: &mut Vec<f64>, instruction: &Instruction) -> EvalResult<f64> {
    stack.pop().ok_or_else(|| RuntimeError::StackUnderflow { instruction: instruction.to_string(), })
}

/// Applies a one-operand operator.
fn unary_value(operator: Operator, operand: f64) -> f64 {
    match operator {
        Operator::Negate => -operand,
        Operator::Not => truth_value(!is_true(operand)),
        binary => unreachable!("'{binary}' takes two operands"),
    }
}

/// Applies a two-operand operator.
///
/// Comparisons and logic return `1.0` or `0.0`; any non-zero operand counts
/// as true on the way in.
fn binary_value(operator: Operator, left: f64, right: f64) -> f64 {
    use Operator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Power,
        Sub,
    };

    match operator {
        Or => truth_value(is_true(left) || is_true(right)),
        And => truth_value(is_true(left) && is_true(right)),
        Equal => truth_value(left == right),
        NotEqual => truth_value(left != right),
        Less => truth_value(left < right),
        LessEqual => truth_value(left <= right),
        Greater => truth_value(left > right),
        GreaterEqual => truth_value(left >= right),
        Add => left + right,
        Sub => left - right,
        Mul => left * right,
        Div => left / right,
        Power => left.powf(right),
        unary => unreachable!("'{unary}' takes one operand"),
    }
}
