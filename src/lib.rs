//! # formula
//!
//! formula is a compiler and stack-machine evaluator for one-line arithmetic
//! and boolean formulas. It converts infix text into a flat postfix program,
//! then executes that program against a registry of named functions, a set of
//! variable bindings, and a process-wide scratch memory shared by every
//! evaluator in the process.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::ParseError, machine::evaluator::Evaluator, program::Program};

/// Turns formula text into postfix programs.
///
/// This module contains the two compilation phases: the lexer, which scans
/// the raw text into tokens, and the shunting-yard converter, which reorders
/// the tokens into a flat postfix instruction sequence. Compilation never
/// evaluates anything; number literals pass through as text.
///
/// # Responsibilities
/// - Scans formula text into the token set of the language.
/// - Converts token streams into postfix programs.
/// - Reports every compile-time error as a [`error::ParseError`].
pub mod compiler;
/// Provides unified error types for compilation and execution.
///
/// This module defines all errors that can be raised while compiling or
/// running a formula. It standardizes error reporting and carries the
/// offending names, characters, and counts so failures can be shown to the
/// person who wrote the formula.
///
/// # Responsibilities
/// - Defines one error enum per phase: parse and runtime.
/// - Carries detail fields (names, literals, counts) on each variant.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Executes compiled programs.
///
/// This module is the machine the compiler targets: a stack evaluator, the
/// native function registry it calls into, and the process-wide scratch
/// memory the `read`/`write` builtins address.
///
/// # Responsibilities
/// - Runs postfix programs against an operand stack.
/// - Manages function registration and variable bindings.
/// - Owns the shared scratch cells and their sentinel semantics.
pub mod machine;
/// Defines the structure of compiled formulas.
///
/// This module declares the instruction and operator types that represent a
/// compiled formula as a flat postfix sequence. Programs are built by the
/// compiler and consumed by the machine, and display as a normalized
/// space-delimited string.
///
/// # Responsibilities
/// - Defines the operator set with precedence, associativity, and arity.
/// - Defines the instruction set and the `Program` container.
/// - Renders programs in a stable textual form.
pub mod program;
/// General numeric utilities.
///
/// This module provides the lenient literal parse and the numeric truth
/// convention helpers used by the machine.
pub mod util;

pub use crate::compiler::shunting_yard::compile;

/// A compiled formula paired with the evaluator that runs it.
///
/// `Formula` is the convenient way to hold a formula for repeated evaluation:
/// compile once with [`Formula::new`], adjust variable bindings between runs,
/// and call [`Formula::evaluate`] as often as needed. Replacing the text with
/// [`Formula::set_expression`] restores the function registry to the default
/// table first, so one formula's rebindings never leak into the next.
///
/// ## Example
/// ```
/// use formula::Formula;
///
/// let mut formula = Formula::new("max(x, 2) * 10").unwrap();
///
/// formula.set_variable("x", 3.5);
/// assert_eq!(formula.evaluate().unwrap(), 35.0);
///
/// formula.set_variable("x", 0.5);
/// assert_eq!(formula.evaluate().unwrap(), 20.0);
/// ```
pub struct Formula {
    program:   Program,
    evaluator: Evaluator,
}

impl Formula {
    /// Compiles `expression` and pairs it with a fresh evaluator.
    ///
    /// # Errors
    /// Returns the [`ParseError`] if the expression does not compile.
    pub fn new(expression: &str) -> Result<Self, ParseError> {
        Ok(Self { program:   compile(expression)?,
                  evaluator: Evaluator::new(), })
    }

    /// Replaces the compiled expression.
    ///
    /// The function registry is restored to the default table before
    /// compiling, so builtins rebound for the previous expression do not
    /// carry over. Variable bindings are kept. On failure the previous
    /// program is discarded, not kept: a formula whose last compile failed
    /// evaluates to a missing-result error rather than running stale
    /// instructions.
    ///
    /// # Errors
    /// Returns the [`ParseError`] if the expression does not compile.
    pub fn set_expression(&mut self, expression: &str) -> Result<(), ParseError> {
        self.evaluator.reset_functions();
        self.program = Program::default();

        self.program = compile(expression)?;
        Ok(())
    }

    /// Returns the compiled program.
    #[must_use]
    pub const fn program(&self) -> &Program {
        &self.program
    }

    /// Returns the evaluator.
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Returns the evaluator for modification, e.g. to reach the function
    /// registry.
    pub fn evaluator_mut(&mut self) -> &mut Evaluator {
        &mut self.evaluator
    }

    /// Binds `name` to `value` for subsequent evaluations.
    pub fn set_variable(&mut self, name: &str, value: f64) {
        self.evaluator.set_variable(name, value);
    }

    /// Registers `function` under `name`, replacing any previous entry.
    ///
    /// The registration lasts until [`Formula::set_expression`] resets the
    /// registry.
    pub fn register_function(&mut self, name: &str, function: machine::functions::NativeFunction) {
        self.evaluator.functions_mut().register(name, function);
    }

    /// Runs the compiled program with the current bindings.
    ///
    /// # Errors
    /// Returns the [`error::RuntimeError`] if execution fails.
    pub fn evaluate(&self) -> Result<f64, error::RuntimeError> {
        self.evaluator.run(&self.program)
    }
}

/// Compiles and evaluates `expression` in one step.
///
/// This is the one-shot entry point for formulas with no variables: it
/// compiles the text, runs the program with the default function registry,
/// and returns the result.
///
/// # Errors
/// Returns an error if compilation or evaluation fails.
///
/// # Examples
/// ```
/// use formula::evaluate;
///
/// assert_eq!(evaluate("1 + 2 * 3").unwrap(), 7.0);
/// assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
///
/// // Compile-time failure: the parenthesis is never closed.
/// assert!(evaluate("(1 + 2").is_err());
///
/// // Run-time failure: no such function is registered.
/// assert!(evaluate("bark(1)").is_err());
/// ```
pub fn evaluate(expression: &str) -> Result<f64, Box<dyn std::error::Error>> {
    let formula = Formula::new(expression)?;
    Ok(formula.evaluate()?)
}
