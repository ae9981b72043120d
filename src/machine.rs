/// The evaluator module executes compiled programs.
///
/// The evaluator walks a postfix instruction sequence with an `f64` operand
/// stack, resolving variables from its bindings and calls from its function
/// registry. It is the execution engine behind every formula.
///
/// # Responsibilities
/// - Executes instructions left to right against an operand stack.
/// - Resolves variable references and function calls by name.
/// - Reports runtime errors such as unknown names or operand starvation.
pub mod evaluator;
/// The functions module defines the native function registry.
///
/// A registry maps names to native callables of one or two arguments. Every
/// evaluator owns one, pre-loaded with the standard math table plus the
/// scratch memory accessors; hosts can clear it, extend it, or rebind names
/// between compilations.
///
/// # Responsibilities
/// - Stores name → native function entries with fixed arity.
/// - Provides the default table (trigonometry, logs, rounding, `read`/`write`).
/// - Exposes the registry-wide arity ceiling checked at compile time.
pub mod functions;
/// The memory module holds the process-wide scratch cells.
///
/// One fixed array of 441 000 numeric cells is shared by every evaluator in
/// the process, on purpose: formulas running in different hosts use it as a
/// signaling channel. Access is tear-free but otherwise unsynchronized, and
/// out-of-range addresses answer with a sentinel instead of failing.
///
/// # Responsibilities
/// - Owns the zero-initialized global cell array.
/// - Implements `read`/`write` with truncated-float addressing.
/// - Returns the out-of-range sentinel instead of raising errors.
pub mod memory;
