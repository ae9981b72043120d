/// Numeric helpers shared by the compiler and the machine.
///
/// This module provides the literal parse used when number instructions
/// execute, and the two sides of the numeric truth convention: comparisons
/// and logic produce `1.0` or `0.0`, and any non-zero operand counts as true.
pub mod num;
