use std::collections::HashMap;

use crate::machine::memory;

/// The largest arity any registered function can have.
///
/// Natives take one or two arguments by construction, so the converter can
/// reject a call with three or more arguments before knowing which function
/// it names.
pub const MAX_ARITY: usize = 2;

/// A registered native function.
///
/// The variant fixes the arity: a function takes exactly one or exactly two
/// `f64` arguments and returns one `f64`. Natives cannot fail; anything
/// exceptional is expressed in the result value (IEEE specials, or a sentinel
/// like [`memory::OUT_OF_RANGE`]).
#[derive(Debug, Clone, Copy)]
pub enum NativeFunction {
    /// A one-argument function such as `sin`.
    Unary(fn(f64) -> f64),
    /// A two-argument function such as `atan2`.
    Binary(fn(f64, f64) -> f64),
}

impl NativeFunction {
    /// Returns the number of arguments this function takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

impl From<fn(f64) -> f64> for NativeFunction {
    fn from(function: fn(f64) -> f64) -> Self {
        Self::Unary(function)
    }
}

impl From<fn(f64, f64) -> f64> for NativeFunction {
    fn from(function: fn(f64, f64) -> f64) -> Self {
        Self::Binary(function)
    }
}

/// C-style remainder; the sign follows the dividend.
fn modulo(a: f64, b: f64) -> f64 {
    a % b
}

/// The functions every fresh registry starts with.
///
/// `log` is the natural logarithm. `read` and `write` are the shared scratch
/// memory accessors.
static DEFAULT_FUNCTIONS: &[(&str, NativeFunction)] = &[
    ("acos", NativeFunction::Unary(f64::acos)),
    ("asin", NativeFunction::Unary(f64::asin)),
    ("atan", NativeFunction::Unary(f64::atan)),
    ("atan2", NativeFunction::Binary(f64::atan2)),
    ("cos", NativeFunction::Unary(f64::cos)),
    ("cosh", NativeFunction::Unary(f64::cosh)),
    ("exp", NativeFunction::Unary(f64::exp)),
    ("abs", NativeFunction::Unary(f64::abs)),
    ("mod", NativeFunction::Binary(modulo)),
    ("log", NativeFunction::Unary(f64::ln)),
    ("log2", NativeFunction::Unary(f64::log2)),
    ("log10", NativeFunction::Unary(f64::log10)),
    ("pow", NativeFunction::Binary(f64::powf)),
    ("sin", NativeFunction::Unary(f64::sin)),
    ("sinh", NativeFunction::Unary(f64::sinh)),
    ("tan", NativeFunction::Unary(f64::tan)),
    ("tanh", NativeFunction::Unary(f64::tanh)),
    ("sqrt", NativeFunction::Unary(f64::sqrt)),
    ("ceil", NativeFunction::Unary(f64::ceil)),
    ("floor", NativeFunction::Unary(f64::floor)),
    ("max", NativeFunction::Binary(f64::max)),
    ("min", NativeFunction::Binary(f64::min)),
    ("read", NativeFunction::Unary(memory::read)),
    ("write", NativeFunction::Binary(memory::write)),
];

/// Maps function names to native callables.
///
/// A registry starts either empty ([`FunctionRegistry::new`]) or loaded with
/// the default table ([`FunctionRegistry::with_defaults`]). Registering a name
/// that already exists replaces the old entry silently, so a formula host can
/// rebind a builtin between compilations.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    entries: HashMap<String, NativeFunction>,
}

#[allow(clippy::new_without_default)]
impl FunctionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Creates a registry loaded with the default function table.
    ///
    /// ## Example
    /// ```
    /// use formula::machine::functions::FunctionRegistry;
    ///
    /// let registry = FunctionRegistry::with_defaults();
    /// assert_eq!(registry.lookup("sin").unwrap().arity(), 1);
    /// assert_eq!(registry.lookup("atan2").unwrap().arity(), 2);
    /// assert!(registry.lookup("bark").is_none());
    /// ```
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.install_defaults();
        registry
    }

    /// Registers a function under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &str, function: NativeFunction) {
        self.entries.insert(name.to_string(), function);
    }

    /// Registers a one-argument function under `name`.
    ///
    /// ## Example
    /// ```
    /// use formula::machine::functions::FunctionRegistry;
    ///
    /// fn double(x: f64) -> f64 {
    ///     x * 2.0
    /// }
    ///
    /// let mut registry = FunctionRegistry::new();
    /// registry.register_unary("double", double);
    /// assert_eq!(registry.lookup("double").unwrap().arity(), 1);
    /// ```
    pub fn register_unary(&mut self, name: &str, function: fn(f64) -> f64) {
        self.register(name, function.into());
    }

    /// Registers a two-argument function under `name`.
    pub fn register_binary(&mut self, name: &str, function: fn(f64, f64) -> f64) {
        self.register(name, function.into());
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NativeFunction> {
        self.entries.get(name).copied()
    }

    /// Removes every registered function, defaults included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Adds the default function table, replacing same-named entries.
    pub fn install_defaults(&mut self) {
        for (name, function) in DEFAULT_FUNCTIONS {
            self.register(name, *function);
        }
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Tests whether the registry has no functions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
