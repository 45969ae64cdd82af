//! Names an expression may refer to.
//!
//! A [`Namespace`] is the fixed builtin table (one constant and twelve
//! numeric functions) plus the variables a caller binds for one evaluation.
//! Nothing else resolves.

use std::collections::BTreeMap;

use ndarray::ArrayD;

/// A builtin constant or elementwise function.
#[derive(Debug, Clone, Copy)]
pub enum Builtin {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Builtin {
    /// Number of arguments a call must supply, or `None` for constants.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Builtin::Constant(_) => None,
            Builtin::Unary(_) => Some(1),
            Builtin::Binary(_) => Some(2),
        }
    }
}

fn cot(x: f64) -> f64 {
    1.0 / x.tan()
}

fn sec(x: f64) -> f64 {
    1.0 / x.cos()
}

fn cosec(x: f64) -> f64 {
    1.0 / x.sin()
}

/// The builtin table, sorted by name.
static BUILTINS: &[(&str, Builtin)] = &[
    ("abs", Builtin::Unary(f64::abs)),
    ("cos", Builtin::Unary(f64::cos)),
    ("cosec", Builtin::Unary(cosec)),
    ("cot", Builtin::Unary(cot)),
    ("exp", Builtin::Unary(f64::exp)),
    ("ln", Builtin::Unary(f64::ln)),
    ("log", Builtin::Unary(f64::ln)),
    ("pi", Builtin::Constant(std::f64::consts::PI)),
    ("power", Builtin::Binary(f64::powf)),
    ("sec", Builtin::Unary(sec)),
    ("sin", Builtin::Unary(f64::sin)),
    ("sqrt", Builtin::Unary(f64::sqrt)),
    ("tan", Builtin::Unary(f64::tan)),
];

/// Look up a builtin by name.
pub fn builtin(name: &str) -> Option<&'static Builtin> {
    BUILTINS
        .binary_search_by(|(entry, _)| (*entry).cmp(name))
        .ok()
        .map(|i| &BUILTINS[i].1)
}

/// A resolved name.
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Variable(&'a ArrayD<f64>),
    Builtin(&'static Builtin),
}

/// Builtins plus per-evaluation variable bindings.
///
/// Bound variables shadow builtins of the same name.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    variables: BTreeMap<String, ArrayD<f64>>,
}

impl Namespace {
    /// A namespace holding only the builtins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any earlier binding.
    pub fn bind(&mut self, name: impl Into<String>, value: ArrayD<f64>) {
        self.variables.insert(name.into(), value);
    }

    /// Builder form of [`Namespace::bind`].
    pub fn with(mut self, name: impl Into<String>, value: ArrayD<f64>) -> Self {
        self.bind(name, value);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<Entry<'_>> {
        if let Some(value) = self.variables.get(name) {
            return Some(Entry::Variable(value));
        }
        builtin(name).map(Entry::Builtin)
    }

    /// Names of the bound variables.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }
}
