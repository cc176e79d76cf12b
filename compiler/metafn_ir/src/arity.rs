//! Arity Catalog
//!
//! The fixed, ordered set of function arities the generator targets.
//! Arity `i` needs the type parameters `T0..T(i-1)` and maps raw argument
//! slot `j` to `Tj`.

use std::fmt;

/// Highest supported arity. Calls needing more arguments have no overload.
pub const MAX_ARITY: usize = 10;

const TYPE_PARAMS: [&str; MAX_ARITY] = ["T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9"];

/// Number of typed parameters of a generated function shape (`0..=10`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Arity(u8);

impl Arity {
    /// Every arity in ascending order.
    pub const ALL: [Arity; MAX_ARITY + 1] = [
        Arity(0),
        Arity(1),
        Arity(2),
        Arity(3),
        Arity(4),
        Arity(5),
        Arity(6),
        Arity(7),
        Arity(8),
        Arity(9),
        Arity(10),
    ];

    /// Look up an arity, `None` past the ceiling.
    pub fn new(n: usize) -> Option<Self> {
        Self::ALL.get(n).copied()
    }

    #[inline]
    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    /// Type parameters introduced by an overload of this arity.
    pub fn type_params(self) -> &'static [&'static str] {
        &TYPE_PARAMS[..self.get()]
    }

    /// `(slot, type parameter)` pairs: raw argument `slot` is cast to the paired parameter.
    pub fn slots(self) -> impl Iterator<Item = (usize, &'static str)> {
        self.type_params().iter().copied().enumerate()
    }

    /// Name of the function-shape interface for this arity (`F0`..`F10`).
    pub fn shape_name(self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }

    /// Whether `name` is one of the type parameters any arity introduces.
    pub fn is_reserved_type_param(name: &str) -> bool {
        TYPE_PARAMS.contains(&name)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
