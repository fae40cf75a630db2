//! Node identifiers backed by a global string interner.
//!
//! Mind-map node ids arrive as arbitrary strings (or numbers rendered as
//! strings). Layout, rendering and viewport code pass them around constantly
//! as edge endpoints and parent references, so they are interned once and
//! copied as a symbol afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned node identifier.
///
/// # Examples
///
/// ```
/// use arbor_core::identifier::Id;
///
/// let a = Id::new("1-1");
/// let b: Id = "1-1".into();
/// assert_eq!(a, b);
/// assert_eq!(a, "1-1");
/// assert_eq!(a.to_string(), "1-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates the positional id of a node reached by `path` child indices from the root.
    ///
    /// The root (empty path) is `root`; other nodes join their 1-based
    /// indices with `-`, e.g. `[0, 1]` becomes `1-2`.
    ///
    /// ```
    /// use arbor_core::identifier::Id;
    ///
    /// assert_eq!(Id::from_path(&[]), "root");
    /// assert_eq!(Id::from_path(&[0, 1]), "1-2");
    /// ```
    pub fn from_path(path: &[usize]) -> Self {
        if path.is_empty() {
            return Self::new("root");
        }
        let joined = path
            .iter()
            .map(|index| (index + 1).to_string())
            .collect::<Vec<_>>()
            .join("-");
        Self::new(&joined)
    }

    /// Returns true if the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        interner().resolve(self.0).is_none_or(str::is_empty)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl serde::Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
