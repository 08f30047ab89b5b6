//! Dotted path representation for navigating a state tree.
//!
//! A path such as `"users.0.name"` is a sequence of segments. A segment that
//! is a canonical non-negative decimal integer is an index; every other
//! segment is a key. When an index lands on a mapping it addresses the key
//! spelled by the same digits.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A single segment in a dotted path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Seg {
    /// Mapping key access.
    Key(String),
    /// Sequence index access (or the digit key of a mapping).
    Index(usize),
}

impl Seg {
    /// Classify a raw dotted segment.
    ///
    /// Only canonical decimal integers become indexes: `"0"` and `"12"` do,
    /// `"007"`, `"-1"` and `"+3"` stay keys so their spelling survives. This
    /// is narrower than a loose "parses as a number" test (which would turn
    /// all of those into indexes), so a missing node addressed by such a
    /// segment is created as a mapping, not a sequence.
    pub fn parse(raw: &str) -> Self {
        let canonical = !raw.is_empty()
            && raw.bytes().all(|b| b.is_ascii_digit())
            && (raw == "0" || !raw.starts_with('0'));
        match raw.parse::<usize>() {
            Ok(index) if canonical => Seg::Index(index),
            _ => Seg::Key(raw.to_owned()),
        }
    }

    /// Returns true if this is an index segment.
    #[inline]
    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    /// The mapping key this segment addresses.
    #[inline]
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            Seg::Key(k) => Cow::Borrowed(k),
            Seg::Index(i) => Cow::Owned(i.to_string()),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => f.write_str(k),
            Seg::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::parse(&s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::parse(s)
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A complete path into a state tree. The empty path is the root.
///
/// # Examples
///
/// ```
/// use tessera_state::{Path, Seg};
///
/// let path = Path::parse("users.0.name");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1], Seg::Index(0));
/// assert_eq!(path.to_dotted(), "users.0.name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path(Vec<Seg>);

impl Path {
    /// Create an empty path (root).
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse a dotted path. Empty segments are skipped, so `""` is the root.
    pub fn parse(dotted: &str) -> Self {
        dotted
            .split('.')
            .filter(|raw| !raw.is_empty())
            .map(Seg::parse)
            .collect()
    }

    /// Push a segment onto the path (mutating).
    #[inline]
    pub fn push(&mut self, seg: Seg) {
        self.0.push(seg);
    }

    /// Get the segments of this path.
    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    /// Check if this path is empty (root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of segments in this path.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Join this path with another path.
    #[inline]
    pub fn join(&self, other: &Path) -> Path {
        let mut result = self.clone();
        result.0.extend(other.0.iter().cloned());
        result
    }

    /// Get a slice of segments from start to end.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> Path {
        Path(self.0[start..end].to_vec())
    }

    /// Render the dotted form accepted by [`Path::parse`].
    pub fn to_dotted(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&seg.as_key());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("$")
        } else {
            f.write_str(&self.to_dotted())
        }
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::parse(&s)
    }
}

/// A bare number is a single-segment path (`123` behaves like `"123"`).
impl From<usize> for Path {
    fn from(i: usize) -> Self {
        Path(vec![Seg::Index(i)])
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for Path {
    type Output = Seg;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dotted())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPath {
            Dotted(String),
            Number(usize),
        }

        Ok(match RawPath::deserialize(deserializer)? {
            RawPath::Dotted(dotted) => Path::parse(&dotted),
            RawPath::Number(n) => Path::from(n),
        })
    }
}

/// Construct a `Path` from a sequence of segments.
///
/// # Examples
///
/// ```
/// use tessera_state::path;
///
/// // Numbers and digit strings become Index segments
/// let p = path!("items", 0, "name");
/// assert_eq!(p, path!("items", "0", "name"));
/// ```
#[macro_export]
macro_rules! path {
    (@seg $seg:expr) => {
        $crate::Seg::from($seg)
    };
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::root();
        $(
            p.push($crate::path!(@seg $seg));
        )+
        p
    }};
}
