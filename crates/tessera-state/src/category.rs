//! Node categories recognised by the merge primitive.

use crate::{Seg, StateValue};

/// The three node shapes a patch can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// Text, patched by splicing.
    Text,
    /// Sequence, patched by splicing with gap fill.
    Sequence,
    /// Mapping, patched by shallow overwrite.
    Mapping,
}

impl Category {
    /// Classify a value. Scalars and `Null` have no category.
    #[inline]
    pub fn of(value: &StateValue) -> Option<Category> {
        match value {
            StateValue::Text(_) => Some(Category::Text),
            StateValue::Seq(_) => Some(Category::Sequence),
            StateValue::Map(_) => Some(Category::Mapping),
            _ => None,
        }
    }

    /// The container shape a fresh node needs so that `next` can address
    /// into it.
    #[inline]
    pub fn implied_by(next: &Seg) -> Category {
        if next.is_index() {
            Category::Sequence
        } else {
            Category::Mapping
        }
    }

    /// A fresh empty node of this category.
    #[inline]
    pub fn empty(self) -> StateValue {
        match self {
            Category::Text => StateValue::empty_text(),
            Category::Sequence => StateValue::empty_seq(),
            Category::Mapping => StateValue::empty_map(),
        }
    }

    /// Type name, matching [`crate::value_type_name`].
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Category::Text => "string",
            Category::Sequence => "array",
            Category::Mapping => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification() {
        assert_eq!(Category::of(&StateValue::from("x")), Some(Category::Text));
        assert_eq!(Category::of(&StateValue::from(json!([]))), Some(Category::Sequence));
        assert_eq!(Category::of(&StateValue::from(json!({}))), Some(Category::Mapping));
        assert_eq!(Category::of(&StateValue::from(1i64)), None);
        assert_eq!(Category::of(&StateValue::Null), None);
    }

    #[test]
    fn test_implied_by_next_segment() {
        assert_eq!(Category::implied_by(&Seg::parse("0")), Category::Sequence);
        assert_eq!(Category::implied_by(&Seg::parse("three")), Category::Mapping);
    }
}
