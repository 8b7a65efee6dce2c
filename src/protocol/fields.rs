//! Named field values supplied to the encoder

use std::collections::BTreeMap;
use std::fmt;

/// A numeric value destined for one payload slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point
    Float(f64),
}

impl FieldValue {
    /// Integer view of the value, `None` for floats
    #[must_use]
    pub const fn as_integer(self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(v as i128),
            Self::UInt(v) => Some(v as i128),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_from!(Int: i8, i16, i32, i64);
impl_from!(UInt: u8, u16, u32, u64);
impl_from!(Float: f32, f64);

/// Mapping of field name to value for one message kind
///
/// ```rust
/// use mavsim::{Fields, MessageKind, Encoder};
///
/// let fields = Fields::new()
///     .with("voltage_battery", 12_800u16)
///     .with("current_battery", -600i16)
///     .with("battery_remaining", 80i8);
///
/// let mut encoder = Encoder::new(1, 1);
/// let message = encoder.encode(MessageKind::SystemStatus, &fields)?;
/// assert_eq!(message.len(), 39);
/// # Ok::<(), mavsim::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    values: BTreeMap<String, FieldValue>,
}

impl Fields {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a value by field name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).copied()
    }

    /// Remove a value, returning it if present
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.remove(name)
    }

    /// Number of supplied values
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were supplied
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.set(name, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let fields = Fields::new().with("a", 1u8).with("b", -2i16).with("c", 0.5f32);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("a"), Some(FieldValue::UInt(1)));
        assert_eq!(fields.get("b"), Some(FieldValue::Int(-2)));
        assert_eq!(fields.get("c"), Some(FieldValue::Float(0.5)));
        assert_eq!(fields.get("d"), None);
    }

    #[test]
    fn test_set_replaces() {
        let mut fields = Fields::new().with("a", 1u8);
        fields.set("a", 7u8);
        assert_eq!(fields.get("a"), Some(FieldValue::UInt(7)));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_collect_from_pairs() {
        let fields: Fields = [("x", 1i64), ("y", 2i64)].into_iter().collect();
        let names: Vec<_> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["x", "y"]);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(FieldValue::UInt(u64::MAX).as_integer(), Some(i128::from(u64::MAX)));
        assert_eq!(FieldValue::Float(1.0).as_integer(), None);
    }
}
