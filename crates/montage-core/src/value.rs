//! Coordinate values and the multi-dimensional keys built from them.
//!
//! A [`Value`] is a single coordinate along a dimension. A [`Key`] is an
//! ordered tuple of values identifying one position in an N-dimensional
//! parameter space, one value per key dimension of the owning container.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

/// A single coordinate value.
///
/// Equality, hashing and ordering are structural: floats compare by bit
/// pattern and an integer never equals a float, so values can be used as map
/// keys. Mixed integer and float values are ordered numerically, with the
/// integer first when the magnitudes tie. Use [`Value::cmp_coordinate`] and
/// [`Value::eq_coordinate`] to compare by magnitude alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Str(_) => None,
        }
    }

    /// Returns the string contents if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` for integer and float values.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Str(_))
    }

    /// Compares two coordinates by magnitude.
    ///
    /// Integers and floats compare numerically with each other, strings only
    /// with strings. Returns `None` for incomparable values.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::cmp::Ordering;
    /// # use montage_core::value::Value;
    /// assert_eq!(Value::from(1).cmp_coordinate(&Value::from(1.0)), Some(Ordering::Equal));
    /// assert_eq!(Value::from("a").cmp_coordinate(&Value::from(1)), None);
    /// ```
    pub fn cmp_coordinate(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::Str(_), _) | (_, Self::Str(_)) => None,
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }

    /// Returns `true` if both coordinates have the same magnitude, so that
    /// `1` and `1.0` are the same coordinate.
    pub fn eq_coordinate(&self, other: &Self) -> bool {
        self.cmp_coordinate(other) == Some(Ordering::Equal)
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Self::Int(_) => 0,
            Self::Float(_) => 1,
            Self::Str(_) => 2,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Some(a.total_cmp(b)),
            (Self::Str(_), _) | (_, Self::Str(_)) => self.cmp_coordinate(other),
            _ => match self.cmp_coordinate(other) {
                Some(Ordering::Equal) | None => {
                    Some(self.variant_rank().cmp(&other.variant_rank()))
                }
                ordering => ordering,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "'{value}'"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// An ordered coordinate tuple addressing one entry of a keyed container.
///
/// # Example
///
/// ```
/// # use montage_core::value::{Key, Value};
/// let key = Key::from((1, "left"));
/// assert_eq!(key.arity(), 2);
/// assert_eq!(key.values()[1], Value::from("left"));
/// assert_eq!(key.to_string(), "(1, 'left')");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key(Vec<Value>);

impl Key {
    /// Creates a key from its coordinate values.
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Returns the number of coordinates in this key.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Returns the coordinate values in dimension order.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Returns the coordinate at the given dimension index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "{single}"),
            values => {
                write!(f, "(")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Self(vec![value])
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self(vec![value.into()])
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self(vec![value.into()])
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self(vec![value.into()])
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(vec![value.into()])
    }
}

impl<A, B> From<(A, B)> for Key
where
    A: Into<Value>,
    B: Into<Value>,
{
    fn from((a, b): (A, B)) -> Self {
        Self(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for Key
where
    A: Into<Value>,
    B: Into<Value>,
    C: Into<Value>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self(vec![a.into(), b.into(), c.into()])
    }
}
