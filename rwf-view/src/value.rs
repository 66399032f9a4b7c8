//! Values bound to template attributes.
//!
//! Every attribute visible to a template, whether it came from the renderer,
//! from the data passed to [`crate::Renderer::render`] or from a template assigning it,
//! is stored as a [`Value`].
use crate::Error;

use std::collections::HashMap;

/// A dynamically typed attribute value, e.g. `5` or `"hello world"`.
#[derive(Debug, PartialEq, Clone, Default)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Hash(HashMap<String, Value>),
    #[default]
    Null,
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    write!(f, "{}", v)?;
                    if i < l.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Value::Hash(h) => {
                write!(f, "{{")?;
                for (i, (k, v)) in h.iter().enumerate() {
                    write!(f, "{}: {}", k, v)?;
                    if i < h.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
            // Nothing to print.
            Value::Null => Ok(()),
        }
    }
}

impl Value {
    /// Look up a key in a hash value. Anything other than a hash,
    /// or a missing key, gives back `Null`.
    pub fn key(&self, key: &str) -> Value {
        match self {
            Value::Hash(hash) => hash.get(key).cloned().unwrap_or_default(),
            Value::List(list) => match key.parse::<usize>() {
                Ok(index) => list.get(index).cloned().unwrap_or_default(),
                Err(_) => Value::Null,
            },
            _ => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Convert a Rust type into a template value.
pub trait ToValue {
    fn to_value(&self) -> Result<Value, Error>;
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.clone()))
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.to_string()))
    }
}

macro_rules! impl_integer {
    ($ty:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value, Error> {
                Ok(Value::Integer(*self as i64))
            }
        }
    };
}

impl_integer!(i64);
impl_integer!(i32);
impl_integer!(i16);
impl_integer!(i8);
impl_integer!(u32);
impl_integer!(u16);
impl_integer!(u8);

macro_rules! impl_unsigned {
    ($ty:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value, Error> {
                i64::try_from(*self)
                    .map(Value::Integer)
                    .map_err(|_| Error::SerializationError)
            }
        }
    };
}

impl_unsigned!(u64);
impl_unsigned!(usize);

impl ToValue for f64 {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self as f64))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Boolean(*self))
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(self.clone())
    }
}

impl ToValue for time::OffsetDateTime {
    fn to_value(&self) -> Result<Value, Error> {
        let fmt = time::format_description::well_known::Rfc2822;
        Ok(Value::String(self.format(&fmt)?))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value, Error> {
        match self {
            Some(value) => value.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Result<Value, Error> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for &[T] {
    fn to_value(&self) -> Result<Value, Error> {
        let mut list = vec![];

        for value in self.iter() {
            list.push(value.to_value()?);
        }

        Ok(Value::List(list))
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Result<Value, Error> {
        let mut result = HashMap::new();
        for (key, value) in self.iter() {
            result.insert(key.clone(), value.to_value()?);
        }

        Ok(Value::Hash(result))
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Result<Value, Error> {
        use serde_json::Value as Json;

        Ok(match self {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().ok_or(Error::SerializationError)?),
            },
            Json::String(s) => Value::String(s.clone()),
            Json::Array(list) => {
                let mut values = vec![];
                for value in list {
                    values.push(value.to_value()?);
                }
                Value::List(values)
            }
            Json::Object(map) => {
                let mut hash = HashMap::new();
                for (key, value) in map {
                    hash.insert(key.clone(), value.to_value()?);
                }
                Value::Hash(hash)
            }
        })
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<serde_json::Value, Self::Error> {
        use serde_json::value::Number;
        match value {
            Value::Integer(i) => Ok(serde_json::Value::Number(i.into())),
            Value::Float(f) => Ok(serde_json::Value::Number(
                Number::from_f64(f).ok_or(Error::SerializationError)?,
            )),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::Boolean(b) => Ok(serde_json::Value::Bool(b)),
            Value::List(l) => {
                let mut list = vec![];
                for v in l {
                    list.push(v.try_into()?);
                }
                Ok(serde_json::Value::Array(list))
            }
            Value::Hash(h) => {
                let mut hash = serde_json::Map::new();
                for (k, v) in h {
                    hash.insert(k, v.try_into()?);
                }
                Ok(serde_json::Value::Object(hash))
            }
            Value::Null => Ok(serde_json::Value::Null),
        }
    }
}
