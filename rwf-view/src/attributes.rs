//! Attribute store.
//!
//! Attributes are the variables visible to every template a [`crate::Renderer`] executes.
//! They outlive a single render: data passed to a render and values assigned by templates
//! are merged back into the store.
use crate::{Error, ToValue, Value};
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Attributes {
    values: HashMap<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// All current bindings.
    pub fn get_all(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Replace all bindings.
    pub fn set_all(&mut self, values: HashMap<String, Value>) -> &mut Self {
        self.values = values;
        self
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl ToValue) -> Result<&mut Self, Error> {
        self.values.insert(key.to_string(), value.to_value()?);
        Ok(self)
    }

    /// Unbind a key. Does nothing if the key isn't set.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.values.remove(key);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Merge other bindings into this store. Keys of `other` win.
    pub fn merge(&mut self, other: impl IntoIterator<Item = (String, Value)>) -> &mut Self {
        self.values.extend(other);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TryFrom<HashMap<String, Value>> for Attributes {
    type Error = Error;

    fn try_from(values: HashMap<String, Value>) -> Result<Attributes, Self::Error> {
        Ok(Attributes { values })
    }
}

impl TryFrom<&Attributes> for Attributes {
    type Error = Error;

    fn try_from(attributes: &Attributes) -> Result<Attributes, Self::Error> {
        Ok(attributes.clone())
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

macro_rules! impl_pairs {
    ($ty:ty) => {
        impl TryFrom<$ty> for Attributes {
            type Error = Error;

            fn try_from(values: $ty) -> Result<Attributes, Self::Error> {
                let mut result = HashMap::<String, Value>::new();
                for (key, value) in values {
                    result.insert(key.to_string(), value.to_value()?);
                }

                Ok(Attributes { values: result })
            }
        }
    };
}

macro_rules! impl_impl_pairs {
    ($ty:ty) => {
        impl_pairs!(HashMap<String, $ty>);
        impl_pairs!(HashMap<&str, $ty>);
        impl_pairs!(Vec<(&str, $ty)>);
        impl_pairs!([(&str, $ty); 1]);
        impl_pairs!([(&str, $ty); 2]);
        impl_pairs!([(&str, $ty); 3]);
        impl_pairs!([(&str, $ty); 4]);
        impl_pairs!([(&str, $ty); 5]);
        impl_pairs!([(&str, $ty); 6]);
        impl_pairs!([(&str, $ty); 7]);
        impl_pairs!([(&str, $ty); 8]);
    };
}

impl_impl_pairs!(&str);
impl_impl_pairs!(String);
impl_impl_pairs!(i64);
impl_impl_pairs!(i32);
impl_impl_pairs!(u64);
impl_impl_pairs!(u32);
impl_impl_pairs!(bool);

impl_pairs!(Vec<(&str, Value)>);
impl_pairs!(HashMap<&str, Value>);
impl_pairs!([(&str, Value); 1]);
impl_pairs!([(&str, Value); 2]);
impl_pairs!([(&str, Value); 3]);
impl_pairs!([(&str, Value); 4]);

impl Index<&str> for Attributes {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.values.get(key).unwrap_or(&Value::Null)
    }
}

impl IndexMut<&str> for Attributes {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.values.entry(key.to_string()).or_insert(Value::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_attributes_index() {
        let mut attributes = Attributes::default();
        attributes["test"] = "value".to_value().expect("to_value");

        assert_eq!(attributes["test"], Value::String("value".to_string()));
        assert_eq!(attributes["missing"], Value::Null);
    }

    #[test]
    fn test_get_set_remove() -> Result<(), Error> {
        let mut attributes = Attributes::new();
        attributes.set("title", "Home")?.set("count", 5)?;

        assert_eq!(attributes.get("title"), Some(Value::String("Home".into())));
        assert_eq!(attributes.get("count"), Some(Value::Integer(5)));
        assert_eq!(attributes.get("nothing"), None);

        attributes.remove("title").remove("nothing");
        assert!(!attributes.contains("title"));
        assert_eq!(attributes.len(), 1);

        Ok(())
    }

    #[test]
    fn test_set_all_and_merge() -> Result<(), Error> {
        let mut attributes = Attributes::try_from([("a", "1"), ("b", "2")])?;
        attributes.merge(Attributes::try_from([("b", "3"), ("c", "4")])?);

        assert_eq!(attributes["a"], Value::String("1".into()));
        assert_eq!(attributes["b"], Value::String("3".into()));
        assert_eq!(attributes.len(), 3);

        attributes.set_all(HashMap::new());
        assert!(attributes.is_empty());
        assert!(attributes.get_all().is_empty());

        Ok(())
    }
}
