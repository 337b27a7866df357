//! Stored documents and the values they hold.
//!
//! Documents are keyed by storage names, never logical names. A reference
//! field holds a [`DocRef`]: the referenced type plus the identifier value.

use std::fmt;

use indexmap::IndexMap;

use crate::base::{Name, TypeId};

/// A stored value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(Name),
    Ref(DocRef),
    Doc(Document),
}

/// Identifier of a document of another mapped type.
#[derive(Clone, Debug, PartialEq)]
pub struct DocRef {
    pub collection: TypeId,
    pub id: Box<Value>,
}

impl DocRef {
    pub fn new(collection: TypeId, id: impl Into<Value>) -> Self {
        Self {
            collection,
            id: Box::new(id.into()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(Name::from(v))
    }
}

impl From<Name> for Value {
    fn from(v: Name) -> Self {
        Value::Str(v)
    }
}

impl From<DocRef> for Value {
    fn from(v: DocRef) -> Self {
        Value::Ref(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Doc(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Ref(r) => write!(f, "{{ \"$ref\": \"{}\", \"$id\": {} }}", r.collection, r.id),
            Value::Doc(d) => write!(f, "{}", d),
        }
    }
}

/// An ordered map of storage keys to values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    fields: IndexMap<Name, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<Name>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<Name>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " \"{}\": {}", key, value)?;
        }
        f.write_str(" }")
    }
}
