//! An in-process dynamic value heap implementing [`exgl_marshal::Runtime`].
//!
//! Objects are reference counted with [`Arc`] so handles produced by conversion can travel with a
//! deferred invocation to another thread.

use std::sync::Arc;

mod runtime;
pub use self::runtime::*;

mod typed;
pub use self::typed::*;

// === Value === //

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(Arc<str>),
    Object(Arc<HeapObject>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeapObject {
    Plain(Vec<(String, Value)>),
    Array(Vec<Value>),
    TypedArray(TypedArrayData),
    ArrayBuffer(Vec<u8>),
}

impl Value {
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Self::String(value.into())
    }

    pub fn object(fields: impl IntoIterator<Item = (impl Into<String>, Value)>) -> Self {
        Self::Object(Arc::new(HeapObject::Plain(
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )))
    }

    pub fn array(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Object(Arc::new(HeapObject::Array(values.into_iter().collect())))
    }

    pub fn typed_array(data: impl Into<TypedArrayData>) -> Self {
        Self::Object(Arc::new(HeapObject::TypedArray(data.into())))
    }

    pub fn array_buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Object(Arc::new(HeapObject::ArrayBuffer(bytes.into())))
    }

    pub fn as_object(&self) -> Option<&Arc<HeapObject>> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl HeapObject {
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Plain(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}
