use std::sync::Arc;

use exgl_marshal::{Runtime, ValueKind};

use crate::{HeapObject, TypedArrayData, TypedArrayKind, Value};

// === HeapRuntime === //

#[derive(Debug, Copy, Clone, Default)]
pub struct HeapRuntime;

pub type HeapObjectRef = Arc<HeapObject>;

impl Runtime for HeapRuntime {
    type Value = Value;
    type Object = HeapObjectRef;
    type Array = ArrayRef;
    type TypedArray = TypedArrayRef;
    type ArrayBuffer = ArrayBufferRef;

    fn kind(&self, value: &Value) -> ValueKind {
        match value {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::Other,
            Value::Object(object) => match &**object {
                HeapObject::Plain(_) => ValueKind::Object,
                HeapObject::Array(_) => ValueKind::Array,
                HeapObject::TypedArray(_) => ValueKind::TypedArray,
                HeapObject::ArrayBuffer(_) => ValueKind::ArrayBuffer,
            },
        }
    }

    fn as_bool(&self, value: &Value) -> Option<bool> {
        match value {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    fn as_number(&self, value: &Value) -> Option<f64> {
        match value {
            Value::Number(value) => Some(*value),
            _ => None,
        }
    }

    fn as_object(&self, value: &Value) -> Option<HeapObjectRef> {
        value.as_object().cloned()
    }

    fn object_as_array(&self, object: &HeapObjectRef) -> Option<ArrayRef> {
        matches!(**object, HeapObject::Array(_)).then(|| ArrayRef(object.clone()))
    }

    fn object_as_typed_array(&self, object: &HeapObjectRef) -> Option<TypedArrayRef> {
        matches!(**object, HeapObject::TypedArray(_)).then(|| TypedArrayRef(object.clone()))
    }

    fn object_as_array_buffer(&self, object: &HeapObjectRef) -> Option<ArrayBufferRef> {
        matches!(**object, HeapObject::ArrayBuffer(_)).then(|| ArrayBufferRef(object.clone()))
    }
}

// === Narrowed Handles === //

/// An object known to be a [`HeapObject::Array`].
#[derive(Debug, Clone)]
pub struct ArrayRef(HeapObjectRef);

impl ArrayRef {
    pub fn values(&self) -> &[Value] {
        match &*self.0 {
            HeapObject::Array(values) => values,
            _ => unreachable!("array handle refers to a non-array object"),
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

/// An object known to be a [`HeapObject::TypedArray`].
#[derive(Debug, Clone)]
pub struct TypedArrayRef(HeapObjectRef);

impl TypedArrayRef {
    pub fn data(&self) -> &TypedArrayData {
        match &*self.0 {
            HeapObject::TypedArray(data) => data,
            _ => unreachable!("typed array handle refers to a non-typed-array object"),
        }
    }

    pub fn kind(&self) -> TypedArrayKind {
        self.data().kind()
    }

    pub fn as_slice<T: bytemuck::Pod>(&self) -> Option<&[T]> {
        self.data().as_slice()
    }
}

/// An object known to be a [`HeapObject::ArrayBuffer`].
#[derive(Debug, Clone)]
pub struct ArrayBufferRef(HeapObjectRef);

impl ArrayBufferRef {
    pub fn bytes(&self) -> &[u8] {
        match &*self.0 {
            HeapObject::ArrayBuffer(bytes) => bytes,
            _ => unreachable!("array buffer handle refers to a non-buffer object"),
        }
    }
}
