use std::cell::RefCell;

use exgl_heap::{ArrayBufferRef, ArrayRef, HeapObjectRef, HeapRuntime, TypedArrayRef, Value};
use exgl_marshal::{
    Array, ArrayBuffer, Object, Runtime, TargetType, TypedArray, UnpackArgs, UnpackError,
    ValueKind, unpack_args,
};

// === Inspection Tracking === //

/// Delegates to [`HeapRuntime`] while recording the address of every value it inspects.
#[derive(Default)]
struct TrackingRuntime {
    inspected: RefCell<Vec<*const Value>>,
}

impl TrackingRuntime {
    fn touch(&self, value: &Value) {
        self.inspected.borrow_mut().push(value);
    }

    fn inspected_positions(&self, values: &[Value]) -> Vec<usize> {
        let mut positions = self
            .inspected
            .borrow()
            .iter()
            .map(|&ptr| {
                values
                    .iter()
                    .position(|v| std::ptr::eq(v, ptr))
                    .expect("inspected a value outside the argument list")
            })
            .collect::<Vec<_>>();

        positions.dedup();
        positions
    }
}

impl Runtime for TrackingRuntime {
    type Value = Value;
    type Object = HeapObjectRef;
    type Array = ArrayRef;
    type TypedArray = TypedArrayRef;
    type ArrayBuffer = ArrayBufferRef;

    fn kind(&self, value: &Value) -> ValueKind {
        self.touch(value);
        HeapRuntime.kind(value)
    }

    fn as_bool(&self, value: &Value) -> Option<bool> {
        self.touch(value);
        HeapRuntime.as_bool(value)
    }

    fn as_number(&self, value: &Value) -> Option<f64> {
        self.touch(value);
        HeapRuntime.as_number(value)
    }

    fn as_object(&self, value: &Value) -> Option<HeapObjectRef> {
        self.touch(value);
        HeapRuntime.as_object(value)
    }

    fn object_as_array(&self, object: &HeapObjectRef) -> Option<ArrayRef> {
        HeapRuntime.object_as_array(object)
    }

    fn object_as_typed_array(&self, object: &HeapObjectRef) -> Option<TypedArrayRef> {
        HeapRuntime.object_as_typed_array(object)
    }

    fn object_as_array_buffer(&self, object: &HeapObjectRef) -> Option<ArrayBufferRef> {
        HeapRuntime.object_as_array_buffer(object)
    }
}

// === Tests === //

#[test]
fn empty_list_invokes_no_converters() {
    let rt = TrackingRuntime::default();

    unpack_args::<_, ()>(&rt, &[]).unwrap();

    assert!(rt.inspected.borrow().is_empty());
    assert_eq!(<() as UnpackArgs<TrackingRuntime>>::ARITY, 0);
}

#[test]
fn outputs_follow_input_positions() {
    let rt = HeapRuntime;
    let values = [
        Value::Number(0x0DE1 as f64),
        Value::Null,
        Value::Number(0.25),
        Value::object([("kind", Value::string("program"))]),
        Value::array([Value::Number(4.0)]),
        Value::typed_array([1i16, -1]),
        Value::array_buffer([0xAAu8]),
        Value::Number(-3.7),
    ];

    let (target, flag, alpha, object, array, view, buffer, offset): (
        u32,
        bool,
        f32,
        Object<HeapRuntime>,
        Array<HeapRuntime>,
        TypedArray<HeapRuntime>,
        ArrayBuffer<HeapRuntime>,
        i8,
    ) = unpack_args(&rt, &values).unwrap();

    assert_eq!(target, 0x0DE1);
    assert!(!flag);
    assert_eq!(alpha, 0.25);
    assert_eq!(
        object.get().get("kind"),
        Some(&Value::string("program"))
    );
    assert_eq!(array.get().values(), &[Value::Number(4.0)]);
    assert_eq!(view.get().as_slice::<i16>(), Some(&[1i16, -1][..]));
    assert_eq!(buffer.get().bytes(), &[0xAAu8]);
    assert_eq!(offset, -3);
}

#[test]
fn permuted_signatures_stay_aligned() {
    let rt = HeapRuntime;
    let values = [Value::Boolean(true), Value::Number(2.5), Value::Number(9.0)];

    let (a, b, c): (bool, f64, u16) = unpack_args(&rt, &values).unwrap();
    assert_eq!((a, b, c), (true, 2.5, 9));

    let values = [Value::Number(9.0), Value::Boolean(true), Value::Number(2.5)];

    let (a, b, c): (u16, bool, f64) = unpack_args(&rt, &values).unwrap();
    assert_eq!((a, b, c), (9, true, 2.5));

    let values = [Value::Number(2.5), Value::Number(9.0), Value::Boolean(true)];

    let (a, b, c): (f64, u16, bool) = unpack_args(&rt, &values).unwrap();
    assert_eq!((a, b, c), (2.5, 9, true));
}

#[test]
fn first_failure_aborts_remaining_positions() {
    let rt = TrackingRuntime::default();
    let values = [
        Value::Number(1.0),
        Value::string("not a number"),
        Value::Number(3.0),
        Value::Number(4.0),
    ];

    let err = unpack_args::<_, (i32, i32, i32, i32)>(&rt, &values).unwrap_err();

    assert_eq!(
        err,
        UnpackError::TypeMismatch {
            position: 1,
            source: exgl_marshal::TypeMismatch {
                expected: TargetType::Int { signed: true, bits: 32 },
                found: ValueKind::Other,
            },
        }
    );
    assert_eq!(rt.inspected_positions(&values), vec![0, 1]);
}

#[test]
fn twelve_arguments_are_supported() {
    let rt = HeapRuntime;
    let values = (0..12).map(|i| Value::Number(i as f64)).collect::<Vec<_>>();

    let args: (u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8) =
        unpack_args(&rt, &values).unwrap();

    assert_eq!(args, (0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11));
}

#[test]
fn count_must_match_arity() {
    let rt = TrackingRuntime::default();

    let err = unpack_args::<_, (bool, bool)>(&rt, &[Value::Boolean(true)]).unwrap_err();
    assert_eq!(err, UnpackError::ArityMismatch { expected: 2, found: 1 });

    let err = unpack_args::<_, ()>(&rt, &[Value::Null]).unwrap_err();
    assert_eq!(err, UnpackError::ArityMismatch { expected: 0, found: 1 });

    assert!(rt.inspected.borrow().is_empty());
}

#[test]
fn arity_is_the_tuple_length_for_every_runtime() {
    assert_eq!(<() as UnpackArgs<HeapRuntime>>::ARITY, 0);
    assert_eq!(<(bool,) as UnpackArgs<HeapRuntime>>::ARITY, 1);
    assert_eq!(<(i32, bool, f32) as UnpackArgs<HeapRuntime>>::ARITY, 3);
    assert_eq!(<(i32, bool, f32) as UnpackArgs<TrackingRuntime>>::ARITY, 3);

    let err = unpack_args::<_, (i32, bool, f32)>(&HeapRuntime, &[]).unwrap_err();
    assert_eq!(err, UnpackError::ArityMismatch { expected: 3, found: 0 });
}
