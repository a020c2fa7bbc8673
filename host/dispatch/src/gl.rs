//! A GL backend which records every entry point it receives instead of talking to a driver.

use std::sync::{Arc, Mutex, MutexGuard};

use exgl_heap::HeapRuntime;
use exgl_marshal::{ArrayBuffer, TypedArray};

use crate::MethodTable;

pub type GLenum = u32;
pub type GLbitfield = u32;
pub type GLboolean = bool;
pub type GLint = i32;
pub type GLsizei = i32;
pub type GLfloat = f32;

pub const COLOR_BUFFER_BIT: GLbitfield = 0x4000;
pub const DEPTH_BUFFER_BIT: GLbitfield = 0x0100;
pub const DEPTH_TEST: GLenum = 0x0B71;
pub const SCISSOR_TEST: GLenum = 0x0C11;
pub const TRIANGLES: GLenum = 0x0004;
pub const ARRAY_BUFFER: GLenum = 0x8892;
pub const STATIC_DRAW: GLenum = 0x88E4;

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    ClearColor(GLfloat, GLfloat, GLfloat, GLfloat),
    Clear(GLbitfield),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    Scissor(GLint, GLint, GLsizei, GLsizei),
    Enable(GLenum),
    Disable(GLenum),
    DepthMask(GLboolean),
    LineWidth(GLfloat),
    Uniform1f(GLint, GLfloat),
    Uniform1i(GLint, GLint),
    Uniform4fv(GLint, Vec<GLfloat>),
    BufferData {
        target: GLenum,
        data: Vec<u8>,
        usage: GLenum,
    },
    DrawArrays(GLenum, GLint, GLsizei),
}

#[derive(Debug, Clone, Default)]
pub struct GlRecorder {
    calls: Arc<Mutex<Vec<GlCall>>>,
}

impl GlRecorder {
    fn lock(&self) -> MutexGuard<'_, Vec<GlCall>> {
        self.calls.lock().expect("GL recorder poisoned")
    }

    pub fn record(&self, call: GlCall) {
        self.lock().push(call);
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.lock().clone()
    }

    pub fn take(&self) -> Vec<GlCall> {
        std::mem::take(&mut *self.lock())
    }
}

macro_rules! register_gl {
    ($table:expr, $gl:expr; $(
        $name:literal => |$($arg:ident: $ty:ty),*| $call:expr;
    )*) => {$({
        let gl = $gl.clone();
        $table.register($name, move |$($arg: $ty),*| gl.record($call));
    })*};
}

/// Registers the recorded entry points under their WebGL names.
pub fn install(table: &mut MethodTable<HeapRuntime>, gl: &GlRecorder) {
    register_gl! { table, gl;
        "clearColor" => |r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat| GlCall::ClearColor(r, g, b, a);
        "clear" => |mask: GLbitfield| GlCall::Clear(mask);
        "viewport" => |x: GLint, y: GLint, w: GLsizei, h: GLsizei| GlCall::Viewport(x, y, w, h);
        "scissor" => |x: GLint, y: GLint, w: GLsizei, h: GLsizei| GlCall::Scissor(x, y, w, h);
        "enable" => |cap: GLenum| GlCall::Enable(cap);
        "disable" => |cap: GLenum| GlCall::Disable(cap);
        "depthMask" => |flag: GLboolean| GlCall::DepthMask(flag);
        "lineWidth" => |width: GLfloat| GlCall::LineWidth(width);
        "uniform1f" => |location: GLint, x: GLfloat| GlCall::Uniform1f(location, x);
        "uniform1i" => |location: GLint, x: GLint| GlCall::Uniform1i(location, x);
        "bufferData" => |target: GLenum, data: ArrayBuffer<HeapRuntime>, usage: GLenum| GlCall::BufferData {
            target,
            data: data.get().bytes().to_vec(),
            usage,
        };
        "drawArrays" => |mode: GLenum, first: GLint, count: GLsizei| GlCall::DrawArrays(mode, first, count);
    }

    // GL reads the view's memory as floats whatever its element type.
    table.register_checked(
        "uniform4fv",
        {
            let gl = gl.clone();
            move |location: GLint, data: TypedArray<HeapRuntime>| {
                gl.record(GlCall::Uniform4fv(
                    location,
                    bytemuck::pod_collect_to_vec(data.get().data().bytes()),
                ))
            }
        },
        |(_, data): &(GLint, TypedArray<HeapRuntime>)| {
            let len = data.get().data().bytes().len();

            if len % size_of::<GLfloat>() != 0 {
                return Err(format!("a {len} byte view does not hold whole floats"));
            }

            Ok(())
        },
    );
}
