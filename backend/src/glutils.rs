use gl::{types::*, *};
use std::ffi::CStr;

pub fn check_gl_err() {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return;
    }
    panic!("error: {:?}", err);
}

pub fn gl_version() -> String {
    gl_string(VERSION)
}

pub fn gl_renderer() -> String {
    gl_string(RENDERER)
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unknown>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn gl_make_vertex_array() -> u32 {
    let mut vao = 0;
    unsafe { gl::GenVertexArrays(1, &mut vao) };
    unsafe { gl::BindVertexArray(vao) };
    vao
}

pub fn gl_make_array_buffer() -> u32 {
    let mut vbo = 0;
    unsafe { gl::GenBuffers(1, &mut vbo) };
    unsafe { gl::BindBuffer(ARRAY_BUFFER, vbo) };
    vbo
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}
