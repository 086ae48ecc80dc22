//! OpenGL draw entry points that `glow` does not wrap.
//!
//! [`EntryPoints`] is loaded once, after the context is made current, from the same loader
//! function `glow` is built from.

use std::ffi::c_void;

use crate::error::{Error, Result};

type MultiDrawArraysIndirect =
    unsafe extern "system" fn(mode: u32, indirect: *const c_void, draw_count: i32, stride: i32);
type MultiDrawElementsIndirect = unsafe extern "system" fn(
    mode: u32,
    element_type: u32,
    indirect: *const c_void,
    draw_count: i32,
    stride: i32,
);
type DrawElementsInstancedBaseInstance = unsafe extern "system" fn(
    mode: u32,
    count: i32,
    element_type: u32,
    indices: *const c_void,
    instance_count: i32,
    base_instance: u32,
);
type DrawRangeElements = unsafe extern "system" fn(
    mode: u32,
    start: u32,
    end: u32,
    count: i32,
    element_type: u32,
    indices: *const c_void,
);
type DrawRangeElementsBaseVertex = unsafe extern "system" fn(
    mode: u32,
    start: u32,
    end: u32,
    count: i32,
    element_type: u32,
    indices: *const c_void,
    base_vertex: i32,
);

/// Function pointers for the draw calls missing from [`glow::HasContext`].
///
/// The pointers belong to the context they were loaded from and may only be called while that
/// context is current.
#[derive(Debug, Clone, Copy)]
pub struct EntryPoints {
    multi_draw_arrays_indirect: MultiDrawArraysIndirect,
    multi_draw_elements_indirect: MultiDrawElementsIndirect,
    draw_elements_instanced_base_instance: DrawElementsInstancedBaseInstance,
    draw_range_elements: DrawRangeElements,
    draw_range_elements_base_vertex: DrawRangeElementsBaseVertex,
}

impl EntryPoints {
    /// Names of every entry point, in load order.
    pub const NAMES: [&'static str; 5] = [
        "glMultiDrawArraysIndirect",
        "glMultiDrawElementsIndirect",
        "glDrawElementsInstancedBaseInstance",
        "glDrawRangeElements",
        "glDrawRangeElementsBaseVertex",
    ];

    /// Resolves every entry point through `loader`.
    ///
    /// # Safety
    ///
    /// `loader` must return either null or the address of the named OpenGL function for the
    /// current context.
    pub unsafe fn load(mut loader: impl FnMut(&str) -> *const c_void) -> Result<Self> {
        let [arrays, elements, base_instance, range, range_base_vertex] = Self::NAMES;
        unsafe {
            Ok(Self {
                multi_draw_arrays_indirect: lookup(&mut loader, arrays)?,
                multi_draw_elements_indirect: lookup(&mut loader, elements)?,
                draw_elements_instanced_base_instance: lookup(&mut loader, base_instance)?,
                draw_range_elements: lookup(&mut loader, range)?,
                draw_range_elements_base_vertex: lookup(&mut loader, range_base_vertex)?,
            })
        }
    }

    /// `glMultiDrawArraysIndirect`, reading commands from the bound draw-indirect buffer.
    ///
    /// # Safety
    ///
    /// The context these were loaded from must be current, with buffers bound that cover the draw.
    pub unsafe fn multi_draw_arrays_indirect_offset(
        &self,
        mode: u32,
        offset: i32,
        draw_count: i32,
        stride: i32,
    ) {
        unsafe { (self.multi_draw_arrays_indirect)(mode, buffer_offset(offset), draw_count, stride) }
    }

    /// `glMultiDrawElementsIndirect`, reading commands from the bound draw-indirect buffer.
    ///
    /// # Safety
    ///
    /// The context these were loaded from must be current, with buffers bound that cover the draw.
    pub unsafe fn multi_draw_elements_indirect_offset(
        &self,
        mode: u32,
        element_type: u32,
        offset: i32,
        draw_count: i32,
        stride: i32,
    ) {
        unsafe {
            (self.multi_draw_elements_indirect)(
                mode,
                element_type,
                buffer_offset(offset),
                draw_count,
                stride,
            )
        }
    }

    /// # Safety
    ///
    /// See [`EntryPoints::multi_draw_arrays_indirect_offset`].
    pub unsafe fn draw_elements_instanced_base_instance(
        &self,
        mode: u32,
        count: i32,
        element_type: u32,
        offset: i32,
        instance_count: i32,
        base_instance: u32,
    ) {
        unsafe {
            (self.draw_elements_instanced_base_instance)(
                mode,
                count,
                element_type,
                buffer_offset(offset),
                instance_count,
                base_instance,
            )
        }
    }

    /// # Safety
    ///
    /// See [`EntryPoints::multi_draw_arrays_indirect_offset`].
    pub unsafe fn draw_range_elements(
        &self,
        mode: u32,
        start: u32,
        end: u32,
        count: i32,
        element_type: u32,
        offset: i32,
    ) {
        unsafe {
            (self.draw_range_elements)(mode, start, end, count, element_type, buffer_offset(offset))
        }
    }

    /// # Safety
    ///
    /// See [`EntryPoints::multi_draw_arrays_indirect_offset`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_range_elements_base_vertex(
        &self,
        mode: u32,
        start: u32,
        end: u32,
        count: i32,
        element_type: u32,
        offset: i32,
        base_vertex: i32,
    ) {
        unsafe {
            (self.draw_range_elements_base_vertex)(
                mode,
                start,
                end,
                count,
                element_type,
                buffer_offset(offset),
                base_vertex,
            )
        }
    }
}

/// Buffer offsets travel through the pointer argument.
fn buffer_offset(offset: i32) -> *const c_void {
    offset as usize as *const c_void
}

/// Resolves `name` to a function pointer of type `F`.
///
/// # Safety
///
/// `F` must be the `extern "system"` function pointer type of `name`.
unsafe fn lookup<F: Copy>(loader: &mut impl FnMut(&str) -> *const c_void, name: &str) -> Result<F> {
    let address = loader(name);
    if address.is_null() {
        return Err(Error::Driver(format!("{name} is not available")));
    }
    debug_assert_eq!(std::mem::size_of::<F>(), std::mem::size_of::<*const c_void>());
    Ok(unsafe { std::mem::transmute_copy::<*const c_void, F>(&address) })
}

#[cfg(test)]
mod tests {
    use super::*;

    extern "system" fn never_called() {}

    fn resolved(_name: &str) -> *const c_void {
        never_called as *const c_void
    }

    #[test]
    fn test_loads_every_entry_point() {
        let mut requested = Vec::new();
        let loaded = unsafe {
            EntryPoints::load(|name| {
                requested.push(name.to_string());
                resolved(name)
            })
        };
        assert!(loaded.is_ok());
        assert_eq!(requested, EntryPoints::NAMES);
    }

    #[test]
    fn test_missing_entry_point_is_a_driver_error() {
        let loaded = unsafe {
            EntryPoints::load(|name| {
                if name == "glDrawRangeElements" {
                    std::ptr::null()
                } else {
                    resolved(name)
                }
            })
        };
        match loaded {
            Err(Error::Driver(message)) => assert_eq!(message, "glDrawRangeElements is not available"),
            other => panic!("expected a driver error, got {other:?}"),
        }
    }

    #[test]
    fn test_buffer_offset_is_address() {
        assert!(buffer_offset(0).is_null());
        assert_eq!(buffer_offset(20) as usize, 20);
    }
}
