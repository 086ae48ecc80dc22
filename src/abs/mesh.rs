//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing indexed vertex data on the GPU side and
//! [`IndirectCommands`] for the command buffers read by the indirect draw calls.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

use crate::error::{Error, Result};

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Pod {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// A bare position, read as attribute 0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Position(pub [f32; 3]);

impl Vertex for Position {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                std::mem::size_of::<Position>() as i32,
                0,
            );
        }
    }
}

/// Represents an indexed mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    vertex_count: usize,
    index_count: usize,
}

impl Mesh {
    /// Uploads the given vertex and index data.
    pub fn new<V: Vertex>(gl: &Arc<glow::Context>, vertices: &[V], indices: &[u32]) -> Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(Error::Driver)?;
            let [vbo, ebo] = create_all(|| gl.create_buffer(), |buffer| gl.delete_buffer(buffer))
                .inspect_err(|_| gl.delete_vertex_array(vao))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            // The element buffer binding is recorded in the vertex array
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                vao,
                vbo,
                ebo,
                vertex_count: vertices.len(),
                index_count: indices.len(),
            })
        }
    }

    /// Binds the vertex array (and with it the element buffer).
    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

/// Parameters of one `glDrawArraysIndirect` draw, laid out as the driver reads them.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawArraysIndirectCommand {
    pub count: u32,
    pub instance_count: u32,
    pub first: u32,
    pub base_instance: u32,
}

/// Parameters of one `glDrawElementsIndirect` draw, laid out as the driver reads them.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawElementsIndirectCommand {
    pub count: u32,
    pub instance_count: u32,
    pub first_index: u32,
    pub base_vertex: i32,
    pub base_instance: u32,
}

/// Draw-indirect buffers holding one arrays command and one elements command for a mesh.
pub struct IndirectCommands {
    gl: Arc<glow::Context>,
    arrays: glow::Buffer,
    elements: glow::Buffer,
}

impl IndirectCommands {
    /// Builds commands that draw the whole mesh once.
    pub fn for_mesh(gl: &Arc<glow::Context>, mesh: &Mesh) -> Result<Self> {
        let arrays = DrawArraysIndirectCommand {
            count: mesh.vertex_count() as u32,
            instance_count: 1,
            first: 0,
            base_instance: 0,
        };
        let elements = DrawElementsIndirectCommand {
            count: mesh.index_count() as u32,
            instance_count: 1,
            first_index: 0,
            base_vertex: 0,
            base_instance: 0,
        };

        unsafe {
            let [arrays_buffer, elements_buffer] =
                create_all(|| gl.create_buffer(), |buffer| gl.delete_buffer(buffer))?;

            gl.bind_buffer(glow::DRAW_INDIRECT_BUFFER, Some(arrays_buffer));
            gl.buffer_data_u8_slice(
                glow::DRAW_INDIRECT_BUFFER,
                bytemuck::bytes_of(&arrays),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::DRAW_INDIRECT_BUFFER, Some(elements_buffer));
            gl.buffer_data_u8_slice(
                glow::DRAW_INDIRECT_BUFFER,
                bytemuck::bytes_of(&elements),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::DRAW_INDIRECT_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                arrays: arrays_buffer,
                elements: elements_buffer,
            })
        }
    }

    /// Binds the arrays command buffer as the draw-indirect buffer.
    pub fn bind_arrays(&self) {
        unsafe {
            self.gl
                .bind_buffer(glow::DRAW_INDIRECT_BUFFER, Some(self.arrays));
        }
    }

    /// Binds the elements command buffer as the draw-indirect buffer.
    pub fn bind_elements(&self) {
        unsafe {
            self.gl
                .bind_buffer(glow::DRAW_INDIRECT_BUFFER, Some(self.elements));
        }
    }
}

impl Drop for IndirectCommands {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.arrays);
            self.gl.delete_buffer(self.elements);
        }
    }
}

/// Creates `N` driver objects. If one fails, the ones already created are deleted.
fn create_all<T: Copy, const N: usize>(
    mut create: impl FnMut() -> std::result::Result<T, String>,
    mut delete: impl FnMut(T),
) -> Result<[T; N]> {
    let mut created = Vec::with_capacity(N);
    for _ in 0..N {
        match create() {
            Ok(object) => created.push(object),
            Err(e) => {
                created.into_iter().for_each(&mut delete);
                return Err(Error::Driver(e));
            }
        }
    }
    Ok(std::array::from_fn(|i| created[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_all_returns_every_object() {
        let mut next = 0;
        let objects: [u32; 2] = create_all(
            || {
                next += 1;
                Ok(next)
            },
            |_| panic!("nothing to delete"),
        )
        .unwrap();
        assert_eq!(objects, [1, 2]);
    }

    #[test]
    fn test_create_all_releases_earlier_objects_on_failure() {
        let mut next = 0;
        let mut deleted = Vec::new();
        let result: Result<[u32; 3]> = create_all(
            || {
                next += 1;
                if next == 3 {
                    Err("out of memory".to_string())
                } else {
                    Ok(next)
                }
            },
            |object| deleted.push(object),
        );
        match result {
            Err(Error::Driver(message)) => assert_eq!(message, "out of memory"),
            other => panic!("expected a driver error, got {other:?}"),
        }
        assert_eq!(deleted, [1, 2]);
    }

    #[test]
    fn test_indirect_command_layout() {
        assert_eq!(std::mem::size_of::<DrawArraysIndirectCommand>(), 16);
        assert_eq!(std::mem::size_of::<DrawElementsIndirectCommand>(), 20);

        let command = DrawElementsIndirectCommand {
            count: 3,
            instance_count: 1,
            first_index: 0,
            base_vertex: -1,
            base_instance: 7,
        };
        let words: &[u32] = bytemuck::cast_slice(bytemuck::bytes_of(&command));
        assert_eq!(words, &[3, 1, 0, u32::MAX, 7]);
    }

    #[test]
    fn test_position_stride() {
        let vertices = [Position([-1.0, -1.0, 0.0]), Position([1.0, -1.0, 0.0])];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 24);
    }
}
