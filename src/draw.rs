//! The draw calls the draw-methods stage cycles through.

use glow::HasContext;

use crate::abs::{
    DrawArraysIndirectCommand, DrawElementsIndirectCommand, EntryPoints, IndirectCommands, Mesh,
};

/// One way of asking OpenGL to draw the same indexed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMethod {
    DrawArrays,
    DrawArraysInstanced,
    DrawArraysInstancedBaseInstance,
    DrawArraysIndirect,
    MultiDrawArraysIndirect,
    DrawElements,
    DrawElementsInstanced,
    DrawElementsInstancedBaseVertex,
    DrawElementsInstancedBaseInstance,
    DrawElementsInstancedBaseVertexBaseInstance,
    DrawElementsIndirect,
    MultiDrawElementsIndirect,
    DrawRangeElements,
    DrawRangeElementsBaseVertex,
}

impl DrawMethod {
    /// Every method, in cycle order.
    pub const ALL: [DrawMethod; 14] = [
        DrawMethod::DrawArrays,
        DrawMethod::DrawArraysInstanced,
        DrawMethod::DrawArraysInstancedBaseInstance,
        DrawMethod::DrawArraysIndirect,
        DrawMethod::MultiDrawArraysIndirect,
        DrawMethod::DrawElements,
        DrawMethod::DrawElementsInstanced,
        DrawMethod::DrawElementsInstancedBaseVertex,
        DrawMethod::DrawElementsInstancedBaseInstance,
        DrawMethod::DrawElementsInstancedBaseVertexBaseInstance,
        DrawMethod::DrawElementsIndirect,
        DrawMethod::MultiDrawElementsIndirect,
        DrawMethod::DrawRangeElements,
        DrawMethod::DrawRangeElementsBaseVertex,
    ];

    /// The method after this one, wrapping back to the first.
    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Name of the OpenGL entry point.
    pub fn gl_name(self) -> &'static str {
        match self {
            DrawMethod::DrawArrays => "glDrawArrays",
            DrawMethod::DrawArraysInstanced => "glDrawArraysInstanced",
            DrawMethod::DrawArraysInstancedBaseInstance => "glDrawArraysInstancedBaseInstance",
            DrawMethod::DrawArraysIndirect => "glDrawArraysIndirect",
            DrawMethod::MultiDrawArraysIndirect => "glMultiDrawArraysIndirect",
            DrawMethod::DrawElements => "glDrawElements",
            DrawMethod::DrawElementsInstanced => "glDrawElementsInstanced",
            DrawMethod::DrawElementsInstancedBaseVertex => "glDrawElementsInstancedBaseVertex",
            DrawMethod::DrawElementsInstancedBaseInstance => "glDrawElementsInstancedBaseInstance",
            DrawMethod::DrawElementsInstancedBaseVertexBaseInstance => {
                "glDrawElementsInstancedBaseVertexBaseInstance"
            }
            DrawMethod::DrawElementsIndirect => "glDrawElementsIndirect",
            DrawMethod::MultiDrawElementsIndirect => "glMultiDrawElementsIndirect",
            DrawMethod::DrawRangeElements => "glDrawRangeElements",
            DrawMethod::DrawRangeElementsBaseVertex => "glDrawRangeElementsBaseVertex",
        }
    }

    /// A distinct color per method.
    pub fn color(self) -> glam::Vec4 {
        let hue = self as usize as f32 / Self::ALL.len() as f32;
        let channel = |offset: f32| {
            let t = (hue + offset).fract();
            (t * std::f32::consts::TAU).cos() * 0.5 + 0.5
        };
        glam::Vec4::new(channel(0.0), channel(1.0 / 3.0), channel(2.0 / 3.0), 1.0)
    }

    /// Draws one instance of the whole mesh with this method.
    pub fn draw(
        self,
        gl: &glow::Context,
        entry_points: &EntryPoints,
        mesh: &Mesh,
        commands: &IndirectCommands,
    ) {
        let vertices = mesh.vertex_count() as i32;
        let indices = mesh.index_count() as i32;
        let last_vertex = mesh.vertex_count().saturating_sub(1) as u32;

        mesh.bind();
        unsafe {
            match self {
                DrawMethod::DrawArrays => gl.draw_arrays(glow::TRIANGLES, 0, vertices),
                DrawMethod::DrawArraysInstanced => {
                    gl.draw_arrays_instanced(glow::TRIANGLES, 0, vertices, 1)
                }
                DrawMethod::DrawArraysInstancedBaseInstance => {
                    gl.draw_arrays_instanced_base_instance(glow::TRIANGLES, 0, vertices, 1, 0)
                }
                DrawMethod::DrawArraysIndirect => {
                    commands.bind_arrays();
                    gl.draw_arrays_indirect_offset(glow::TRIANGLES, 0);
                }
                DrawMethod::MultiDrawArraysIndirect => {
                    commands.bind_arrays();
                    entry_points.multi_draw_arrays_indirect_offset(
                        glow::TRIANGLES,
                        0,
                        1,
                        std::mem::size_of::<DrawArraysIndirectCommand>() as i32,
                    );
                }
                DrawMethod::DrawElements => {
                    gl.draw_elements(glow::TRIANGLES, indices, glow::UNSIGNED_INT, 0)
                }
                DrawMethod::DrawElementsInstanced => {
                    gl.draw_elements_instanced(glow::TRIANGLES, indices, glow::UNSIGNED_INT, 0, 1)
                }
                DrawMethod::DrawElementsInstancedBaseVertex => gl
                    .draw_elements_instanced_base_vertex(
                        glow::TRIANGLES,
                        indices,
                        glow::UNSIGNED_INT,
                        0,
                        1,
                        0,
                    ),
                DrawMethod::DrawElementsInstancedBaseInstance => entry_points
                    .draw_elements_instanced_base_instance(
                        glow::TRIANGLES,
                        indices,
                        glow::UNSIGNED_INT,
                        0,
                        1,
                        0,
                    ),
                DrawMethod::DrawElementsInstancedBaseVertexBaseInstance => gl
                    .draw_elements_instanced_base_vertex_base_instance(
                        glow::TRIANGLES,
                        indices,
                        glow::UNSIGNED_INT,
                        0,
                        1,
                        0,
                        0,
                    ),
                DrawMethod::DrawElementsIndirect => {
                    commands.bind_elements();
                    gl.draw_elements_indirect_offset(glow::TRIANGLES, glow::UNSIGNED_INT, 0);
                }
                DrawMethod::MultiDrawElementsIndirect => {
                    commands.bind_elements();
                    entry_points.multi_draw_elements_indirect_offset(
                        glow::TRIANGLES,
                        glow::UNSIGNED_INT,
                        0,
                        1,
                        std::mem::size_of::<DrawElementsIndirectCommand>() as i32,
                    );
                }
                DrawMethod::DrawRangeElements => entry_points.draw_range_elements(
                    glow::TRIANGLES,
                    0,
                    last_vertex,
                    indices,
                    glow::UNSIGNED_INT,
                    0,
                ),
                DrawMethod::DrawRangeElementsBaseVertex => entry_points
                    .draw_range_elements_base_vertex(
                        glow::TRIANGLES,
                        0,
                        last_vertex,
                        indices,
                        glow::UNSIGNED_INT,
                        0,
                        0,
                    ),
            }
            gl.bind_vertex_array(None);
        }
    }
}
