//! Vertex data for the display quad
//!
//! The presentation pass draws one screen-covering quad; its vertices carry a
//! clip-space position and a normalized texture coordinate mapping the output
//! surface 1:1 across the viewport.

/// A display-quad vertex.
///
/// `#[repr(C)]` keeps the layout GPU-compatible for the vertex buffer upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2D {
    /// Clip-space position [x, y].
    pub position: [f32; 2],
    /// Normalized texture coordinate [u, v].
    pub tex_coord: [f32; 2],
}

/// The four corners of the viewport-covering quad.
pub const QUAD_VERTICES: [Vertex2D; 4] = [
    Vertex2D {
        position: [-1.0, -1.0],
        tex_coord: [0.0, 1.0],
    },
    Vertex2D {
        position: [1.0, -1.0],
        tex_coord: [1.0, 1.0],
    },
    Vertex2D {
        position: [1.0, 1.0],
        tex_coord: [1.0, 0.0],
    },
    Vertex2D {
        position: [-1.0, 1.0],
        tex_coord: [0.0, 0.0],
    },
];

/// Two triangles covering the quad.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 3, 1, 2, 3];

impl Vertex2D {
    /// Returns the vertex buffer layout for the display pipeline.
    ///
    /// - Attribute 0: position (Float32x2) at shader location 0
    /// - Attribute 1: texture coordinate (Float32x2) at shader location 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex2D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
