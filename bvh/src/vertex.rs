use std::fmt::Debug;

use maths::{Vec2, Vec3};

/// Scene vertex as produced by the asset loader and read by the tracer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub material_index: u32,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2, material_index: u32) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
            material_index,
        }
    }

    /// Vertex with only a position, the rest zeroed.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(&self.position)
    }
}

/// Element type of the index buffers. The renderer decides the width, the
/// builder only needs to read offsets out of it and copy it around.
pub trait IndexFormat: bytemuck::Pod + Copy + Eq + Debug {
    const BITS: u32;

    fn to_usize(self) -> usize;
}

impl IndexFormat for u16 {
    const BITS: u32 = 16;

    fn to_usize(self) -> usize {
        self as usize
    }
}

impl IndexFormat for u32 {
    const BITS: u32 = 32;

    fn to_usize(self) -> usize {
        self as usize
    }
}
