use std::mem::{offset_of, size_of};

use maths::Vec3;

use crate::aabb::Aabb;

/// `left_child` value marking a leaf.
pub const LEAF_SENTINEL: i32 = -1;

/// One entry of the node pool, in the layout the tracer reads it.
///
/// Interior nodes point at two consecutive pool slots, `left_child` and
/// `left_child + 1`. Leaves own `leaf_index_count` entries of the packed index
/// buffer starting at `leaf_index_start`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BvhNode {
    pub bounds_min: [f32; 4],
    pub bounds_max: [f32; 4],
    pub left_child: i32,
    pub leaf_index_start: u32,
    pub leaf_index_count: u32,
    pub _padding: u32,
}

// Node constants shared with the shader, in 32-bit words
pub const BVH_NODE_STRIDE: u32 = (size_of::<BvhNode>() / size_of::<u32>()) as u32;
pub const BVH_NODE_LEFT_CHILD_OFFSET: u32 =
    (offset_of!(BvhNode, left_child) / size_of::<u32>()) as u32;
pub const BVH_NODE_LEAF_START_OFFSET: u32 =
    (offset_of!(BvhNode, leaf_index_start) / size_of::<u32>()) as u32;
pub const BVH_NODE_LEAF_COUNT_OFFSET: u32 =
    (offset_of!(BvhNode, leaf_index_count) / size_of::<u32>()) as u32;

impl BvhNode {
    pub fn new_leaf(bounds: Aabb, leaf_index_start: u32, leaf_index_count: u32) -> Self {
        Self {
            bounds_min: padded(bounds.min),
            bounds_max: padded(bounds.max),
            left_child: LEAF_SENTINEL,
            leaf_index_start,
            leaf_index_count,
            _padding: 0,
        }
    }

    pub fn new_interior(bounds: Aabb, left_child: i32) -> Self {
        Self {
            bounds_min: padded(bounds.min),
            bounds_max: padded(bounds.max),
            left_child,
            leaf_index_start: 0,
            leaf_index_count: 0,
            _padding: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left_child == LEAF_SENTINEL
    }

    /// Pool indices of both children, `None` for leaves.
    pub fn children(&self) -> Option<(u32, u32)> {
        if self.left_child < 0 {
            return None;
        }
        let left = self.left_child as u32;
        Some((left, left + 1))
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3::new(self.bounds_min[0], self.bounds_min[1], self.bounds_min[2]),
            Vec3::new(self.bounds_max[0], self.bounds_max[1], self.bounds_max[2]),
        )
    }

    pub fn leaf_range(&self) -> std::ops::Range<usize> {
        let start = self.leaf_index_start as usize;
        start..start + self.leaf_index_count as usize
    }
}

fn padded(vec: Vec3) -> [f32; 4] {
    [vec.x, vec.y, vec.z, 0.0]
}
