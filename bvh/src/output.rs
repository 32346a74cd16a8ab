use crate::{
    error::BvhError,
    node::BvhNode,
    vertex::{IndexFormat, Vertex},
};

/// Result of one build: the node pool and the packed index buffer, both ready
/// to be copied into device memory as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct Bvh<I> {
    nodes: Box<[BvhNode]>,
    packed_indices: Vec<I>,
    nodes_used: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BvhStats {
    pub nodes_used: usize,
    pub interior_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub max_leaf_triangles: usize,
    pub triangle_count: usize,
}

impl<I: IndexFormat> Bvh<I> {
    pub(crate) fn from_parts(
        nodes: Box<[BvhNode]>,
        packed_indices: Vec<I>,
        nodes_used: usize,
    ) -> Self {
        Self {
            nodes,
            packed_indices,
            nodes_used,
        }
    }

    pub fn root(&self) -> &BvhNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: u32) -> &BvhNode {
        &self.nodes[index as usize]
    }

    /// The whole pool, unused slots included.
    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    pub fn nodes_used(&self) -> usize {
        self.nodes_used
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn packed_indices(&self) -> &[I] {
        &self.packed_indices
    }

    /// Triangle indices owned by a leaf. Empty for interior nodes.
    pub fn leaf_indices(&self, node: &BvhNode) -> &[I] {
        &self.packed_indices[node.leaf_range()]
    }

    /// Reachable node indices in depth-first order, left subtree first.
    pub fn reachable(&self) -> Vec<u32> {
        let mut order = Vec::with_capacity(self.nodes_used);
        let mut stack = vec![0u32];

        while let Some(index) = stack.pop() {
            order.push(index);
            if let Some((left, right)) = self.nodes[index as usize].children() {
                if (right as usize) < self.nodes.len() && left > index {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }

        order
    }

    pub fn leaves(&self) -> Vec<u32> {
        self.reachable()
            .into_iter()
            .filter(|&index| self.node(index).is_leaf())
            .collect()
    }

    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats {
            nodes_used: self.nodes_used,
            triangle_count: self.packed_indices.len() / 3,
            ..BvhStats::default()
        };

        let mut stack = vec![(0u32, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            let node = self.node(index);
            stats.max_depth = stats.max_depth.max(depth);

            match node.children() {
                Some((left, right)) if (right as usize) < self.nodes.len() && left > index => {
                    stats.interior_count += 1;
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                _ => {
                    stats.leaf_count += 1;
                    stats.max_leaf_triangles = stats
                        .max_leaf_triangles
                        .max(node.leaf_index_count as usize / 3);
                }
            }
        }

        stats
    }

    /// Checks the structural invariants a tracer relies on: every reachable
    /// node is either an interior node with two in-range children or a leaf
    /// with a non-empty whole-triangle range, child boxes nest inside their
    /// parent, every leaf vertex lies in its leaf box, and leaf ranges tile
    /// the packed buffer exactly once.
    pub fn validate(&self, vertices: &[Vertex]) -> Result<(), BvhError> {
        let invalid = |node: u32, reason: &str| BvhError::InvalidTree {
            node,
            reason: reason.to_string(),
        };

        let capacity = self.nodes.len();
        let mut ranges = Vec::new();
        let mut stack = vec![0u32];

        while let Some(index) = stack.pop() {
            let node = self.node(index);
            let bounds = node.bounds();

            if let Some((left, right)) = node.children() {
                if node.leaf_index_count != 0 {
                    return Err(invalid(index, "interior node owns a leaf range"));
                }
                if left < 1 || right as usize >= capacity || right as usize >= self.nodes_used {
                    return Err(invalid(index, "child index outside the used pool"));
                }
                if left <= index {
                    return Err(invalid(index, "child stored before its parent"));
                }
                for child in [left, right] {
                    if !bounds.contains(&self.node(child).bounds()) {
                        return Err(invalid(child, "bounds escape the parent's bounds"));
                    }
                }

                stack.push(right);
                stack.push(left);
                continue;
            }

            if !node.is_leaf() {
                return Err(invalid(index, "negative child index that is not the leaf sentinel"));
            }

            let count = node.leaf_index_count as usize;
            let empty_scene = index == 0 && self.packed_indices.is_empty();
            if count == 0 && !empty_scene {
                return Err(invalid(index, "leaf owns no triangles"));
            }
            if count % 3 != 0 {
                return Err(invalid(index, "leaf range splits a triangle"));
            }
            let range = node.leaf_range();
            if range.end > self.packed_indices.len() {
                return Err(invalid(index, "leaf range past the packed index buffer"));
            }

            for &packed in &self.packed_indices[range.clone()] {
                let vertex = vertices
                    .get(packed.to_usize())
                    .ok_or_else(|| invalid(index, "leaf references a missing vertex"))?;
                if !bounds.contains_point(vertex.position()) {
                    return Err(invalid(index, "vertex outside the leaf bounds"));
                }
            }

            ranges.push((range, index));
        }

        ranges.sort_by_key(|(range, _)| range.start);
        let mut expected_start = 0;
        for (range, index) in &ranges {
            if range.start != expected_start {
                return Err(invalid(*index, "leaf ranges overlap or leave gaps"));
            }
            expected_start = range.end;
        }
        if expected_start != self.packed_indices.len() {
            return Err(invalid(0, "packed index buffer has entries no leaf owns"));
        }

        Ok(())
    }

    pub fn node_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.nodes[..])
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.packed_indices)
    }

    pub fn into_parts(self) -> (Box<[BvhNode]>, Vec<I>) {
        (self.nodes, self.packed_indices)
    }
}
