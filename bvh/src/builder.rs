use crate::{
    aabb::Aabb,
    config::{BuildConfig, pool_capacity, validate_capacity},
    error::BvhError,
    node::BvhNode,
    output::Bvh,
    pool::NodePool,
    split::{SplitKind, SplitPolicy, partition},
    vertex::{IndexFormat, Vertex},
};

/// Nodes owning fewer triangles than this always become leaves.
pub const MIN_SPLIT_TRIANGLES: usize = 3;

/// Builds BVHs for scenes of up to `max_triangles` triangles.
///
/// The builder keeps no state between builds: every call to
/// [`construct`](Self::construct) starts from a fresh node pool and an empty
/// packed index buffer, and hands both back by value.
#[derive(Clone, Debug)]
pub struct BvhBuilder<P = SplitKind> {
    max_triangles: usize,
    policy: P,
}

impl BvhBuilder<SplitKind> {
    pub fn new(config: BuildConfig) -> Result<Self, BvhError> {
        config.validate()?;
        Ok(Self {
            max_triangles: config.max_triangles,
            policy: config.split,
        })
    }
}

struct BuildState<'a, I> {
    vertices: &'a [Vertex],
    pool: NodePool,
    packed_indices: Vec<I>,
}

impl<P: SplitPolicy> BvhBuilder<P> {
    pub fn with_policy(max_triangles: usize, policy: P) -> Result<Self, BvhError> {
        validate_capacity(max_triangles)?;
        Ok(Self {
            max_triangles,
            policy,
        })
    }

    pub fn max_triangles(&self) -> usize {
        self.max_triangles
    }

    /// Length of the node pool every build produces.
    pub fn capacity(&self) -> usize {
        pool_capacity(self.max_triangles)
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Recursion depth grows with the tree depth, which is bounded only by
    /// the triangle count. Very deep trees from a lopsided split policy on
    /// large scenes can exhaust the thread's stack.
    pub fn construct<I: IndexFormat>(
        &self,
        vertices: &[Vertex],
        indices: &[I],
    ) -> Result<Bvh<I>, BvhError> {
        validate_input(vertices, indices, self.max_triangles())?;

        let triangle_count = indices.len() / 3;
        log::debug!(
            "Building BVH over {triangle_count} triangles ({} vertices, {}-bit indices, pool of {} nodes, {:?} split)",
            vertices.len(),
            I::BITS,
            self.capacity(),
            self.policy()
        );

        let mut state = BuildState {
            vertices,
            pool: NodePool::with_capacity(self.capacity()),
            packed_indices: Vec::with_capacity(indices.len()),
        };

        if indices.is_empty() {
            state.pool[0] = BvhNode::new_leaf(Aabb::EMPTY, 0, 0);
        } else {
            self.subdivide(&mut state, 0, indices)?;
        }

        let nodes_used = state.pool.cursor();
        let bvh = Bvh::from_parts(state.pool.into_nodes(), state.packed_indices, nodes_used);

        let stats = bvh.stats();
        log::debug!(
            "BVH built: {} nodes used, {} leaves, depth {}",
            stats.nodes_used,
            stats.leaf_count,
            stats.max_depth
        );
        if triangle_count >= MIN_SPLIT_TRIANGLES && stats.leaf_count == 1 {
            log::warn!(
                "BVH over {triangle_count} triangles collapsed into a single leaf; the split policy found no usable plane"
            );
        }

        Ok(bvh)
    }

    /// Recurses once per tree level; see [`construct`](Self::construct) for the stack limit.
    fn subdivide<I: IndexFormat>(
        &self,
        state: &mut BuildState<'_, I>,
        node_index: u32,
        indices: &[I],
    ) -> Result<(), BvhError> {
        let bounds = Aabb::from_indices(state.vertices, indices);
        let plane = self.policy.split_plane(&bounds);
        let (left, right) = partition(state.vertices, indices, plane);

        let triangle_count = indices.len() / 3;
        if left.is_empty() || right.is_empty() || triangle_count < MIN_SPLIT_TRIANGLES {
            let leaf_index_start = state.packed_indices.len() as u32;
            state.packed_indices.extend_from_slice(indices);
            state.pool[node_index] =
                BvhNode::new_leaf(bounds, leaf_index_start, indices.len() as u32);

            log::trace!(
                "Leaf {node_index}: {triangle_count} triangles at packed offset {leaf_index_start}"
            );
            return Ok(());
        }

        // Children are only reserved once the node is known to be interior,
        // which keeps every build within 2N - 1 slots.
        let left_child = state.pool.reserve_pair()?;
        state.pool[node_index] = BvhNode::new_interior(bounds, left_child as i32);

        self.subdivide(state, left_child, &left)?;
        self.subdivide(state, left_child + 1, &right)
    }
}

fn validate_input<I: IndexFormat>(
    vertices: &[Vertex],
    indices: &[I],
    max_triangles: usize,
) -> Result<(), BvhError> {
    if indices.len() % 3 != 0 {
        return Err(BvhError::MalformedIndexCount { len: indices.len() });
    }

    let triangles = indices.len() / 3;
    if triangles > max_triangles {
        return Err(BvhError::CapacityExceeded {
            triangles,
            capacity: max_triangles,
        });
    }

    if let Some((position, index)) = indices
        .iter()
        .map(|index| index.to_usize())
        .enumerate()
        .find(|&(_, index)| index >= vertices.len())
    {
        return Err(BvhError::IndexOutOfRange {
            position,
            index,
            vertex_count: vertices.len(),
        });
    }

    Ok(())
}
