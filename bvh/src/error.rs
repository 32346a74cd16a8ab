#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BvhError {
    ZeroCapacity,
    CapacityTooLarge {
        max_triangles: usize,
    },
    CapacityExceeded {
        triangles: usize,
        capacity: usize,
    },
    NodePoolExhausted {
        capacity: usize,
    },
    MalformedIndexCount {
        len: usize,
    },
    IndexOutOfRange {
        position: usize,
        index: usize,
        vertex_count: usize,
    },
    InvalidTree {
        node: u32,
        reason: String,
    },
}

impl std::fmt::Display for BvhError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BvhError::ZeroCapacity => write!(f, "BVH capacity must be at least one triangle"),
            BvhError::CapacityTooLarge { max_triangles } => {
                write!(
                    f,
                    "BVH capacity of {max_triangles} triangles does not fit the node layout"
                )
            }
            BvhError::CapacityExceeded {
                triangles,
                capacity,
            } => write!(
                f,
                "Scene has {triangles} triangles but the BVH is sized for {capacity}"
            ),
            BvhError::NodePoolExhausted { capacity } => {
                write!(f, "Node pool exhausted ({capacity} nodes)")
            }
            BvhError::MalformedIndexCount { len } => {
                write!(f, "Index count {len} is not a multiple of 3")
            }
            BvhError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "Index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            BvhError::InvalidTree { node, reason } => {
                write!(f, "Invalid BVH at node {node}: {reason}")
            }
        }
    }
}

impl std::error::Error for BvhError {}
