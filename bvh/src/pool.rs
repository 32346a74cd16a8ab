use std::ops::{Index, IndexMut};

use crate::{error::BvhError, node::BvhNode};

/// Fixed-size node arena with a bump cursor.
///
/// Slot 0 is the root and is never handed out. Slots are reserved in pairs,
/// never reused, and the backing slice never grows, so the pool stays exactly
/// the size the renderer allocated for it.
#[derive(Debug)]
pub struct NodePool {
    nodes: Box<[BvhNode]>,
    cursor: usize,
}

impl NodePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: vec![BvhNode::default(); capacity].into_boxed_slice(),
            cursor: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Number of slots handed out so far, root included.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserves two consecutive slots and returns the index of the first.
    pub fn reserve_pair(&mut self) -> Result<u32, BvhError> {
        let first = self.cursor;
        if first + 2 > self.nodes.len() {
            return Err(BvhError::NodePoolExhausted {
                capacity: self.nodes.len(),
            });
        }

        self.cursor += 2;
        Ok(first as u32)
    }

    pub fn into_nodes(self) -> Box<[BvhNode]> {
        self.nodes
    }
}

impl Index<u32> for NodePool {
    type Output = BvhNode;

    fn index(&self, index: u32) -> &Self::Output {
        &self.nodes[index as usize]
    }
}

impl IndexMut<u32> for NodePool {
    fn index_mut(&mut self, index: u32) -> &mut Self::Output {
        &mut self.nodes[index as usize]
    }
}
