use maths::Vec3;

use crate::{output::Bvh, vertex::IndexFormat};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhDebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub is_leaf: bool,
    pub node: u32,
}

const EDGE_INDICES: [(usize, usize); 12] = [
    (0, 1), // bottom face
    (1, 3),
    (3, 2),
    (2, 0),
    (4, 5), // top face
    (5, 7),
    (7, 6),
    (6, 4),
    (0, 4), // pillars
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Box outlines for every reachable node, for drawing the hierarchy as an
/// overlay. Nodes without finite bounds (an empty scene's root) are skipped.
pub fn build_debug_lines<I: IndexFormat>(bvh: &Bvh<I>) -> Vec<BvhDebugLine> {
    let mut lines = Vec::new();

    for index in bvh.reachable() {
        let node = bvh.node(index);
        let bounds = node.bounds();
        if !bounds.min.is_finite() || !bounds.max.is_finite() {
            continue;
        }

        let (min, max) = (bounds.min, bounds.max);
        let corners = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ];

        for &(start, end) in EDGE_INDICES.iter() {
            lines.push(BvhDebugLine {
                start: corners[start],
                end: corners[end],
                is_leaf: node.is_leaf(),
                node: index,
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuildConfig, BvhBuilder, vertex::Vertex};

    #[test]
    fn test_lines_per_reachable_node() {
        let vertices: Vec<Vertex> = [
            (-3.0, 0.0),
            (-2.0, 0.0),
            (-2.5, 1.0),
            (2.0, 0.0),
            (3.0, 0.0),
            (2.5, 1.0),
            (-5.0, 0.0),
            (-4.0, 0.0),
            (-4.5, 1.0),
        ]
        .into_iter()
        .map(|(x, y)| Vertex::from_position(Vec3::new(x, y, 0.0)))
        .collect();
        let indices: Vec<u16> = (0..9).collect();
        let builder = BvhBuilder::new(BuildConfig::new(3)).unwrap();
        let bvh = builder.construct(&vertices, &indices).unwrap();

        let lines = build_debug_lines(&bvh);

        assert_eq!(lines.len(), 3 * 12);
        assert_eq!(lines.iter().filter(|line| line.is_leaf).count(), 2 * 12);
        assert!(lines.iter().all(|line| line.node < 3));
    }

    #[test]
    fn test_empty_scene_has_no_lines() {
        let builder = BvhBuilder::new(BuildConfig::default()).unwrap();
        let bvh = builder.construct::<u32>(&[], &[]).unwrap();

        assert!(build_debug_lines(&bvh).is_empty());
    }
}
