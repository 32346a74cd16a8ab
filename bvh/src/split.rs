use std::str::FromStr;

use maths::Vec3;

use crate::{
    aabb::Aabb,
    vertex::{IndexFormat, Vertex},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn component(self, vec: Vec3) -> f32 {
        match self {
            Axis::X => vec.x,
            Axis::Y => vec.y,
            Axis::Z => vec.z,
        }
    }

    /// Axis along which `extent` is largest, preferring X then Y on ties.
    pub fn largest(extent: Vec3) -> Self {
        let mut axis = Axis::X;
        if extent.y > extent.x {
            axis = Axis::Y;
        }
        if extent.z > axis.component(extent) {
            axis = Axis::Z;
        }
        axis
    }
}

/// Axis-aligned plane. Triangles strictly below `position` on `axis` go left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitPlane {
    pub axis: Axis,
    pub position: f32,
}

/// Chooses where a node is cut. Called once per node with the node's own
/// freshly computed bounds.
pub trait SplitPolicy: std::fmt::Debug {
    fn split_plane(&self, bounds: &Aabb) -> SplitPlane;
}

/// Always cuts at world X = 0, whatever the node's bounds are.
#[derive(Clone, Copy, Debug, Default)]
pub struct OriginPlane;

impl SplitPolicy for OriginPlane {
    fn split_plane(&self, _bounds: &Aabb) -> SplitPlane {
        SplitPlane {
            axis: Axis::X,
            position: 0.0,
        }
    }
}

/// Cuts the node's box in half along X.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundsMidpoint;

impl SplitPolicy for BoundsMidpoint {
    fn split_plane(&self, bounds: &Aabb) -> SplitPlane {
        SplitPlane {
            axis: Axis::X,
            position: bounds.center().x,
        }
    }
}

/// Cuts the node's box in half along its longest axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct LongestAxisMidpoint;

impl SplitPolicy for LongestAxisMidpoint {
    fn split_plane(&self, bounds: &Aabb) -> SplitPlane {
        let axis = Axis::largest(bounds.extent());
        SplitPlane {
            axis,
            position: axis.component(bounds.center()),
        }
    }
}

/// The built-in policies by name, for configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitKind {
    #[default]
    Origin,
    Midpoint,
    LongestAxis,
}

impl SplitPolicy for SplitKind {
    fn split_plane(&self, bounds: &Aabb) -> SplitPlane {
        match self {
            SplitKind::Origin => OriginPlane.split_plane(bounds),
            SplitKind::Midpoint => BoundsMidpoint.split_plane(bounds),
            SplitKind::LongestAxis => LongestAxisMidpoint.split_plane(bounds),
        }
    }
}

impl std::fmt::Display for SplitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SplitKind::Origin => "origin",
            SplitKind::Midpoint => "midpoint",
            SplitKind::LongestAxis => "longest",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSplitKindError(pub String);

impl std::fmt::Display for ParseSplitKindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown split policy '{}', expected origin, midpoint or longest",
            self.0
        )
    }
}

impl std::error::Error for ParseSplitKindError {}

impl FromStr for SplitKind {
    type Err = ParseSplitKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "origin" => Ok(SplitKind::Origin),
            "midpoint" => Ok(SplitKind::Midpoint),
            "longest" => Ok(SplitKind::LongestAxis),
            other => Err(ParseSplitKindError(other.to_string())),
        }
    }
}

/// Splits whole triangles into `(left, right)` groups, keeping input order.
///
/// A triangle is left only when all three of its vertices lie strictly below
/// the plane. Straddling triangles are never duplicated; they go right.
pub fn partition<I: IndexFormat>(
    vertices: &[Vertex],
    indices: &[I],
    plane: SplitPlane,
) -> (Vec<I>, Vec<I>) {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for triangle in indices.chunks_exact(3) {
        let below = triangle.iter().all(|index| {
            plane.axis.component(vertices[index.to_usize()].position()) < plane.position
        });

        if below {
            left.extend_from_slice(triangle);
        } else {
            right.extend_from_slice(triangle);
        }
    }

    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::from_position(Vec3::new(x, y, z))
    }

    #[test]
    fn test_partition_keeps_order_and_whole_triangles() {
        let vertices = vec![
            vertex(-3.0, 0.0, 0.0),
            vertex(-2.0, 1.0, 0.0),
            vertex(-1.0, 0.0, 1.0),
            vertex(1.0, 0.0, 0.0),
            vertex(2.0, 1.0, 0.0),
            vertex(3.0, 0.0, 1.0),
        ];
        let indices: [u16; 12] = [3, 4, 5, 0, 1, 2, 5, 4, 3, 2, 1, 0];

        let (left, right) = partition(&vertices, &indices, OriginPlane.split_plane(&Aabb::EMPTY));

        assert_eq!(left, vec![0, 1, 2, 2, 1, 0]);
        assert_eq!(right, vec![3, 4, 5, 5, 4, 3]);
    }

    #[test]
    fn test_straddling_triangle_goes_right() {
        let vertices = vec![
            vertex(-1.0, 0.0, 0.0),
            vertex(1.0, 0.0, 0.0),
            vertex(2.0, 1.0, 0.0),
        ];
        let plane = SplitPlane {
            axis: Axis::X,
            position: 0.0,
        };

        let (left, right) = partition(&vertices, &[0u32, 1, 2], plane);

        assert!(left.is_empty());
        assert_eq!(right, vec![0, 1, 2]);
    }

    #[test]
    fn test_vertex_on_plane_is_not_left() {
        let vertices = vec![
            vertex(-1.0, 0.0, 0.0),
            vertex(-2.0, 0.0, 0.0),
            vertex(0.0, 1.0, 0.0),
        ];

        let (left, right) = partition(&vertices, &[0u16, 1, 2], OriginPlane.split_plane(&Aabb::EMPTY));

        assert!(left.is_empty());
        assert_eq!(right.len(), 3);
    }

    #[test]
    fn test_origin_plane_ignores_bounds() {
        let bounds = Aabb::new(Vec3::splat(10.0), Vec3::splat(20.0));
        let plane = OriginPlane.split_plane(&bounds);

        assert_eq!(plane.axis, Axis::X);
        assert_eq!(plane.position, 0.0);
    }

    #[test]
    fn test_midpoint_policies() {
        let bounds = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 10.0, 1.0));

        let midpoint = BoundsMidpoint.split_plane(&bounds);
        assert_eq!(midpoint.axis, Axis::X);
        assert_eq!(midpoint.position, 3.0);

        let longest = LongestAxisMidpoint.split_plane(&bounds);
        assert_eq!(longest.axis, Axis::Y);
        assert_eq!(longest.position, 5.0);
    }

    #[test]
    fn test_split_kind_parsing() {
        assert_eq!("origin".parse::<SplitKind>(), Ok(SplitKind::Origin));
        assert_eq!("midpoint".parse::<SplitKind>(), Ok(SplitKind::Midpoint));
        assert_eq!("longest".parse::<SplitKind>(), Ok(SplitKind::LongestAxis));
        assert!("median".parse::<SplitKind>().is_err());

        for kind in [SplitKind::Origin, SplitKind::Midpoint, SplitKind::LongestAxis] {
            assert_eq!(kind.to_string().parse::<SplitKind>(), Ok(kind));
        }
    }
}
