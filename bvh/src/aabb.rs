use maths::Vec3;

use crate::vertex::{IndexFormat, Vertex};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// Inverted box that any point or box grows into. Treat it as "no volume".
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box around every vertex referenced by `indices`.
    pub fn from_indices<I: IndexFormat>(vertices: &[Vertex], indices: &[I]) -> Self {
        let mut bounds = Self::EMPTY;
        for &index in indices {
            bounds.grow_point(vertices[index.to_usize()].position());
        }
        bounds
    }

    pub fn grow_point(&mut self, point: Vec3) {
        self.min = Vec3::min(self.min, point);
        self.max = Vec3::max(self.max, point);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Inclusive on every face, so degenerate boxes still contain their points.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn contains(&self, bounds: &Aabb) -> bool {
        self.contains_point(bounds.min) && self.contains_point(bounds.max)
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}
