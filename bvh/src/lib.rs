//! Fixed-capacity bounding volume hierarchy over an indexed triangle soup.
//!
//! [`BvhBuilder::construct`] turns a vertex array and a triangle index list
//! into a flat node pool plus a packed index buffer. Both outputs are plain
//! `Pod` arrays addressed only by integer offsets, so a renderer can upload
//! them verbatim and walk the tree from a shader.

pub mod aabb;
pub mod builder;
pub mod config;
pub mod debug;
pub mod error;
pub mod node;
pub mod output;
pub mod pool;
pub mod split;
pub mod vertex;

pub use aabb::Aabb;
pub use builder::BvhBuilder;
pub use config::BuildConfig;
pub use debug::{BvhDebugLine, build_debug_lines};
pub use error::BvhError;
pub use node::{BvhNode, LEAF_SENTINEL};
pub use output::{Bvh, BvhStats};
pub use split::{
    Axis, BoundsMidpoint, LongestAxisMidpoint, OriginPlane, SplitKind, SplitPlane, SplitPolicy,
    partition,
};
pub use vertex::{IndexFormat, Vertex};
