use std::path::Path;

use anyhow::Context;
use bvh::Vertex;
use maths::{Mat4, Vec2, Vec3};

/// Flattened scene: every mesh primitive concatenated into one vertex array
/// and one triangle index list, positions already in world space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl SceneGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Narrows the indices to the 16-bit width the tracer reads by default.
    pub fn indices_u16(&self) -> anyhow::Result<Vec<u16>> {
        self.indices
            .iter()
            .map(|&index| {
                u16::try_from(index).with_context(|| {
                    format!("Index {index} does not fit 16 bits, use --index-width 32")
                })
            })
            .collect()
    }

    pub fn load_gltf<P: AsRef<Path>>(path: P, material_count: u32) -> anyhow::Result<Self> {
        let (document, buffers, _) = gltf::import(path)?;
        let mut geometry = Self::default();

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .context("glTF file has no scenes")?;

        for node in scene.nodes() {
            geometry.add_node(&node, Mat4::IDENTITY, &buffers, material_count)?;
        }

        log::info!(
            "Loaded {} vertices and {} triangles",
            geometry.vertices.len(),
            geometry.triangle_count()
        );
        Ok(geometry)
    }

    fn add_node(
        &mut self,
        node: &gltf::Node<'_>,
        parent_transform: Mat4,
        buffers: &[gltf::buffer::Data],
        material_count: u32,
    ) -> anyhow::Result<()> {
        let transform = parent_transform * Mat4::from_cols_array_2d(node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            // Meshes cycle through the material slots in file order
            let material_index = mesh.index() as u32 % material_count;

            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    log::warn!(
                        "Skipping primitive {} of mesh {}: mode {:?} is not triangles",
                        primitive.index(),
                        mesh.index(),
                        primitive.mode()
                    );
                    continue;
                }
                self.add_primitive(&primitive, transform, buffers, material_index)?;
            }
        }

        for child in node.children() {
            self.add_node(&child, transform, buffers, material_count)?;
        }

        Ok(())
    }

    fn add_primitive(
        &mut self,
        primitive: &gltf::Primitive<'_>,
        transform: Mat4,
        buffers: &[gltf::buffer::Data],
        material_index: u32,
    ) -> anyhow::Result<()> {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let Some(positions) = reader.read_positions() else {
            log::warn!("Skipping primitive {} without positions", primitive.index());
            return Ok(());
        };
        let positions: Vec<[f32; 3]> = positions.collect();
        let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
        let uvs: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|t| t.into_f32().collect());

        let base_index = u32::try_from(self.vertices.len()).context("Scene has too many vertices")?;

        for (i, position) in positions.iter().enumerate() {
            let position = transform.transform_point3(Vec3::from_array(position));
            let normal = normals
                .as_ref()
                .and_then(|n| n.get(i))
                .map(|n| transform.transform_vector3(Vec3::from_array(n)).normalized())
                .unwrap_or(Vec3::Y);
            let uv = uvs
                .as_ref()
                .and_then(|t| t.get(i))
                .map(Vec2::from_array)
                .unwrap_or(Vec2::ZERO);

            self.vertices
                .push(Vertex::new(position, normal, uv, material_index));
        }

        if let Some(indices) = reader.read_indices() {
            self.indices
                .extend(indices.into_u32().map(|index| index + base_index));
        } else {
            // Non-indexed primitives list their triangles vertex by vertex
            let vertex_count = positions.len() as u32;
            self.indices
                .extend((0..vertex_count / 3 * 3).map(|index| index + base_index));
        }

        Ok(())
    }
}
