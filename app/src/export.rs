use std::{fs, path::Path};

use anyhow::Context;
use bvh::{Bvh, IndexFormat};

pub const NODES_FILE: &str = "bvh_nodes.bin";
pub const INDICES_FILE: &str = "bvh_indices.bin";

/// Writes the node pool and packed index buffer as raw bytes, exactly as they
/// would be copied into device buffers.
pub fn write_buffers<I: IndexFormat>(out_dir: &Path, bvh: &Bvh<I>) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let nodes_path = out_dir.join(NODES_FILE);
    fs::write(&nodes_path, bvh.node_bytes())
        .with_context(|| format!("Failed to write {}", nodes_path.display()))?;

    let indices_path = out_dir.join(INDICES_FILE);
    fs::write(&indices_path, bvh.index_bytes())
        .with_context(|| format!("Failed to write {}", indices_path.display()))?;

    log::info!(
        "Wrote {} and {} to {}",
        NODES_FILE,
        INDICES_FILE,
        out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{args::Args, run};
    use bvh::BvhNode;

    #[test]
    fn test_written_buffers_round_trip() {
        let out_dir = std::env::temp_dir().join(format!("bvhpack-export-{}", std::process::id()));
        let args = Args {
            out_dir: Some(out_dir.clone()),
            ..Args::default()
        };

        let report = run(&args).unwrap();

        let node_bytes = fs::read(out_dir.join(NODES_FILE)).unwrap();
        let index_bytes = fs::read(out_dir.join(INDICES_FILE)).unwrap();
        assert_eq!(node_bytes.len(), report.node_bytes);
        assert_eq!(index_bytes.len(), report.index_bytes);

        let nodes: Vec<BvhNode> = node_bytes
            .chunks_exact(std::mem::size_of::<BvhNode>())
            .map(bytemuck::pod_read_unaligned)
            .collect();
        assert_eq!(nodes.len(), report.capacity);
        assert_eq!(nodes[0].children(), Some((1, 2)));
        assert!(nodes[1].is_leaf() && nodes[2].is_leaf());

        fs::remove_dir_all(&out_dir).unwrap();
    }
}
