pub mod args;
pub mod demo;
pub mod export;
pub mod scene;

use anyhow::Context;
use bvh::{BuildConfig, Bvh, BvhBuilder, BvhStats, IndexFormat, build_debug_lines};

use crate::{
    args::{Args, IndexWidth},
    scene::SceneGeometry,
};

/// What a run produced, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub capacity: usize,
    pub stats: BvhStats,
    pub node_bytes: usize,
    pub index_bytes: usize,
    pub debug_line_count: Option<usize>,
}

pub fn run(args: &Args) -> anyhow::Result<Report> {
    let scene = match &args.input {
        Some(path) => SceneGeometry::load_gltf(path, args.materials)
            .with_context(|| format!("Failed to load scene from {}", path.display()))?,
        None => {
            log::info!("No input given, using the built-in demo scene");
            demo::demo_scene()
        }
    };

    let max_triangles = args
        .max_triangles
        .unwrap_or_else(|| scene.triangle_count().max(1));
    let config = BuildConfig::new(max_triangles).with_split(args.split);
    let builder = BvhBuilder::new(config).context("Invalid BVH configuration")?;

    match args.index_width {
        IndexWidth::U16 => {
            let indices = scene.indices_u16()?;
            build(args, &builder, &scene, &indices)
        }
        IndexWidth::U32 => build(args, &builder, &scene, &scene.indices),
    }
}

fn build<I: IndexFormat>(
    args: &Args,
    builder: &BvhBuilder,
    scene: &SceneGeometry,
    indices: &[I],
) -> anyhow::Result<Report> {
    let bvh: Bvh<I> = builder
        .construct(&scene.vertices, indices)
        .context("Failed to build BVH")?;

    let stats = bvh.stats();
    log::info!(
        "Built BVH over {}/{} triangles ({} split): {}/{} nodes used, {} leaves, depth {}, largest leaf {} triangles",
        scene.triangle_count(),
        builder.max_triangles(),
        builder.policy(),
        stats.nodes_used,
        bvh.capacity(),
        stats.leaf_count,
        stats.max_depth,
        stats.max_leaf_triangles
    );

    let debug_line_count = args.debug_lines.then(|| {
        let lines = build_debug_lines(&bvh);
        for line in &lines {
            log::debug!(
                "node {} {} {:?} -> {:?}",
                line.node,
                if line.is_leaf { "leaf" } else { "interior" },
                line.start,
                line.end
            );
        }
        lines.len()
    });

    if let Some(out_dir) = &args.out_dir {
        export::write_buffers(out_dir, &bvh)?;
    }

    Ok(Report {
        triangle_count: scene.triangle_count(),
        vertex_count: scene.vertices.len(),
        capacity: bvh.capacity(),
        stats,
        node_bytes: bvh.node_bytes().len(),
        index_bytes: bvh.index_bytes().len(),
        debug_line_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scene_run() {
        let report = run(&Args::default()).unwrap();

        assert_eq!(report.triangle_count, 26);
        assert_eq!(report.capacity, 51);
        assert_eq!(report.stats.leaf_count, 2);
        assert_eq!(report.stats.interior_count, 1);
        assert_eq!(report.index_bytes, 26 * 3 * 2);
        assert_eq!(report.node_bytes, 51 * 48);
        assert_eq!(report.debug_line_count, None);
    }

    #[test]
    fn test_demo_scene_wide_indices_and_debug_lines() {
        let args = Args {
            index_width: IndexWidth::U32,
            split: bvh::SplitKind::LongestAxis,
            debug_lines: true,
            ..Args::default()
        };

        let report = run(&args).unwrap();

        assert_eq!(report.index_bytes, 26 * 3 * 4);
        assert!(report.stats.leaf_count >= 2);
        let reachable = report.stats.leaf_count + report.stats.interior_count;
        assert_eq!(report.debug_line_count, Some(reachable * 12));
    }

    #[test]
    fn test_capacity_too_small_is_reported() {
        let args = Args {
            max_triangles: Some(4),
            ..Args::default()
        };

        let error = run(&args).unwrap_err();
        assert!(error.downcast_ref::<bvh::BvhError>().is_some());
    }
}
