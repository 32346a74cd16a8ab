use std::{ffi::OsStr, path::PathBuf, str::FromStr};

use bvh::SplitKind;

pub const HELP: &str = "\
bvhpack - build a flat BVH for a triangle scene

USAGE:
  bvhpack [OPTIONS]

OPTIONS:
  --input <FILE>          glTF scene to load (default: built-in demo scene)
  --max-triangles <N>     triangle capacity of the node pool (default: scene size)
  --split <POLICY>        origin | midpoint | longest (default: origin)
  --index-width <BITS>    16 | 32 (default: 16)
  --materials <M>         material slots to cycle meshes through (default: 3)
  --out-dir <DIR>         write bvh_nodes.bin and bvh_indices.bin here
  --debug-lines           generate box outlines for every node
  -h, --help              print this help
";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexWidth {
    #[default]
    U16,
    U32,
}

impl FromStr for IndexWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16" => Ok(IndexWidth::U16),
            "32" => Ok(IndexWidth::U32),
            other => Err(format!("Unsupported index width '{other}', expected 16 or 32")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub input: Option<PathBuf>,
    pub max_triangles: Option<usize>,
    pub split: SplitKind,
    pub index_width: IndexWidth,
    pub materials: u32,
    pub out_dir: Option<PathBuf>,
    pub debug_lines: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            max_triangles: None,
            split: SplitKind::default(),
            index_width: IndexWidth::default(),
            materials: 3,
            out_dir: None,
            debug_lines: false,
        }
    }
}

fn parse_path(value: &OsStr) -> Result<PathBuf, &'static str> {
    Ok(value.into())
}

impl Args {
    /// Returns `None` when help was requested.
    pub fn parse(mut args: pico_args::Arguments) -> anyhow::Result<Option<Self>> {
        if args.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let defaults = Self::default();
        let parsed = Self {
            input: args.opt_value_from_os_str("--input", parse_path)?,
            max_triangles: args.opt_value_from_str("--max-triangles")?,
            split: args.opt_value_from_str("--split")?.unwrap_or(defaults.split),
            index_width: args
                .opt_value_from_str("--index-width")?
                .unwrap_or(defaults.index_width),
            materials: args
                .opt_value_from_str("--materials")?
                .unwrap_or(defaults.materials),
            out_dir: args.opt_value_from_os_str("--out-dir", parse_path)?,
            debug_lines: args.contains("--debug-lines"),
        };

        let remaining = args.finish();
        if !remaining.is_empty() {
            anyhow::bail!("Unexpected arguments: {remaining:?}");
        }
        if parsed.materials == 0 {
            anyhow::bail!("--materials must be at least 1");
        }

        Ok(Some(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> anyhow::Result<Option<Args>> {
        let args = args.iter().map(OsString::from).collect();
        Args::parse(pico_args::Arguments::from_vec(args))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), Some(Args::default()));
    }

    #[test]
    fn test_all_options() {
        let args = parse(&[
            "--input",
            "scene.gltf",
            "--max-triangles=64",
            "--split",
            "longest",
            "--index-width",
            "32",
            "--materials",
            "5",
            "--out-dir",
            "out",
            "--debug-lines",
        ])
        .unwrap()
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("scene.gltf")));
        assert_eq!(args.max_triangles, Some(64));
        assert_eq!(args.split, SplitKind::LongestAxis);
        assert_eq!(args.index_width, IndexWidth::U32);
        assert_eq!(args.materials, 5);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert!(args.debug_lines);
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["--help"]).unwrap(), None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["--split", "sah"]).is_err());
        assert!(parse(&["--index-width", "8"]).is_err());
        assert!(parse(&["--materials", "0"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
