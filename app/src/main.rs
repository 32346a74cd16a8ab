use bvhpack::args::{Args, HELP};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = Args::parse(pico_args::Arguments::from_env())? else {
        print!("{HELP}");
        return Ok(());
    };

    let report = bvhpack::run(&args)?;
    log::info!(
        "Node pool: {} bytes, packed indices: {} bytes",
        report.node_bytes,
        report.index_bytes
    );

    Ok(())
}
