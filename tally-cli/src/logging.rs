use log::LevelFilter;

/// Route `log` output to stderr at a level picked from the -v/-q flags.
///
/// `RUST_LOG` is not consulted.
pub fn init(verbose: u8, quiet: bool) {
    env_logger::Builder::new()
        .filter_level(level_for(verbose, quiet))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
