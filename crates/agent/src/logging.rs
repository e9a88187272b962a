/// Send log output to stderr, honouring `RUST_LOG` (default `info`).
///
/// `verbose` forces debug output. Calling it again once a logger is installed
/// does nothing.
pub fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    if builder.target(env_logger::Target::Stderr).try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
