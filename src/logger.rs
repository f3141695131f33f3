use crate::config::Verbosity;

/// Sets up `env_logger`. The debug verbosity bit enables debug diagnostics;
/// `RUST_LOG` takes precedence when set.
pub fn init_logger(verbosity: Verbosity) {
    env_logger::Builder::new()
        .filter_level(if verbosity.debug() {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}
