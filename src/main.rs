//! fileproc's entry point: parses the command line, resolves the run
//! configuration and reports fatal errors with their exit code.

use fileproc::{
    cli::get_args,
    config::RunConfiguration,
    console::Palette,
    error::default_error_handler,
    logger::init_logger,
    run,
};

fn main() {
    let args = get_args();

    let config = match RunConfiguration::from_args(args) {
        Ok(config) => config,
        Err(err) => default_error_handler(err),
    };

    init_logger(config.verbosity);
    let palette = Palette::detect(config.no_color);

    match run(&config, &palette) {
        Ok(summary) => {
            let failed = summary.failed().count();
            if failed > 0 {
                log::warn!("{failed} of {} commands failed", summary.results.len());
            }
        }
        Err(err) => default_error_handler(err),
    }
}
