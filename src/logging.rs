//! Logger set-up for the demo binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// Dependencies log at `info` and above. When `verbose` is `true`, this
/// crate's `debug` messages are shown as well. `RUST_LOG` overrides both.
pub fn init(verbose: bool) {
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let default_filter = format!("info,{}={crate_level}", env!("CARGO_CRATE_NAME"));
    let env = Env::default().default_filter_or(default_filter);
    let mut builder = Builder::from_env(env);

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
