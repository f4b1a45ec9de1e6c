//! Logger initialization

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the global `env_logger` once
///
/// `default_level` applies when `RUST_LOG` is unset; it uses the `env_logger`
/// filter syntax (e.g. "info" or "fixedloop_core=debug,info"). Later calls are
/// ignored.
pub fn init_logging(default_level: &str) {
    INIT.call_once(|| {
        let env = env_logger::Env::default().default_filter_or(default_level);
        let _ = env_logger::Builder::from_env(env).try_init();
        log::debug!("logging initialized");
    });
}
