//! Process-wide logger setup.

use env_logger::{Builder, Env};

/// Initialize the global logger. `RUST_LOG` overrides the `info` default.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();
}
