//! Logger initialisation

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed as well. `RUST_LOG`
/// overrides the default filter.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(verbose: bool) {
    use env_logger::{Builder, Env};
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);

    // Already set (tests calling init twice) is fine
    let _ = builder.try_init();
}

/// Browser console logger plus readable panics
#[cfg(target_arch = "wasm32")]
pub fn init(verbose: bool) {
    console_error_panic_hook::set_once();
    let level = if verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    let _ = console_log::init_with_level(level);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        log::info!("logger up");
    }
}
