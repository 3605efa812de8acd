use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Filter applied when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "warn";

/// Initializes the global logger.
///
/// Records go to `log_file` when given, otherwise to stderr. The terminal UI
/// owns the screen while playing, so interactive sessions that want to see
/// engine records should pass a file.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format_module_path(false);

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Logger already initialized")?;
    Ok(())
}
