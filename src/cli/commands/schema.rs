//! Show the configured form schema

use kanban::config::BoardConfig;
use kanban::output::{OutputMode, SchemaView};

/// Print the registered fields and rules, or the whole config as TOML
pub fn schema(config: &BoardConfig, as_toml: bool, mode: OutputMode) -> anyhow::Result<()> {
    if as_toml {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let registry = config.build_registry()?;
    SchemaView::new(&config.form.schema, &registry.fields(&config.form.schema)).render(mode);
    Ok(())
}
