//! Models command - print the routing targets

use crate::domain::routing::ModelRegistry;

pub fn run() -> anyhow::Result<()> {
    let registry = ModelRegistry::standard();
    println!("{}", serde_json::to_string_pretty(registry.all())?);

    Ok(())
}
