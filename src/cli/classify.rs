//! Classify command - classification and routing without generation

use clap::Args;

use crate::domain::classification::ClassifierMode;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Prompt to classify
    pub prompt: String,

    /// Classifier strategy; defaults to the configured one
    #[arg(long, value_parser = super::parse_mode)]
    pub mode: Option<ClassifierMode>,
}

pub async fn run(args: ClassifyArgs) -> anyhow::Result<()> {
    let config = super::load_config()?;
    let gateway = crate::build_gateway(&config)?;

    let outcome = gateway.classify_only(&args.prompt, args.mode).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
