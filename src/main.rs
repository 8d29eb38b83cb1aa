mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use xsd2proto::{proto, xsd};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let schema = xsd::read_schema(&text, &cli.name, cli.allow_dtd)?;
    let builder = proto::ProtoBuilder::from_schema(&schema)?;
    proto::emit::write_protos(&cli.out, &schema, builder.messages())?;

    Ok(())
}
