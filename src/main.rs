//! `qembed` entrypoint.

use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

use qembed::cli::{Cli, Step};
use qembed::config::Config;
use qembed::dataset::load_records;
use qembed::embedding::ContextualEmbedder;
use qembed::pipeline::{generate_embeddings, validate_embeddings};
use qembed::storage::EmbeddingStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.apply(Config::from_env()?);
    config.validate()?;

    let step = cli.step();
    tracing::info!(
        ?step,
        input = %config.input_path.display(),
        output_dir = %config.output_dir.display(),
        stub = cli.stub,
        "qembed starting"
    );

    let records = load_records(&config.input_path)?;
    let store = EmbeddingStore::new(config.output_dir.clone());

    if matches!(step, Step::Generate | Step::Run) {
        let embedder = ContextualEmbedder::load(config.embedder_config(cli.stub)?)?;
        let report = generate_embeddings(&records, &embedder, &store)?;
        println!(
            "saved {} embedding files to {}",
            report.files_written,
            store.root().display()
        );
    }

    if matches!(step, Step::Validate | Step::Run) {
        let report = validate_embeddings(&records, &store)?;
        println!("max sequence length: {}", report.max_len);
    }

    Ok(())
}
