//! n8n workflow CLI: validate, import, catalog and search n8n workflows.
//!
//! Configuration comes from the environment (see `.env`): N8N_HOST,
//! N8N_API_KEY, DATABASE_URL, EMBEDDING_HOST, WORKFLOWS_DIR, ...

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use n8n_mcp_api_client::N8nApiClient;
use n8n_mcp_cli::{init_tracing, validate_file};
use n8n_mcp_core::{Config, Strictness, ValidationOptions};
use n8n_mcp_db::PostgresClient;
use n8n_mcp_services::{
    load_workflows, normalize_embedding_dim, read_workflow_file, vectorize_catalog,
    EmbeddingProvider, OllamaEmbeddingClient, SemanticSearchService, WorkflowCatalog,
};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "n8n-workflows", about = "n8n Workflow Validator and Importer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrictnessArg {
    Low,
    Medium,
    High,
}

impl From<StrictnessArg> for Strictness {
    fn from(arg: StrictnessArg) -> Self {
        match arg {
            StrictnessArg::Low => Strictness::Low,
            StrictnessArg::Medium => Strictness::Medium,
            StrictnessArg::High => Strictness::High,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a workflow
    Validate {
        /// Path to a local workflow file
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// ID of the workflow
        #[arg(long)]
        id: Option<String>,
        /// Validation strictness level
        #[arg(short, long, value_enum, default_value = "medium")]
        strictness: StrictnessArg,
        /// Comma-separated list of validators
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_values = ["naming", "errorHandling", "security", "performance", "documentation"]
        )]
        validators: Vec<String>,
    },
    /// Import a workflow to n8n
    Import {
        /// Path to a local workflow file
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Enrich every raw workflow file into the processed directory
    Extract,
    /// Load processed workflows into PostgreSQL
    Load,
    /// Embed every workflow description and store the vectors
    Vectorize,
    /// Nearest stored workflows to a free-text query
    Search {
        /// Search query
        #[arg(long)]
        query: String,
        /// Maximum number of results
        #[arg(long, default_value = "5")]
        top_k: i64,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn display_id(id: Option<&serde_json::Value>) -> String {
    match id {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn load_config() -> anyhow::Result<Config> {
    Config::from_env().context("Failed to load configuration")
}

fn embedding_provider(config: &Config) -> anyhow::Result<Arc<dyn EmbeddingProvider>> {
    let client = OllamaEmbeddingClient::new(&config.embedding)?;
    Ok(Arc::new(client))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            file,
            id,
            strictness,
            validators,
        } => match (file, id) {
            (Some(file), _) => {
                println!("Validating workflow file: {}", file.display());
                let options = ValidationOptions::from_names(strictness.into(), &validators);
                let report = validate_file(&file, &options).await?;
                println!();
                print!("{}", report);
            }
            (None, Some(_)) => {
                println!("Validating from n8n by ID is not yet supported in this version.");
            }
            (None, None) => {
                println!("Please provide a file path or an ID to validate.");
            }
        },
        Commands::Import { file } => {
            println!("Importing workflow from: {}", file.display());
            let config = load_config()?;
            let client = N8nApiClient::from_config(&config.n8n)?;
            let document = read_workflow_file(&file)
                .await
                .with_context(|| format!("Failed to read workflow file {}", file.display()))?;

            let created = client
                .create_workflow(&document)
                .await
                .context("Failed to import workflow")?;
            println!("Workflow imported successfully!");
            println!("Workflow ID: {}", display_id(created.get("id")));
        }
        Commands::Extract => {
            let config = load_config()?;
            let catalog = WorkflowCatalog::new(&config.catalog);
            let workflows = catalog.process_all().await?;
            println!(
                "Processed {} workflows into {}",
                workflows.len(),
                catalog.output_dir().display()
            );
        }
        Commands::Load => {
            let config = load_config()?;
            let workflows = WorkflowCatalog::new(&config.catalog).process_all().await?;
            if workflows.is_empty() {
                println!("No workflows to process.");
                return Ok(());
            }
            println!("Processed {} workflows.", workflows.len());

            let db = PostgresClient::connect(&config.database)
                .await
                .context("Could not connect to PostgreSQL. Aborting.")?;
            let result = match db.ensure_schema().await {
                Ok(()) => load_workflows(&db, &workflows).await,
                Err(e) => Err(e),
            };
            db.disconnect().await;

            let summary = result?;
            print_json(&summary)?;
        }
        Commands::Vectorize => {
            let config = load_config()?;
            let catalog = WorkflowCatalog::new(&config.catalog);
            let search = SemanticSearchService::new(embedding_provider(&config)?);
            let outcome = vectorize_catalog(&catalog, &search, &config.database).await?;
            print_json(&outcome)?;
        }
        Commands::Search { query, top_k } => {
            let config = load_config()?;
            let provider = embedding_provider(&config)?;
            let embedding = provider
                .try_embed(&query)
                .await
                .context("Could not embed the query")?;

            let db = PostgresClient::connect(&config.database)
                .await
                .context("Could not connect to PostgreSQL")?;
            let result = db
                .embeddings()
                .search_similar(normalize_embedding_dim(embedding), top_k)
                .await;
            db.disconnect().await;

            print_json(&result?)?;
        }
    }

    Ok(())
}
