use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use anamnesis_cli::commands;
use anamnesis_cli::config::{self, CliConfig};
use anamnesis_formatter::Formatter;
use anamnesis_storage::client::build_client;
use anamnesis_storage::s3::S3DocumentStore;
use anamnesis_storage::save::{SaveRequest, SectionUpdate, save_anamnesis, save_section};
use anamnesis_storage::store::DocumentStore;

#[derive(Parser)]
#[command(name = "anamnesis")]
#[command(about = "Format, validate and store patient anamnesis forms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to anamnesis.json in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Format a payload into a document and print it
    Format {
        #[command(flatten)]
        identity: Identity,
        #[arg(long)]
        payload: PathBuf,
        /// Stored document to build the next version on
        #[arg(long)]
        prior: Option<PathBuf>,
        /// Accept missing required fields
        #[arg(long)]
        draft: bool,
    },
    /// List missing required fields; exits 1 if any
    Validate {
        #[arg(long)]
        payload: PathBuf,
    },
    /// Print the search terms a payload yields
    Terms {
        #[arg(long)]
        payload: PathBuf,
    },
    /// Format a payload and store it as the patient's next version
    Save {
        #[command(flatten)]
        identity: Identity,
        #[arg(long)]
        payload: PathBuf,
        #[arg(long)]
        draft: bool,
    },
    /// Replace one section of the stored document
    Section {
        #[command(flatten)]
        identity: Identity,
        #[arg(long)]
        section: String,
        #[arg(long)]
        payload: PathBuf,
        #[arg(long)]
        draft: bool,
    },
    /// Print the stored document for a patient
    Show {
        #[arg(long)]
        patient: String,
    },
    /// List patients with a stored document
    List,
    /// Write the effective config to the config path
    Init,
}

#[derive(Args)]
struct Identity {
    #[arg(long)]
    author: String,
    #[arg(long)]
    patient: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let mut config = config::load_config(&config_path)?;
    config::apply_env(&mut config);
    let formatter = Formatter::with_config(config.formatter.clone());

    match cli.command {
        Command::Format {
            identity,
            payload,
            prior,
            draft,
        } => {
            let payload = commands::read_json(&payload)?;
            let prior = prior.as_deref().map(commands::read_document).transpose()?;
            let outcome = commands::format(
                &formatter,
                &payload,
                prior.as_ref(),
                &identity.author,
                &identity.patient,
                commands::mode(draft),
            )?;
            print_json(&outcome.document)?;
        }
        Command::Validate { payload } => {
            let payload = commands::read_json(&payload)?;
            let missing = commands::missing(&formatter, &payload);
            for field in &missing {
                println!("{field}");
            }
            if !missing.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Terms { payload } => {
            let payload = commands::read_json(&payload)?;
            for term in commands::terms(&formatter, &payload) {
                println!("{term}");
            }
        }
        Command::Save {
            identity,
            payload,
            draft,
        } => {
            let payload = commands::read_json(&payload)?;
            let store = s3_store(&config).await;
            let outcome = save_anamnesis(
                &store,
                &formatter,
                SaveRequest {
                    patient_id: &identity.patient,
                    author_id: &identity.author,
                    payload: &payload,
                    mode: commands::mode(draft),
                },
                config.max_save_attempts,
            )
            .await?;
            print_json(&outcome.document)?;
        }
        Command::Section {
            identity,
            section,
            payload,
            draft,
        } => {
            let payload = commands::read_json(&payload)?;
            let store = s3_store(&config).await;
            let outcome = save_section(
                &store,
                &formatter,
                SectionUpdate {
                    patient_id: &identity.patient,
                    author_id: &identity.author,
                    section_id: &section,
                    payload: &payload,
                    mode: commands::mode(draft),
                },
                config.max_save_attempts,
            )
            .await?;
            print_json(&outcome.document)?;
        }
        Command::Show { patient } => {
            let store = s3_store(&config).await;
            let document = store
                .load(&patient)
                .await?
                .ok_or_else(|| eyre::eyre!("no anamnesis stored for patient {patient}"))?;
            print_json(&document)?;
        }
        Command::List => {
            let store = s3_store(&config).await;
            for patient_id in store.patient_ids().await? {
                println!("{patient_id}");
            }
        }
        Command::Init => write_config(&config, &config_path)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn s3_store(config: &CliConfig) -> S3DocumentStore {
    let client = build_client(config.region.as_deref()).await;
    tracing::debug!(bucket = %config.bucket, "using S3 store");
    S3DocumentStore::new(client, config.bucket.clone())
}

fn write_config(config: &CliConfig, path: &Path) -> Result<()> {
    config::save_config(config, path)?;
    println!("{}", path.display());
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
