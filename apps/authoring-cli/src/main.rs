//! `oscal-author` binary
//!
//! Extracts, fills and previews authorization templates locally, and talks
//! to the authoring backend for template and authorization management.

use anyhow::Context;
use api_client::{ClientConfig, MemorySession, OscalClient, SessionStore};
use authoring_cli::{
    authorization_request, builtin_listing, fill, load_values, preview, variables_report,
};
use clap::{Parser, Subcommand};
use oscal_types::{
    ConversionRequest, DocumentFormat, DocumentKind, ProfileResolveRequest, ValidationRequest,
};
use std::fs;
use std::path::{Path, PathBuf};
use template_engine::get_template_source;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "oscal-author")]
#[command(version, about = "Author OSCAL authorization documents from templates")]
struct Args {
    /// Client configuration file (TOML); defaults to OSCAL_API_* variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer template reads from the built-in templates when the backend is down
    #[arg(long, global = true)]
    mock: bool,

    /// Bearer token for the backend
    #[arg(long, global = true, env = "OSCAL_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log in with this user before remote commands
    #[arg(long, global = true, env = "OSCAL_USERNAME")]
    username: Option<String>,

    #[arg(long, global = true, env = "OSCAL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the variables of a template file
    Variables {
        file: PathBuf,
        /// Print a JSON array instead of one name per line
        #[arg(long)]
        json: bool,
    },
    /// Substitute values into a template file
    Fill {
        file: PathBuf,
        /// TOML or JSON table of values
        #[arg(long)]
        values: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail if any variable is left without a value
        #[arg(long)]
        strict: bool,
    },
    /// Render a template file to HTML
    Preview {
        file: PathBuf,
        #[arg(long)]
        values: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List built-in templates, or print one
    Builtin { name: Option<String> },
    /// List templates stored on the backend
    Templates,
    /// Download a template's content
    Pull {
        id: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fill a template and submit the authorization
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        template_id: String,
        #[arg(long)]
        values: PathBuf,
        /// SSP file reference
        #[arg(long)]
        ssp: String,
        /// SAR file reference
        #[arg(long)]
        sar: Option<String>,
    },
    /// List submitted authorizations
    Authorizations,
    /// Validate an OSCAL document
    Validate {
        file: PathBuf,
        /// Document type (catalog, profile, ssp, ...); detected if omitted
        #[arg(long = "type")]
        document_type: Option<String>,
    },
    /// Convert an OSCAL document between XML, JSON and YAML
    Convert {
        file: PathBuf,
        #[arg(long)]
        to: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resolve a profile into a catalog
    Resolve {
        file: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn format_of(path: &Path, content: &str) -> DocumentFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(DocumentFormat::parse)
        .unwrap_or_else(|| DocumentFormat::sniff(content))
}

async fn connect(args: &Args) -> anyhow::Result<OscalClient> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if args.mock {
        config.mock_fallback = true;
    }
    tracing::debug!(base_url = %config.base_url, "connecting");

    let session = match &args.token {
        Some(token) => MemorySession::with_token(token.clone()),
        None => MemorySession::new(),
    };
    let client = OscalClient::new(config, session)?;

    if !client.session().is_authenticated() {
        if let (Some(username), Some(password)) = (&args.username, &args.password) {
            client.login(username, password).await?;
        }
    }
    Ok(client)
}

async fn run(args: Args) -> anyhow::Result<()> {
    match &args.command {
        Command::Variables { file, json } => {
            println!("{}", variables_report(&read_file(file)?, *json)?);
        }
        Command::Fill {
            file,
            values,
            output,
            strict,
        } => {
            let values = load_values(values)?;
            let filled = fill(&read_file(file)?, &values, *strict)?;
            write_output(output.as_deref(), &filled)?;
        }
        Command::Preview {
            file,
            values,
            output,
        } => {
            let values = values.as_ref().map(load_values).transpose()?;
            let html = preview(&read_file(file)?, values.as_ref());
            write_output(output.as_deref(), &html)?;
        }
        Command::Builtin { name: None } => println!("{}", builtin_listing()),
        Command::Builtin { name: Some(name) } => println!("{}", get_template_source(name)?),
        Command::Templates => {
            let client = connect(&args).await?;
            for template in client.list_templates().await? {
                println!(
                    "{}  {} ({} variables)",
                    template.id(),
                    template.name(),
                    template.variables().len()
                );
            }
        }
        Command::Pull { id, output } => {
            let client = connect(&args).await?;
            let template = client.get_template(id).await?;
            write_output(output.as_deref(), template.content())?;
        }
        Command::Submit {
            name,
            template_id,
            values,
            ssp,
            sar,
        } => {
            let values = load_values(values)?;
            let client = connect(&args).await?;
            let template = client
                .get_template(template_id)
                .await
                .with_context(|| format!("Failed to fetch template {}", template_id))?;
            let request = authorization_request(&template, name, &values, ssp, sar.as_deref())?;
            let created = client.create_authorization(&request).await?;
            println!("{} {} ({})", created.id, created.name, created.status);
        }
        Command::Authorizations => {
            let client = connect(&args).await?;
            for authorization in client.list_authorizations().await? {
                println!(
                    "{}  {}  {}  template={}",
                    authorization.id,
                    authorization.status,
                    authorization.name,
                    authorization.template_id
                );
            }
        }
        Command::Validate {
            file,
            document_type,
        } => {
            let content = read_file(file)?;
            let document_type = match document_type {
                Some(name) => Some(
                    DocumentKind::parse(name)
                        .with_context(|| format!("Unknown document type: {}", name))?,
                ),
                None => DocumentKind::detect(&content),
            };
            let request = ValidationRequest {
                format: format_of(file, &content),
                document_type,
                content,
            };
            let client = connect(&args).await?;
            let report = client.validate(&request).await?;
            for issue in report.errors.iter().chain(&report.warnings) {
                match issue.path.as_deref() {
                    Some(path) => println!("{:?}: {} ({})", issue.severity, issue.message, path),
                    None => println!("{:?}: {}", issue.severity, issue.message),
                }
            }
            if !report.valid {
                anyhow::bail!("{} is not valid ({} issues)", file.display(), report.issue_count());
            }
            println!("{} is valid", file.display());
        }
        Command::Convert { file, to, output } => {
            let to_format = DocumentFormat::parse(to)
                .with_context(|| format!("Unknown format: {}", to))?;
            let content = read_file(file)?;
            let request = ConversionRequest {
                from_format: format_of(file, &content),
                to_format,
                content,
            };
            let client = connect(&args).await?;
            let converted = client.convert(&request).await?;
            write_output(output.as_deref(), &converted.content)?;
        }
        Command::Resolve { file, output } => {
            let content = read_file(file)?;
            let request = ProfileResolveRequest {
                format: format_of(file, &content),
                content,
            };
            let client = connect(&args).await?;
            let resolved = client.resolve_profile(&request).await?;
            if let Some(count) = resolved.control_count {
                tracing::info!("Resolved {} controls", count);
            }
            write_output(output.as_deref(), &resolved.content)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(args).await
}
