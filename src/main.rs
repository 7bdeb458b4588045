use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use dayreport::auth::TokenIssuer;
use dayreport::config::ServerConfig;
use dayreport::server::{AppState, create_router};
use dayreport::store::{SqliteStore, Store};
use dayreport::types::{Profile, Role};

#[cfg(unix)]
fn set_restrictive_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        tracing::warn!("Failed to set permissions on {}: {e}", path.display());
    }
}

#[derive(Parser)]
#[command(name = "dayreport")]
#[command(about = "Daily report portal server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// TOML file with server settings; flags below override it
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database and admin token
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create database and admin token)
    Init {
        /// Data directory for the database and admin token
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },

    /// Create a profile and print a token for it
    AddProfile {
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        #[arg(long)]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        /// Role tag, e.g. "Cashier" or "Senior Manager"
        #[arg(long)]
        role: Option<String>,
    },
}

fn open_store(data_dir: &Path) -> anyhow::Result<SqliteStore> {
    let store = SqliteStore::new(data_dir.join("dayreport.db"))?;
    store.initialize()?;
    Ok(store)
}

fn parse_role(tag: &str) -> anyhow::Result<Role> {
    match Role::parse(tag) {
        Some(role) => Ok(role),
        None => {
            let known: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
            bail!("Unknown role '{tag}'. Known roles: {}", known.join(", "))
        }
    }
}

fn run_init(data_dir: &Path, non_interactive: bool) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let store = open_store(data_dir)?;
    let token_file = data_dir.join(".admin_token");

    if store.has_admin_token()? {
        bail!(
            "Server already initialized. Admin token exists at: {}",
            token_file.display()
        );
    }

    let issuer = TokenIssuer::new();
    let issued = issuer.issue_stored(&store, None, None)?;
    fs::write(&token_file, &issued.raw)?;

    #[cfg(unix)]
    set_restrictive_permissions(&token_file);

    println!();
    println!("========================================");
    println!("Admin token (save this, it won't be shown again):");
    println!();
    println!("  {}", issued.raw);
    println!();
    println!("Token also written to: {}", token_file.display());
    println!("========================================");
    println!();

    if !non_interactive {
        create_default_profile_prompt(&store, &issuer)?;
    }

    Ok(())
}

fn create_profile(
    store: &SqliteStore,
    issuer: &TokenIssuer,
    first_name: &str,
    last_name: &str,
    role: Option<Role>,
) -> anyhow::Result<(Profile, String)> {
    let now = Utc::now();
    let profile = Profile {
        id: Uuid::new_v4().to_string(),
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        role,
        created_at: now,
        updated_at: now,
    };
    store.create_profile(&profile)?;

    let issued = issuer.issue_stored(store, Some(&profile.id), None)?;
    Ok((profile, issued.raw))
}

fn print_profile_token(profile: &Profile, raw_token: &str) {
    println!();
    println!("========================================");
    println!(
        "Profile '{}' ({}) created.",
        profile.display_name(),
        profile.role.map_or("no role", |r| r.as_str())
    );
    println!();
    println!("Token (save this, it won't be shown again):");
    println!();
    println!("  {raw_token}");
    println!("========================================");
    println!();
}

fn create_default_profile_prompt(store: &SqliteStore, issuer: &TokenIssuer) -> anyhow::Result<()> {
    let create = inquire::Confirm::new("Would you like to create a Senior Manager profile?")
        .with_default(false)
        .prompt()?;

    if !create {
        return Ok(());
    }

    let first_name = inquire::Text::new("First name:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Err("First name cannot be empty".into())
            } else {
                Ok(inquire::validator::Validation::Valid)
            }
        })
        .prompt()?;
    let last_name = inquire::Text::new("Last name:").prompt()?;

    let (profile, raw_token) = create_profile(
        store,
        issuer,
        &first_name,
        &last_name,
        Some(Role::SeniorManager),
    )?;
    print_profile_token(&profile, &raw_token);

    Ok(())
}

fn run_add_profile(
    data_dir: &Path,
    first_name: &str,
    last_name: &str,
    role: Option<&str>,
) -> anyhow::Result<()> {
    if first_name.trim().is_empty() {
        bail!("First name cannot be empty");
    }
    let role = role.map(parse_role).transpose()?;

    let db_path = data_dir.join("dayreport.db");
    if !db_path.exists() {
        bail!("Server not initialized. Run 'dayreport admin init' first.");
    }
    let store = open_store(data_dir)?;
    if !store.has_admin_token()? {
        bail!("Server not initialized. Run 'dayreport admin init' first.");
    }

    let (profile, raw_token) =
        create_profile(&store, &TokenIssuer::new(), first_name, last_name, role)?;
    print_profile_token(&profile, &raw_token);
    Ok(())
}

fn load_config(
    file: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    data_dir: Option<PathBuf>,
) -> anyhow::Result<ServerConfig> {
    let mut config = match file {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    };
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(data_dir) = data_dir {
        config.data_dir = data_dir;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dayreport=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                non_interactive,
            } => {
                run_init(&data_dir, non_interactive)?;
            }
            AdminCommands::AddProfile {
                data_dir,
                first_name,
                last_name,
                role,
            } => {
                run_add_profile(&data_dir, &first_name, &last_name, role.as_deref())?;
            }
        },
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let config = load_config(config, host, port, data_dir)?;

            let token_file = config.admin_token_path();
            if !token_file.exists() {
                bail!(
                    "Server not initialized. Run 'dayreport admin init' first to create the database and admin token."
                );
            }

            let store = SqliteStore::new(config.db_path())?;
            store.initialize()?;
            if !store.has_admin_token()? {
                bail!(
                    "Server not initialized. Run 'dayreport admin init' first to create the database and admin token."
                );
            }

            info!("Admin token available at {}", token_file.display());

            let state = Arc::new(AppState::new(Arc::new(store), &config));
            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!(
                "Starting server on {} (summary window {} days)",
                addr, config.summary_window_days
            );

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
