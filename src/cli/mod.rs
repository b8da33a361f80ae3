pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use crate::client::AdminSession;

#[derive(Parser)]
#[command(name = "concord-admin")]
#[command(about = "Concord Admin - command-line dashboard for the Concord Content API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Server base URL (default: CONCORD_SERVER or http://localhost:3000)")]
    pub server: Option<String>,

    #[arg(long, global = true, help = "Staff bearer token (default: CONCORD_TOKEN)")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List records of a content resource")]
    List {
        resource: String,
        #[arg(long, help = "Public view: active records only, no credential sent")]
        public: bool,
    },

    #[command(about = "Create a record from a JSON object")]
    Create {
        resource: String,
        #[arg(long, help = "Record fields as a JSON object")]
        data: String,
    },

    #[command(about = "Update a record; the JSON object must carry _id")]
    Update {
        resource: String,
        #[arg(long, help = "Changed fields as a JSON object including _id")]
        data: String,
    },

    #[command(about = "Permanently delete a record")]
    Delete {
        resource: String,
        #[arg(long)]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    #[command(about = "Show the audit trail, newest first")]
    Audit {
        #[arg(long)]
        resource: Option<String>,
        #[arg(long, help = "CREATE, UPDATE, DELETE, LOGIN or FILE_UPLOAD")]
        action: Option<String>,
        #[arg(long)]
        limit: Option<i64>,
    },

    #[command(about = "Populate a fresh server with demo content")]
    Seed,
}

impl Cli {
    pub fn session(&self) -> anyhow::Result<AdminSession> {
        let server = self
            .server
            .clone()
            .or_else(|| std::env::var("CONCORD_SERVER").ok())
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        let token = self
            .token
            .clone()
            .or_else(|| std::env::var("CONCORD_TOKEN").ok());

        Ok(AdminSession::new(&server, token)?)
    }

    /// Text output unless --json was given; --text wins when both are set.
    pub fn wants_text(&self) -> bool {
        self.text || !self.json
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::List { resource, public } => {
            commands::content::list(&cli, resource, *public).await
        }
        Commands::Create { resource, data } => {
            commands::content::create(&cli, resource, data).await
        }
        Commands::Update { resource, data } => {
            commands::content::update(&cli, resource, data).await
        }
        Commands::Delete { resource, id, yes } => {
            commands::content::delete(&cli, resource, id, *yes).await
        }
        Commands::Audit { resource, action, limit } => {
            commands::audit::show(&cli, resource.as_deref(), action.as_deref(), *limit).await
        }
        Commands::Seed => commands::seed::run(&cli).await,
    }
}
