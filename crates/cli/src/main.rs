use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hai_mcp_core::{
    DEFAULT_REGION,
    credentials::{
        PartialCredentials, SECRET_ID_VARIABLE, SECRET_KEY_VARIABLE, TOKEN_VARIABLE,
        get_credentials_path, resolve_credentials,
    },
};
use hai_mcp_tencent::{TencentProvider, TencentProviderConfig};
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod list;
    pub mod power;
    pub mod query;
    pub mod serve;
    pub mod setup;
    pub mod spawn;
    pub mod terminate;
}

#[derive(Parser)]
#[command(name = "hai-mcp")]
#[command(about = "Tencent Cloud HAI MCP server and CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    #[arg(long, global = true, env = SECRET_ID_VARIABLE, hide_env_values = true)]
    secret_id: Option<String>,

    #[arg(long, global = true, env = SECRET_KEY_VARIABLE, hide_env_values = true)]
    secret_key: Option<String>,

    #[arg(long, global = true, env = TOKEN_VARIABLE, hide_env_values = true)]
    token: Option<String>,

    #[arg(long, global = true, env = "HAI_ENDPOINT", help = "HAI API endpoint URL")]
    endpoint: Option<String>,

    #[arg(long, global = true, env = "HAI_DEFAULT_REGION", default_value = DEFAULT_REGION)]
    default_region: String,

    #[arg(
        long,
        global = true,
        env = "HAI_BUNDLE_TYPES",
        help = "CSV file served as resource://instance_type instead of the built-in table"
    )]
    bundle_types: Option<PathBuf>,
}

impl GlobalArgs {
    fn explicit_credentials(&self) -> PartialCredentials {
        PartialCredentials {
            secret_id: self.secret_id.clone(),
            secret_key: self.secret_key.clone(),
            token: self.token.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (the default)
    Serve,
    /// Save the resolved credentials to the profile file
    Configure,
    /// List regions
    Regions,
    List {
        #[arg(long = "region", help = "Region to list; repeat for several, omit for all")]
        regions: Vec<String>,
    },
    /// Find the region hosting each instance
    Locate {
        #[arg(required = true)]
        instance_ids: Vec<String>,
        #[arg(long = "region", help = "Restrict the scan to these regions")]
        regions: Vec<String>,
    },
    Applications {
        #[arg(long)]
        region: Option<String>,
    },
    Create {
        #[arg(long, help = "Defaults to --default-region")]
        region: Option<String>,
        #[arg(help = "Application template id")]
        application_id: String,
        #[arg(help = "Machine bundle, e.g. XL")]
        bundle_type: String,
        #[arg(long)]
        name: Option<String>,
    },
    Start {
        instance_id: String,
        #[arg(long, help = "Looked up across regions when omitted")]
        region: Option<String>,
    },
    Stop {
        instance_id: String,
        #[arg(long, help = "Looked up across regions when omitted")]
        region: Option<String>,
    },
    Terminate {
        #[arg(required = true, help = "The HAI instance ids to terminate")]
        instance_ids: Vec<String>,
        #[arg(long)]
        region: String,
    },
    Network {
        #[arg(required = true)]
        instance_ids: Vec<String>,
        #[arg(long)]
        region: String,
    },
    Login {
        instance_id: String,
        #[arg(long, help = "Looked up across regions when omitted")]
        region: Option<String>,
    },
}

fn init_tracing() {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let profile_path = get_credentials_path().ok();
    let credentials =
        resolve_credentials(cli.global.explicit_credentials(), profile_path.as_deref())
            .await
            .context("HAI credentials are required")?;
    let mut config = TencentProviderConfig::new(credentials);
    config.endpoint = cli.global.endpoint;
    config.default_region = Some(cli.global.default_region);
    let provider = TencentProvider::new(&config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::serve(provider, cli.global.bundle_types).await?,
        Commands::Configure => {
            let path = profile_path.context("no home directory for the credentials profile")?;
            commands::setup::configure(&config.credentials, &path).await?
        }
        Commands::Regions => commands::list::regions(&provider).await?,
        Commands::List { regions } => commands::list::instances(&provider, &regions).await?,
        Commands::Locate {
            instance_ids,
            regions,
        } => commands::list::locate(&provider, &instance_ids, &regions).await?,
        Commands::Applications { region } => {
            commands::list::applications(&provider, region.as_deref()).await?
        }
        Commands::Create {
            region,
            application_id,
            bundle_type,
            name,
        } => {
            commands::spawn::create(
                &provider,
                region.as_deref(),
                &application_id,
                &bundle_type,
                name.as_deref(),
            )
            .await?
        }
        Commands::Start {
            instance_id,
            region,
        } => commands::power::start(&provider, &instance_id, region).await?,
        Commands::Stop {
            instance_id,
            region,
        } => commands::power::stop(&provider, &instance_id, region).await?,
        Commands::Terminate {
            instance_ids,
            region,
        } => commands::terminate::terminate(&provider, &region, &instance_ids).await?,
        Commands::Network {
            instance_ids,
            region,
        } => commands::query::network(&provider, &region, &instance_ids).await?,
        Commands::Login {
            instance_id,
            region,
        } => commands::query::login(&provider, &instance_id, region).await?,
    }
    Ok(())
}
