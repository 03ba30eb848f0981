//! gofig CLI
//!
//! Entry point for the `gofig` command-line tool.

use clap::{Parser, Subcommand};
use gofig::{
    logout, reconcile, registry, token, GoCmd, GoEnv, Netrc, RegistryClient, LOGIN_NAME,
    PUBLIC_GOPROXY,
};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gofig")]
#[command(about = "Authenticate with a Go module-proxy registry", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and route modules through your registry proxy
    Login {
        /// The registry URL to verify your login credentials and retrieve
        /// your GOPROXY URL
        #[arg(
            long,
            short = 'r',
            default_value = registry::DEFAULT_REGISTRY,
            env = "GOFIG_REGISTRY"
        )]
        registry: String,

        /// Retrieve the token credential from stdin
        #[arg(long)]
        token_stdin: bool,
    },

    /// Restore the public proxy chain and drop the stored credential
    Logout {
        /// The registry URL whose credential should be removed
        #[arg(long, default_value = registry::DEFAULT_REGISTRY, env = "GOFIG_REGISTRY")]
        registry: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login {
            registry,
            token_stdin,
        } => run_login(&registry, token_stdin),
        Commands::Logout { registry } => run_logout(&registry),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_login(registry_url: &str, token_stdin: bool) -> gofig::Result<()> {
    let token = if token_stdin {
        token::from_stdin()?
    } else {
        token::prompt()?
    };

    let client = RegistryClient::new(registry_url)?;
    let config = client.login(&token)?;

    let netrc_path = Netrc::default_path()?;
    let mut netrc = Netrc::load(&netrc_path)?;
    netrc.set_machine(&config.proxy_host()?, LOGIN_NAME, &token);
    netrc.save(&netrc_path)?;

    let goenv = GoCmd::locate()?;
    let assignments = reconcile(&goenv, &config.url, &config.private_paths)?;
    goenv.apply_vars(&assignments)?;

    println!("Logged in to {}", registry_url);
    println!("Modules now route through {}", config.url);
    Ok(())
}

fn run_logout(registry_url: &str) -> gofig::Result<()> {
    let goenv = GoCmd::locate()?;
    let registry_host = registry::parse_registry_url(registry_url)?
        .host_str()
        .map(str::to_string);

    let netrc_path = Netrc::default_path()?;
    let mut netrc = Netrc::load(&netrc_path)?;
    if logout(&goenv, &mut netrc, registry_host.as_deref())? {
        netrc.save(&netrc_path)?;
    }

    println!("Logged out; GOPROXY reset to {}", PUBLIC_GOPROXY);
    Ok(())
}
