use std::net::IpAddr;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio::commands::{email::EmailCommand, serve::serve};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        clap_complete::generate(
            shell,
            &mut Cli::command(),
            env!("CARGO_BIN_NAME"),
            &mut std::io::stdout(),
        );
        return Ok(());
    }

    dotenvy::dotenv().ok();

    init_tracing();

    let mut config = folio_config::load().context("Failed to load config")?;

    match cli.command {
        Command::Serve { host, port } => {
            config.http.host = host.unwrap_or(config.http.host);
            config.http.port = port.unwrap_or(config.http.port);
            serve(config).await?
        }
        Command::Email { command } => command.invoke(config).await?,
        Command::CheckConfig { verbose } => {
            verbose.then(|| println!("{config:#?}"));
        }
        Command::Completion { .. } => unreachable!(),
    }

    Ok(())
}

/// Backend of the portfolio contact form: receives submissions over HTTP and
/// relays them to the site owner by email.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the REST API server for the portfolio contact form
    #[command(aliases(["run", "start", "r", "s"]))]
    Serve {
        /// Listen on this address instead of `http.host`
        #[arg(long)]
        host: Option<IpAddr>,
        /// Listen on this port instead of `http.port` / `PORT`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Test email deliverability
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Validate configuration
    CheckConfig {
        /// Print a debug representation of the config
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let fmt_layer = fmt_layer.pretty();

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::from_default_env()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_overrides() {
        let cli = Cli::try_parse_from(["folio", "start", "--port", "8080"]).unwrap();

        assert!(matches!(
            cli.command,
            Command::Serve {
                host: None,
                port: Some(8080)
            }
        ));
    }

    #[test]
    fn email_test_recipient_is_optional() {
        let cli = Cli::try_parse_from(["folio", "email", "test"]).unwrap();

        assert!(matches!(cli.command, Command::Email { .. }));
    }
}
