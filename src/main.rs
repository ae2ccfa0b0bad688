use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use glitch::app::App;
use glitch::cli::{parse_args, run_command, CliCommand, USAGE, VERSION};
use glitch::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    match &command {
        CliCommand::Version => {
            println!("glitch {}", VERSION);
            return Ok(());
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Invalid(reason) => {
            eprintln!("glitch: {}\n\n{}", reason, USAGE);
            std::process::exit(2);
        }
        _ => {}
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("glitch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = App::bootstrap(ClientConfig::from_env()).await?;
    run_command(&app, command).await
}
