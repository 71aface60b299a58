use crate::locate::{run_locate, LocateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use solar_siting::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Solar Siting",
    about = "Find the most suitable location for a solar installation within a map viewport",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Locate the optimal site for a GeoJSON feature collection
    Locate(LocateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Locate(args) => run_locate(args),
    }
}
