use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{optimize::OptimizeArgs, validate::ValidateArgs};

mod file_utils;
mod optimize;
mod parsers;
mod table;
mod validate;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sends bookings to the route optimizer and prints the result
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Checks a request file without calling the route optimizer
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args).await?,
        Some(Commands::Validate { args }) => validate::run(args)?,
        None => {}
    }

    Ok(())
}
