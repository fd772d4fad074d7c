use std::path::PathBuf;

use clap::Args;
use shuttle_dispatch::config::DispatchConfig;
use tracing::info;

use crate::file_utils::read_request;

#[derive(Args)]
pub struct ValidateArgs {
    /// The request file to check
    #[arg(short, long)]
    input: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<(), anyhow::Error> {
    let config = DispatchConfig::from_env()?;
    let request = read_request(&args.input)?.build_request(&config, jiff::Timestamp::now())?;

    info!(
        bookings = request.bookings().len(),
        vehicles = request.vehicles().len(),
        passengers = request
            .bookings()
            .iter()
            .map(|booking| booking.pax_count() as u64)
            .sum::<u64>(),
        "{} is a valid request",
        args.input.display()
    );

    Ok(())
}
