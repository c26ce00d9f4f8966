use anyhow::Result;
use clap::Parser;
use waterway_cli::PlannerClient;
use waterway_core::Coordinate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check whether a point is on water", long_about = None)]
struct Args {
    /// Waterway server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let point = Coordinate::try_new(args.lat, args.lon)?;
    let client = PlannerClient::new(args.url);

    let check = client.check_water(point).await?;
    if check.on_water {
        println!("{:.5}, {:.5} is on water", check.lat, check.lon);
    } else {
        println!("{:.5}, {:.5} is not on water", check.lat, check.lon);
    }
    Ok(())
}
