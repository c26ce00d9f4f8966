use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use waterway_cli::{parse_vessel, PlannerClient};
use waterway_core::Coordinate;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a water-only trip", long_about = None)]
struct Args {
    /// Waterway server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    #[arg(long, allow_hyphen_values = true)]
    start_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    start_lon: f64,

    #[arg(long, allow_hyphen_values = true)]
    end_lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    end_lon: f64,

    /// motor, kayak or sup
    #[arg(long, default_value = "kayak")]
    vessel: String,

    /// RFC 3339 start time (defaults to now on the server)
    #[arg(long)]
    start_time: Option<DateTime<Utc>>,

    /// Only plan the route, without creating a trip
    #[arg(long)]
    route_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let start = Coordinate::try_new(args.start_lat, args.start_lon)?;
    let end = Coordinate::try_new(args.end_lat, args.end_lon)?;
    let client = PlannerClient::new(args.url);

    if args.route_only {
        let planned = client.plan_route(start, end).await?;
        println!(
            "Route ({}): {} points, {:.0}m",
            planned.source, planned.points, planned.distance_m
        );
        for point in &planned.route {
            println!("  {:.6}, {:.6}", point.lat, point.lon);
        }
        return Ok(());
    }

    let vessel = parse_vessel(&args.vessel)?;
    match client.create_trip(start, end, vessel, args.start_time).await {
        Ok(trip) => {
            println!("Trip {} ({})", trip.id(), trip.vessel_type().display_name());
            println!("Starts: {}", trip.start_time().to_rfc3339());
            println!("Route: {} points", trip.route().len());
            for point in trip.route() {
                println!("  {:.6}, {:.6}", point.lat, point.lon);
            }
        }
        Err(e) => {
            eprintln!("Failed to create trip: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
