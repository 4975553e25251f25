use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metrobook_client::config::Config;
use metrobook_client::models::BookingResponse;
use metrobook_client::providers::BackendClient;
use metrobook_client::session::SessionStore;
use metrobook_client::{network, render, services};

#[derive(Parser)]
#[command(name = "metrobook", about = "Metro transit booking client", version)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session
    Login { email: String, password: String },
    /// Create an account and log in
    Register { email: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List bookable stops
    Stops,
    /// Book a ride between two stop ids
    Book { source: i64, destination: i64 },
    /// Show the last booking as a timeline, or its map overlay as JSON
    Last {
        /// Emit the route map overlay as JSON instead of the timeline
        #[arg(long)]
        json: bool,
    },
    /// Emit the full network map overlay as JSON
    Network,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(&cli.config)?;
    let mut store = SessionStore::open(&config.session_file)?;

    match cli.command {
        Command::Login { email, password } => {
            let client = BackendClient::new(&config)?;
            let profile = services::auth::login(&client, &mut store, &email, &password).await?;
            println!("Logged in as {} <{}>", profile.name, profile.email);
        }
        Command::Register { email, password } => {
            let client = BackendClient::new(&config)?;
            let profile = services::auth::register(&client, &mut store, &email, &password).await?;
            println!("Welcome, {} <{}>", profile.name, profile.email);
        }
        Command::Logout => {
            services::auth::logout(&mut store)?;
            println!("Logged out.");
        }
        Command::Whoami => match store.user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
            None => println!("Not logged in."),
        },
        Command::Stops => {
            require_login(&store)?;
            let client = BackendClient::new(&config)?;
            let stops = services::booking::load_stops(&client, &mut store).await?;
            for stop in &stops {
                println!(
                    "{:>4}  {}",
                    stop.id,
                    services::booking::stop_option_label(stop)
                );
            }
        }
        Command::Book {
            source,
            destination,
        } => {
            require_login(&store)?;
            let client = BackendClient::new(&config)?;
            let booking =
                services::booking::book(&client, &mut store, Some(source), Some(destination))
                    .await?;
            print_booking(&booking);
        }
        Command::Last { json } => {
            require_login(&store)?;
            let Some(booking) = services::booking::last_booking(&store) else {
                println!("No booking yet.");
                return Ok(());
            };
            if json {
                let overlay = render::map::build_route_overlay(
                    booking.source_stop.as_deref().unwrap_or_default(),
                    booking.destination_stop.as_deref().unwrap_or_default(),
                    &booking.path,
                    network::STOPS,
                );
                println!("{}", serde_json::to_string_pretty(&overlay)?);
            } else {
                print_booking(booking);
            }
        }
        Command::Network => {
            let overlay = render::map::build_network_overlay(network::LINES, network::STOPS);
            println!("{}", serde_json::to_string_pretty(&overlay)?);
        }
    }

    Ok(())
}

fn require_login(store: &SessionStore) -> Result<(), Box<dyn std::error::Error>> {
    if services::auth::check_auth(store) {
        Ok(())
    } else {
        Err("Not logged in. Run `metrobook login <email> <password>` first.".into())
    }
}

fn print_booking(booking: &BookingResponse) {
    if let Some(reference) = &booking.booking_reference {
        println!(
            "Booking {}  [{}]",
            reference,
            booking.status.as_deref().unwrap_or("UNKNOWN")
        );
    }
    println!(
        "{} -> {}  ({} stops, {} interchanges, ~{:.0} min)",
        booking.source_stop.as_deref().unwrap_or("?"),
        booking.destination_stop.as_deref().unwrap_or("?"),
        booking.total_stops,
        booking.total_interchanges,
        booking.estimated_time
    );
    println!();
    let steps = render::timeline::build_timeline(&booking.path);
    print!("{}", render::timeline::render_text(&steps));
}
