use anyhow::Result;
use clap::{Parser, Subcommand};
use geostuff_core::{DEFAULT_HTTP_PORT, database_url};
use geostuff_service::CityService;
use geostuff_storage::PgStorage;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "geostuff")]
#[command(about = "Store cities with PostGIS points and query nearby cities", long_about = None)]
struct Cli {
    /// PostgreSQL connection string (falls back to DATABASE_URL, then postgres:///geostuff)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the PostGIS extension and the cities table if absent
    Init,
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Insert a city
    #[command(allow_negative_numbers = true)]
    Add { location: String, longitude: f64, latitude: f64 },
    /// Show one city
    Get { point_id: i32 },
    /// List all cities
    List,
    /// Cities strictly closer than RADIUS meters to a stored city (the city itself included)
    #[command(allow_negative_numbers = true)]
    Nearby { point_id: i32, radius: f64 },
    /// Recompute every city's geometry from its longitude/latitude
    UpdateGeometries,
}

pub(crate) async fn open_service(url: &str) -> Result<Arc<CityService>> {
    let storage = PgStorage::new(url).await?;
    Ok(Arc::new(CityService::new(Arc::new(storage))))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let url = database_url(cli.database_url.as_deref());

    match cli.command {
        Commands::Init => commands::cities::init(&url).await,
        Commands::Serve { port, host } => commands::serve::run(&url, port, host).await,
        Commands::Add { location, longitude, latitude } => {
            commands::cities::add(&url, location, longitude, latitude).await
        },
        Commands::Get { point_id } => commands::cities::get(&url, point_id).await,
        Commands::List => commands::cities::list(&url).await,
        Commands::Nearby { point_id, radius } => {
            commands::cities::nearby(&url, point_id, radius).await
        },
        Commands::UpdateGeometries => commands::cities::update_geometries(&url).await,
    }
}
