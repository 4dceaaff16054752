use api::{
    Config, build,
    store::Catalog,
    telemetry::{get_subscriber, init_subscriber},
};

/// Listing API Server
///
/// Serves a generated product catalog with paginated listing routes.
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// Required environment variables:
/// - IP_ADDRESS: Server bind address (127.0.0.1 for local, 0.0.0.0 for public)
/// - PORT: Server port
///
/// Optional environment variables:
/// - ALLOWED_ORIGINS: CORS origins ("*" for any origin in development, or comma-separated list for production)
/// - CATALOG_SIZE: Number of generated products (defaults to 194)
///
/// Example .env file:
/// IP_ADDRESS=127.0.0.1
/// PORT=8000
/// ALLOWED_ORIGINS=*
/// CATALOG_SIZE=23
///
/// Example development command:
/// IP_ADDRESS=127.0.0.1 PORT=8000 cargo run -p api
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if available
    // This will silently ignore if the file doesn't exist
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = Config::from_env()?;
    let catalog = Catalog::generate(config.catalog_size);
    if catalog.is_empty() {
        tracing::warn!("CATALOG_SIZE is 0, every listing will be empty");
    }
    let products = catalog.len();

    let server = build(&mut config, catalog)?;
    tracing::info!(
        products,
        "Listing API running on http://{}:{}/api/products",
        config.ip,
        config.port
    );
    server.await?;
    Ok(())
}
