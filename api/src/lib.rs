pub mod routes;
pub mod store;
pub mod telemetry;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use payloads::TOTAL_COUNT_HEADER;
use std::net::TcpListener;

use crate::store::Catalog;

/// Number of products served when `CATALOG_SIZE` is not set.
pub const DEFAULT_CATALOG_SIZE: u64 = 194;

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, catalog: Catalog) -> std::io::Result<Server> {
    let catalog = web::Data::new(catalog);

    // Clone config values for use in closure
    let allowed_origins = config.allowed_origins.clone();

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        // Browsers only let scripts read the total-count header when it
        // is explicitly exposed
        let cors = if allowed_origins.contains(&"*".to_string()) {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .expose_headers([TOTAL_COUNT_HEADER])
        } else {
            let mut cors = Cors::default()
                .allow_any_method()
                .allow_any_header()
                .expose_headers([TOTAL_COUNT_HEADER]);

            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            cors
        };

        App::new()
            .wrap(cors)
            .service(routes::api_services())
            .app_data(catalog.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    /// List of allowed CORS origins. Use "*" to allow any origin (development only)
    pub allowed_origins: Vec<String>,
    /// Number of generated products in the catalog
    pub catalog_size: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string()) // Default to allow any origin for development
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let catalog_size = match var("CATALOG_SIZE") {
            Ok(size) => size.parse().context("CATALOG_SIZE must be a number")?,
            Err(_) => DEFAULT_CATALOG_SIZE,
        };

        Ok(Config {
            ip: var("IP_ADDRESS").context("IP_ADDRESS must be set")?,
            port: var("PORT")
                .context("PORT must be set")?
                .parse()
                .context("PORT must be a port number")?,
            allowed_origins,
            catalog_size,
        })
    }
}
