use api::{Config, DEFAULT_CATALOG_SIZE, store::Catalog, telemetry};
use reqwest::StatusCode;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub client: payloads::APIClient,
}

impl TestApp {
    /// Absolute URL of a path under the api scope.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.client.address)
    }
}

/// Start the api with a catalog of `catalog_size` products on `port`.
pub async fn spawn_app_on_port(port: u16, catalog_size: u64) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
        catalog_size,
    };

    let server = api::build(&mut config, Catalog::generate(catalog_size))
        .expect("Failed to bind test server");
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: payloads::APIClient {
            address: format!("http://127.0.0.1:{}", config.port),
            inner_client: reqwest::Client::new(),
        },
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0, DEFAULT_CATALOG_SIZE).await
}

/// Like [`spawn_app`], with a catalog of the given size.
pub async fn spawn_app_with_catalog(catalog_size: u64) -> TestApp {
    spawn_app_on_port(0, catalog_size).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
