//! Test server harness for E2E testing.
//!
//! Provides `TestSimServer` for spawning real simulator instances in tests.

use std::net::SocketAddr;
use std::sync::Arc;

use prometheus::Registry;
use sim_service::catalog::TENANTS;
use sim_service::config::Config;
use sim_service::observability::SimulatorMetrics;
use sim_service::routes::{self, AppState};
use sim_service::simulation::TrafficGenerator;
use tokio::task::JoinHandle;

/// Test harness for spawning the simulator in E2E tests.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_scrape() -> Result<(), anyhow::Error> {
///     let server = TestSimServer::spawn().await?;
///     server.generator().generate_batch(1.0, 1)?;
///
///     let body = reqwest::get(format!("{}/metrics", server.url()))
///         .await?
///         .text()
///         .await?;
///     assert!(body.contains("stoa_api_requests_total"));
///     Ok(())
/// }
/// ```
pub struct TestSimServer {
    addr: SocketAddr,
    registry: Arc<Registry>,
    metrics: Arc<SimulatorMetrics>,
    generator: Arc<TrafficGenerator>,
    _handle: JoinHandle<()>,
}

impl TestSimServer {
    /// Spawn a new test server instance.
    ///
    /// The server will:
    /// - Build a fresh registry and generator over the demo catalog, so
    ///   every test gets isolated metric state
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    ///
    /// The generation loop is NOT started: tests drive the generator
    /// explicitly so assertions stay deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration or the port bind fails.
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        let registry = Arc::new(Registry::new());
        let metrics = Arc::new(
            SimulatorMetrics::new(&registry)
                .map_err(|e| anyhow::anyhow!("Failed to register metrics: {}", e))?,
        );
        let generator = Arc::new(TrafficGenerator::new(TENANTS, Arc::clone(&metrics)));

        let config = Config {
            bind_address: "127.0.0.1:0".to_string(),
            ..Config::new()
        };

        let state = Arc::new(AppState {
            registry: Arc::clone(&registry),
            config,
        });

        let app = routes::build_routes(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        // Spawn server in background
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            registry,
            metrics,
            generator,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Registry backing the server's `/metrics` endpoint.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Metric vecs shared with the generator; tests can record known series
    /// directly.
    pub fn metrics(&self) -> &Arc<SimulatorMetrics> {
        &self.metrics
    }

    /// The generator wired to this server's registry.
    pub fn generator(&self) -> &Arc<TrafficGenerator> {
        &self.generator
    }
}

impl Drop for TestSimServer {
    fn drop(&mut self) {
        // Abort the HTTP server task so cleanup is immediate when the test
        // completes.
        self._handle.abort();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_spawns_successfully() -> Result<(), anyhow::Error> {
        let server = TestSimServer::spawn().await?;

        assert!(server.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(format!("{}/health", server.url())).await?;
        assert_eq!(response.status(), 200);

        Ok(())
    }

    #[tokio::test]
    async fn test_servers_have_isolated_state() -> Result<(), anyhow::Error> {
        let first = TestSimServer::spawn().await?;
        let second = TestSimServer::spawn().await?;

        first.generator().generate_batch(1.0, 1)?;

        let untouched = reqwest::get(format!("{}/metrics", second.url()))
            .await?
            .text()
            .await?;
        assert!(
            !untouched.contains("stoa_api_requests_total{"),
            "second server saw the first server's traffic"
        );

        Ok(())
    }
}
