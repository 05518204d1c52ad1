// Server module entry point
// Binds the loopback listener, accepts connections and stops on interrupt

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as `server_loop`
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::error::StartupError;

// Re-export commonly used items
pub use listener::bind_listener;
pub use server_loop::start_server_loop;

/// Serve on `listener` until SIGINT (or SIGTERM on Unix) arrives
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> Result<(), StartupError> {
    let mut shutdown = signal::ShutdownSignal::install().map_err(StartupError::Runtime)?;
    start_server_loop(listener, state, async move { shutdown.recv().await }).await;
    Ok(())
}
