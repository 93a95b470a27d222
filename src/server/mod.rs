// Server module entry
// Listener creation, accept loop and per-connection serving

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

/// Bind the configured address and serve until shutdown.
///
/// Must be called inside a `LocalSet`.
pub async fn run(state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.get_socket_addr()?;
    let listener = create_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, &state);
    start_server_loop(listener, state).await
}
