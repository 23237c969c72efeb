//! HTTP serving surface.

mod handlers;
mod state;

pub use handlers::{router, run_server, ServerError};
pub use state::ServerState;
