//! Image Projection API - HTTP front end for image-projection-core
//!
//! # Module Structure
//!
//! - `config` - Environment-driven server settings
//! - `types` - JSON request bodies
//! - `handlers` - `/processImage`, `/processImageBrightness` and `/status`
//! - `error` - Pipeline failures mapped to HTTP status codes
//! - `router` - Route table and middleware
//! - `server` - Listener and graceful shutdown
//!
//! # Usage
//!
//! ```text
//! POST /processImage
//! {"ImageData": "<base64>", "TransformMatrix": "1;0;0;0;0;1;0;0;0;0;1;0;0;0;0;1"}
//!
//! POST /processImageBrightness
//! {"ImageData": "<base64>", "BrightnessFactor": "1.2"}
//! ```
//!
//! Both respond with a bare base64 PNG as `text/plain`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod types;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::{create_router, AppState};
pub use server::start_server;
pub use types::{ProcessImageBrightnessRequest, ProcessImageRequest};

/// Get the version of the API crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
