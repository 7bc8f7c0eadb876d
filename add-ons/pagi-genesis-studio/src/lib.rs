//! pagi-genesis-studio: local web front end for the Genesis project generator.
//!
//! One page: prompt form, quick actions (list files, start preview server, HTML check),
//! a file viewer over the project root, and quick preview (open browser, restart server).
//! All generation goes through `pagi_genesis_core::run_generation`.

pub mod app;
pub mod render;
pub mod routes;

pub use app::{BrowserOpener, StudioState};
pub use routes::build_router;
