//! Development preview for page actions.
//!
//! Serves the output directory and re-runs the setup stage whenever a
//! document under the content root changes, so raw markdown mirrors stay in
//! sync while editing.

pub mod server;
pub mod watcher;

pub use server::{serve_dir, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
