#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod config;
mod error;
pub mod fetch;
mod parse;
pub mod registry;
pub mod routes;

pub use error::{Error, Result};
pub use parse::{extract, MenuItem, Nutrient, Reading};

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Installs the `RUST_LOG` driven logger. `tracing` spans and events are forwarded to it.
pub fn init_logging() {
    pretty_env_logger::init();
}
