pub mod config;
mod generate;
mod http_layers;
pub mod metrics;
mod payload;
mod search;
pub mod server;
pub mod state;
mod translate;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use generate::make_generate_routes;
pub(self) use search::make_search_routes;
pub(self) use translate::make_translate_routes;
pub use server::{make_app, run_server};
