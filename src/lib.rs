pub mod config;
pub mod domain;
pub mod error;
pub mod expand;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod schema;
