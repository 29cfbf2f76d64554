//! Fun.virtuals.io adapters: HTTP page fetcher and card extractor.

pub mod client;
pub mod parser;

pub use client::{FetchConfig, VirtualsClient};
pub use parser::VirtualsParser;
