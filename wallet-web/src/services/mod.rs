//! Browser-side services: wallet interop, page events, config

pub mod config;
pub mod events;
pub mod wallet;
