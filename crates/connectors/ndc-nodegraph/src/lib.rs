//! A data source serving node graph frames from a graph API.

pub mod connector;
pub mod error;
pub mod health;
pub mod models;
pub mod query;
pub mod server;
pub mod state;
