pub mod backend;
pub mod cli;
pub mod config;
pub mod decision;
pub mod error;
pub mod guard;
pub mod pipeline;
pub mod policy;
pub mod server;
pub mod state;
