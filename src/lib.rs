pub mod adapters;
pub mod analyzers;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod infra;
pub mod output;
pub mod parser;
pub mod record;
pub mod services;
pub mod stats;
pub mod web;
