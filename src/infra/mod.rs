//! Concrete provider access over HTTP.

pub mod http_source;

pub use http_source::HttpSource;
