pub mod api;
pub mod clean;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod materialize;
pub mod preview;
pub mod prompt;
