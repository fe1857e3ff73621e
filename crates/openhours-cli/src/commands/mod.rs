pub mod config;
pub mod edit;
pub mod grid;
pub mod show;
