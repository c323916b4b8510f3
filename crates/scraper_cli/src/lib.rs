//! Command-line front end: argument parsing, configuration and terminal rendering.
pub mod cli;
pub mod config;
pub mod render;
pub mod run;
