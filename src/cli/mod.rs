//! CLI command handlers

pub mod commands;

pub use commands::{add, form, generate, inspect, list, run_form, show, FieldArgs};
