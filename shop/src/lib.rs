//! Mini Shop: a shared cart store and catalog client mounted by a composition shell.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shell;
