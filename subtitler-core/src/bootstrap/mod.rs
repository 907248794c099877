//! Bootstrap module for initializing the subtitle aggregator
//!
//! This module handles:
//! - Configuration loading
//! - Pattern compilation and provider construction

pub mod config;
pub mod services;

pub use config::load_config;
pub use services::init_manager;
