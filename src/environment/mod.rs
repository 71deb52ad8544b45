//! Environment configuration for the local development server
//!
//! This module defines the configuration record a hosting server consumes,
//! the command/event callbacks embedded in it, and the factories that build
//! it at startup.

pub mod command;
pub mod config;
pub mod factory;

pub use command::*;
pub use config::*;
pub use factory::*;
