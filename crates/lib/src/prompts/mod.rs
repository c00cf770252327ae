//! # Prompt Templates
//!
//! Default templates for the generative tasks. The server can replace any of
//! them from configuration.

pub mod tasks;
