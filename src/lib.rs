// src/lib.rs

pub mod browser;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod log;
pub mod navigator;
pub mod schedule;
pub mod server;
pub mod specs;
