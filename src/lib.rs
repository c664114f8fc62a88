//! Library exports for authflow, shared between the binary and tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod models;
pub mod navigation;
pub mod session;
pub mod startup;
pub mod state;
pub mod storage;
pub mod utils;
