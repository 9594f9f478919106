//! Storenotes library
//!
//! This library exposes the console core (gateway, entity store, filter
//! engine and services) to the binary and to integration tests.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod services;
pub mod storage;
