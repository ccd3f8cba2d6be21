//! Season "wrapped" summaries for Fantasy Premier League managers.
//!
//! [`FplClient`] talks to the public FPL API, [`aggregator`] gathers one
//! manager's season, [`stats`] derives the summary and [`validation`]
//! checks it. [`service`] ties these together behind a cache and
//! [`server`] exposes them over HTTP.

pub use client::FplClient;
pub use error::{ErrorKind, FplError, Result};
pub use fpl_api::RetryPolicy;
pub use model::*;

pub mod aggregator;
pub mod cache;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub(crate) mod fpl_api;
pub mod model;
pub mod rate_limiter;
pub mod server;
pub mod service;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod test_support;
