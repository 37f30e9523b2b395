// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Factlens: Fact-Checking Content Service
//!
//! REST API for credibility analysis of submitted content, reference data
//! about fact-checking sources, and validated media uploads. Runs with or
//! without a database (demo mode).

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod ollama;
pub mod upload;
pub mod validation;
pub mod web;

pub use config::AppConfig;
pub use error::{FactlensError, Result};
