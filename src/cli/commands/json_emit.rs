//! JSON emit functions for CLI output
//!
//! This module contains functions to emit various CLI outputs as canonical
//! JSON using JCS (RFC 8785) for stable, deterministic output.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::emit_jcs;
use crate::types::{FulfilmentReport, PackSizesOutput};

/// Result of a `sizes add` or `sizes remove` command
#[derive(Debug, Serialize)]
pub struct SizeChangeOutput {
    pub size: u64,
    pub changed: bool,
    pub sizes: Vec<u64>,
}

/// One effective configuration value and where it came from
#[derive(Debug, Serialize)]
pub struct ConfigValueOutput {
    pub value: String,
    pub source: String,
}

pub fn emit_report_json(report: &FulfilmentReport) -> Result<String> {
    emit_jcs(report).context("Failed to emit fulfilment JSON")
}

pub fn emit_sizes_json(output: &PackSizesOutput) -> Result<String> {
    emit_jcs(output).context("Failed to emit pack sizes JSON")
}

pub fn emit_size_change_json(output: &SizeChangeOutput) -> Result<String> {
    emit_jcs(output).context("Failed to emit pack size change JSON")
}

pub fn emit_config_json(output: &BTreeMap<String, ConfigValueOutput>) -> Result<String> {
    emit_jcs(output).context("Failed to emit configuration JSON")
}
