use std::collections::BTreeMap;

use anyhow::Result;

use super::json_emit::{ConfigValueOutput, emit_config_json};
use crate::Config;

/// Execute `packfill config`
pub fn execute_config_command(config: &Config, json: bool) -> Result<()> {
    let effective = config.effective_config();

    if json {
        let output: BTreeMap<String, ConfigValueOutput> = effective
            .into_iter()
            .map(|(key, (value, source))| (key, ConfigValueOutput { value, source }))
            .collect();
        println!("{}", emit_config_json(&output)?);
        return Ok(());
    }

    println!("Effective configuration:");
    let width = effective.keys().map(String::len).max().unwrap_or(0);
    for (key, (value, source)) in &effective {
        println!("  {key:<width$} = {value}  [{source}]");
    }
    Ok(())
}
