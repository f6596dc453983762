use anyhow::Result;

use packfill_store::PackSizeRepository;

use super::json_emit::{SizeChangeOutput, emit_size_change_json, emit_sizes_json};
use crate::cli::args::SizesCommands;
use crate::service::PackService;
use crate::types::PackSizesOutput;

/// Execute `packfill sizes <list|add|remove>`
pub fn execute_sizes_command<R: PackSizeRepository>(
    service: &PackService<R>,
    command: &SizesCommands,
    json: bool,
) -> Result<()> {
    match command {
        SizesCommands::List => {
            let sizes = service.list_packs()?;
            if json {
                println!("{}", emit_sizes_json(&PackSizesOutput { sizes })?);
            } else if sizes.is_empty() {
                println!("No pack sizes configured");
                println!("  Add one with: packfill sizes add <SIZE>");
            } else {
                for size in sizes {
                    println!("{size}");
                }
            }
        }
        SizesCommands::Add { size } => {
            let added = service.add_pack(*size)?;
            if json {
                let output = SizeChangeOutput {
                    size: *size,
                    changed: added,
                    sizes: service.list_packs()?,
                };
                println!("{}", emit_size_change_json(&output)?);
            } else if added {
                println!("✓ Added pack size {size}");
            } else {
                println!("Pack size {size} already present");
            }
        }
        SizesCommands::Remove { size } => {
            service.remove_pack(*size)?;
            if json {
                let output = SizeChangeOutput {
                    size: *size,
                    changed: true,
                    sizes: service.list_packs()?,
                };
                println!("{}", emit_size_change_json(&output)?);
            } else {
                println!("✓ Removed pack size {size}");
            }
        }
    }
    Ok(())
}
