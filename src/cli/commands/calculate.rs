use anyhow::Result;

use packfill_store::PackSizeRepository;

use super::json_emit::emit_report_json;
use crate::service::PackService;

/// Execute `packfill calculate <QUANTITY>`
pub fn execute_calculate_command<R: PackSizeRepository>(
    service: &PackService<R>,
    quantity: u64,
    json: bool,
) -> Result<()> {
    let report = service.calculate(quantity)?;

    if json {
        println!("{}", emit_report_json(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
