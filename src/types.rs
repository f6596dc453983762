//! Output types shared by the service and the CLI.

use std::fmt;

use serde::{Deserialize, Serialize};

use packfill_optimizer::PackResult;

/// One line of a fulfilment: `count` containers of `size` units each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackEntry {
    pub size: u64,
    pub count: u64,
}

/// Outcome of fulfilling a single order.
///
/// Serialized with the key names order clients already consume:
/// `requested`, `fulfilled`, `overpacked`, `totalPacks` and `packs`.
/// `packs` lists the largest containers first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfilmentReport {
    pub requested: u64,
    pub fulfilled: u64,
    pub overpacked: u64,
    pub total_packs: u64,
    pub packs: Vec<PackEntry>,
}

impl FulfilmentReport {
    /// Build a report for `requested` units from the optimizer result.
    #[must_use]
    pub fn new(requested: u64, result: &PackResult) -> Self {
        let packs = result
            .allocation()
            .iter()
            .rev()
            .map(|(&size, &count)| PackEntry { size, count })
            .collect();

        Self {
            requested,
            fulfilled: result.total_items(),
            overpacked: result.overage(requested),
            total_packs: result.total_packs(),
            packs,
        }
    }
}

impl fmt::Display for FulfilmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Requested:   {}", self.requested)?;
        writeln!(f, "Fulfilled:   {}", self.fulfilled)?;
        writeln!(f, "Overpacked:  {}", self.overpacked)?;
        writeln!(f, "Total packs: {}", self.total_packs)?;
        for entry in &self.packs {
            writeln!(f, "  {} x {}", entry.count, entry.size)?;
        }
        Ok(())
    }
}

/// Current pack sizes, ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSizesOutput {
    pub sizes: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use packfill_optimizer::calculate;

    const SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

    #[test]
    fn test_report_lists_largest_packs_first() {
        let result = calculate(12001, &SIZES).unwrap();
        let report = FulfilmentReport::new(12001, &result);

        assert_eq!(report.fulfilled, 12250);
        assert_eq!(report.overpacked, 249);
        assert_eq!(report.total_packs, 4);
        assert_eq!(
            report.packs,
            vec![
                PackEntry { size: 5000, count: 2 },
                PackEntry { size: 2000, count: 1 },
                PackEntry { size: 250, count: 1 },
            ]
        );
    }

    #[test]
    fn test_report_json_keys() {
        let result = calculate(251, &SIZES).unwrap();
        let value = serde_json::to_value(FulfilmentReport::new(251, &result)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "requested": 251,
                "fulfilled": 500,
                "overpacked": 249,
                "totalPacks": 1,
                "packs": [{"size": 500, "count": 1}],
            })
        );
    }

    #[test]
    fn test_report_display() {
        let result = calculate(501, &SIZES).unwrap();
        let text = FulfilmentReport::new(501, &result).to_string();

        assert!(text.contains("Fulfilled:   750"));
        assert!(text.contains("  1 x 500\n  1 x 250\n"));
    }
}
