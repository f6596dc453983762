use std::collections::BTreeMap;

use super::Config;

impl Config {
    /// Effective configuration as `key -> (value, source)` for display.
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, String)> {
        let mut entries = BTreeMap::new();
        let mut push = |key: &str, value: String| {
            entries.insert(
                key.to_string(),
                (value, self.source_of(key).as_str().to_string()),
            );
        };

        push("state_dir", self.state_dir.display().to_string());
        push("store_path", self.store_path().display().to_string());
        push(
            "initial_sizes",
            self.initial_sizes()
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(","),
        );
        push("max_quantity", self.max_quantity().to_string());
        push("verbose", self.verbose().to_string());

        if let Some(path) = &self.config_path {
            entries.insert(
                "config_path".to_string(),
                (path.display().to_string(), "config".to_string()),
            );
        }

        entries
    }
}
