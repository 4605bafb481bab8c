//! Portfolio snapshot loader
//!
//! Loads one or more snapshot files and merges them into a single
//! `PortfolioSnapshot`, rejecting duplicate ids across files. RON is the
//! native format; enable the `serde_json` feature to also accept `.json`
//! files.

use crate::error::{Error, Result};
use crate::snapshot::PortfolioSnapshot;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Loader for portfolio snapshot files
#[derive(Debug, Default)]
pub struct Loader {
    snapshot: PortfolioSnapshot,
}

impl Loader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single snapshot file, dispatching on its extension
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        match extension {
            "ron" => {
                let content = fs::read_to_string(path)?;
                self.load_ron_str(&content)
            }
            #[cfg(feature = "serde_json")]
            "json" => {
                let content = fs::read_to_string(path)?;
                self.load_json_str(&content)
            }
            other => Err(Error::UnsupportedFormat(format!(
                "{} ({})",
                path.display(),
                if other.is_empty() { "no extension" } else { other }
            ))),
        }
    }

    /// Load a snapshot from a RON string and merge it
    pub fn load_ron_str(&mut self, content: &str) -> Result<()> {
        let snapshot: PortfolioSnapshot = ron::from_str(content)?;
        self.merge(snapshot)
    }

    /// Load a snapshot from a JSON string and merge it
    #[cfg(feature = "serde_json")]
    pub fn load_json_str(&mut self, content: &str) -> Result<()> {
        let snapshot: PortfolioSnapshot = serde_json::from_str(content)?;
        self.merge(snapshot)
    }

    /// Load every snapshot file in a directory tree
    pub fn load_directory(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Not a directory: {:?}", path),
            )));
        }

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.is_dir() {
                self.load_directory(&file_path)?;
            } else if is_snapshot_file(&file_path) {
                self.load_file(&file_path)?;
            }
        }

        Ok(())
    }

    /// Finish loading and return the merged snapshot
    pub fn finish(self) -> PortfolioSnapshot {
        self.snapshot
    }

    /// The merged snapshot so far
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    fn merge(&mut self, incoming: PortfolioSnapshot) -> Result<()> {
        let mut project_ids: HashSet<&str> = self
            .snapshot
            .projects
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        for project in &incoming.projects {
            if !project_ids.insert(project.id.as_str()) {
                return Err(Error::DuplicateId(format!("project {}", project.id)));
            }
        }

        let mut category_ids: HashSet<&str> = self
            .snapshot
            .categories
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        for category in &incoming.categories {
            if !category_ids.insert(category.id.as_str()) {
                return Err(Error::DuplicateId(format!("category {}", category.id)));
            }
        }

        let mut allocation_keys: HashSet<(&str, &str)> = self
            .snapshot
            .allocations
            .iter()
            .map(|a| (a.project_id.as_str(), a.category_id.as_str()))
            .collect();
        for entry in &incoming.allocations {
            if !allocation_keys.insert((entry.project_id.as_str(), entry.category_id.as_str())) {
                return Err(Error::DuplicateId(format!(
                    "allocation {}/{}",
                    entry.project_id, entry.category_id
                )));
            }
        }

        let mut scenario_ids: HashSet<&str> = self
            .snapshot
            .scenarios
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        for scenario in &incoming.scenarios {
            if !scenario_ids.insert(scenario.id.as_str()) {
                return Err(Error::DuplicateId(format!("scenario {}", scenario.id)));
            }
        }

        let baseline_count = self
            .snapshot
            .scenarios
            .iter()
            .chain(&incoming.scenarios)
            .filter(|s| s.is_baseline())
            .count();
        if baseline_count > 1 {
            return Err(Error::InvalidSnapshot(
                "more than one baseline scenario".to_string(),
            ));
        }

        self.snapshot.projects.extend(incoming.projects);
        self.snapshot.categories.extend(incoming.categories);
        self.snapshot.allocations.extend(incoming.allocations);
        self.snapshot.project_types.extend(incoming.project_types);
        self.snapshot.scenarios.extend(incoming.scenarios);
        Ok(())
    }
}

fn is_snapshot_file(path: &Path) -> bool {
    let extension = path.extension().and_then(|e| e.to_str());
    match extension {
        Some("ron") => true,
        #[cfg(feature = "serde_json")]
        Some("json") => true,
        _ => false,
    }
}
