use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use crate::model::profile::Profile;
use crate::model::slip::SlipRecord;

/// Outcome of loading one fixture. A failure is kept as a value so each page
/// can show its own "could not load" state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Ready(T),
    Failed { reason: String },
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            LoadState::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed { .. })
    }

    fn from_result(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => {
                error!(fixture = name, error = %format!("{:#}", e), "Failed to load fixture");
                LoadState::Failed {
                    reason: format!("{:#}", e),
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SalaryFixture {
    salary_slips: Vec<SlipRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncentiveFixture {
    incentive_slips: Vec<SlipRecord>,
}

#[derive(Deserialize)]
struct AllowanceFixture {
    allowances: Vec<SlipRecord>,
}

pub const SALARY_FILE: &str = "salarySlips.json";
pub const INCENTIVE_FILE: &str = "incentiveSlips.json";
pub const ALLOWANCE_FILE: &str = "allowances.json";
pub const PROFILE_FILE: &str = "profile.json";

fn read_fixture<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<T> {
    let path = dir.join(file);
    let raw = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed fixture {:?}", path))
}

/// Static record collections, loaded once per session.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub salary_slips: LoadState<Vec<SlipRecord>>,
    pub incentive_slips: LoadState<Vec<SlipRecord>>,
    pub allowances: LoadState<Vec<SlipRecord>>,
    pub profile: LoadState<Profile>,
}

impl Catalog {
    pub fn load(data_dir: &Path) -> Self {
        let catalog = Self {
            salary_slips: LoadState::from_result(
                SALARY_FILE,
                read_fixture::<SalaryFixture>(data_dir, SALARY_FILE).map(|f| f.salary_slips),
            ),
            incentive_slips: LoadState::from_result(
                INCENTIVE_FILE,
                read_fixture::<IncentiveFixture>(data_dir, INCENTIVE_FILE)
                    .map(|f| f.incentive_slips),
            ),
            allowances: LoadState::from_result(
                ALLOWANCE_FILE,
                read_fixture::<AllowanceFixture>(data_dir, ALLOWANCE_FILE).map(|f| f.allowances),
            ),
            profile: LoadState::from_result(PROFILE_FILE, read_fixture(data_dir, PROFILE_FILE)),
        };

        info!(
            data_dir = %data_dir.display(),
            salary = catalog.salary_slips.ready().map(Vec::len),
            incentive = catalog.incentive_slips.ready().map(Vec::len),
            allowance = catalog.allowances.ready().map(Vec::len),
            "Catalog loaded"
        );
        catalog
    }

    /// Catalog built from in-memory collections.
    pub fn from_records(
        salary_slips: Vec<SlipRecord>,
        incentive_slips: Vec<SlipRecord>,
        allowances: Vec<SlipRecord>,
        profile: Profile,
    ) -> Self {
        Self {
            salary_slips: LoadState::Ready(salary_slips),
            incentive_slips: LoadState::Ready(incentive_slips),
            allowances: LoadState::Ready(allowances),
            profile: LoadState::Ready(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_and_malformed_fixtures_are_failed_states() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SALARY_FILE),
            r#"{"salarySlips":[{"id":"s1","year":2024,"month":"March","pdf":"a.pdf"}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join(ALLOWANCE_FILE), r#"{"allowances": 3}"#).unwrap();

        let catalog = Catalog::load(dir.path());
        assert_eq!(catalog.salary_slips.ready().map(Vec::len), Some(1));
        assert!(catalog.incentive_slips.is_failed());
        assert!(catalog.allowances.is_failed());
        assert!(catalog.profile.is_failed());

        match &catalog.allowances {
            LoadState::Failed { reason } => assert!(reason.contains("allowances.json")),
            LoadState::Ready(_) => panic!("expected a failed state"),
        }
    }
}
