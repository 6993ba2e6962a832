use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::{CanonicalField, CanonicalSchema};
use crate::profiles::errors::ProfileError;
use crate::profiles::{BankProfile, OpeningBalancePolicy};
use crate::types::BalanceCleanup;

/// Explicit mapping from bank identifier to its profile, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, Arc<BankProfile>>
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every bank supported out of the box.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        for profile in builtin_profiles() {
            registry.insert(profile);
        }

        registry
    }

    /// Adds or replaces a profile, keyed by its lower-cased id.
    pub fn insert(&mut self, profile: BankProfile) -> Option<Arc<BankProfile>> {
        self.profiles.insert(profile.id.to_lowercase(), Arc::new(profile))
    }

    /// Merges a JSON array of profiles; an entry with a known id replaces the existing profile.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, ProfileError> {
        let profiles: Vec<BankProfile> = serde_json::from_str(json)?;

        for profile in &profiles {
            profile.validate()?;
        }

        let count = profiles.len();

        for profile in profiles {
            let id = profile.id.clone();

            if self.insert(profile).is_some() {
                info!("Profile [{id}] overridden from profile file");
            } else {
                debug!("Profile [{id}] added from profile file");
            }
        }

        Ok(count)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<usize, ProfileError> {
        let json = fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source
        })?;

        self.merge_json(&json)
    }

    /// Looks a bank up by id or display name, ignoring case.
    pub fn resolve(&self, bank: &str) -> Result<Arc<BankProfile>, ProfileError> {
        let key = bank.trim().to_lowercase();

        if let Some(profile) = self.profiles.get(&key) {
            return Ok(profile.clone());
        }

        self.profiles.values()
            .find(|profile| profile.display_name.to_lowercase() == key)
            .cloned()
            .ok_or_else(|| ProfileError::UnknownBank(bank.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BankProfile>> {
        self.profiles.values()
    }
}

fn builtin_profiles() -> Vec<BankProfile> {
    vec![
        BankProfile::new("canara", "Canara Bank", "txn date")
            .with_noise_markers(&["txn date"])
            .with_synonyms(CanonicalField::Description, &["narration"]),

        BankProfile::new("axis", "Axis Bank", "tran date")
            .with_noise_markers(&["opening balance", "tran date", "txn date"])
            .with_end_marker("transaction")
            .with_schema(CanonicalSchema::new("date", "particulars", "debit", "credit", "balance"))
            .with_indicator_columns("dr", "cr")
            .with_opening_balance_policy(OpeningBalancePolicy::BackCalculated),

        BankProfile::new("city-union", "City Union Bank", "date")
            .with_noise_markers(&["total", "date"])
            .with_synonyms(CanonicalField::Description, &["particulars"]),

        BankProfile::new("pnb", "PNB", "txn no.")
            .with_noise_markers(&["txn date"])
            .with_schema(CanonicalSchema::new("date", "description", "dr_amount", "cr_amount", "balance"))
            .with_balance_cleanup(BalanceCleanup::SuffixedDrCr)
    ]
}
