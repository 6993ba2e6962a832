use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CanonicalField, CanonicalSchema};
use crate::profiles::errors::ProfileError;
use crate::types::BalanceCleanup;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebitCreditMode {
    #[default]
    SeparateColumns,
    /// One shared amount column plus a column holding a debit/credit marker.
    IndicatorPlusAmount
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpeningBalancePolicy {
    #[default]
    FirstRowBalance,
    /// `first balance - first credit + first debit`
    BackCalculated
}

/// Marker values found in the indicator column.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    /// Marker routing the amount to debit.
    pub debit: String,
    /// Marker routing the amount to credit.
    pub credit: String
}

impl Default for IndicatorValues {
    fn default() -> Self {
        Self {
            debit: "dr".to_string(),
            credit: "cr".to_string()
        }
    }
}

fn default_indicator_labels() -> Vec<String> {
    ["dr/cr", "dr_cr", "drcr"].map(String::from).to_vec()
}

fn default_amount_labels() -> Vec<String> {
    ["amount(inr)", "amount", "amt"].map(String::from).to_vec()
}

/// Declarative description of one bank's statement table.
///
/// Profiles are built once at startup and shared read-only between every
/// pipeline invocation for that bank.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct BankProfile {
    /// Registry key, matched case-insensitively.
    pub id: String,
    /// Name shown to users; also accepted by `--bank`.
    pub display_name: String,
    /// Case-insensitive substring identifying the header row.
    pub header_marker: String,
    /// Substrings marking rows that are not transactions.
    #[serde(default)]
    pub noise_markers: Vec<String>,
    /// Substring of the first row after the last transaction.
    #[serde(default)]
    pub end_marker: Option<String>,
    /// Output names, also the primary matching seeds.
    #[serde(default)]
    pub schema: CanonicalSchema,
    /// Extra raw labels accepted for a field on top of the schema name.
    #[serde(default)]
    pub column_synonyms: BTreeMap<CanonicalField, Vec<String>>,
    /// Separate debit/credit columns, or one amount plus an indicator.
    #[serde(default)]
    pub debit_credit_mode: DebitCreditMode,
    /// Indicator markers; only read in indicator mode.
    #[serde(default)]
    pub indicator_values: IndicatorValues,
    /// Normalized labels of the indicator column.
    #[serde(default = "default_indicator_labels")]
    pub indicator_labels: Vec<String>,
    /// Normalized labels of the shared amount column.
    #[serde(default = "default_amount_labels")]
    pub amount_labels: Vec<String>,
    /// How balance cells are cleaned before parsing.
    #[serde(default)]
    pub balance_cleanup: BalanceCleanup,
    /// How the opening balance is derived from the first row.
    #[serde(default)]
    pub opening_balance_policy: OpeningBalancePolicy
}

impl BankProfile {
    pub fn new(id: &str, display_name: &str, header_marker: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            header_marker: header_marker.to_string(),
            noise_markers: Vec::new(),
            end_marker: None,
            schema: CanonicalSchema::standard(),
            column_synonyms: BTreeMap::new(),
            debit_credit_mode: DebitCreditMode::SeparateColumns,
            indicator_values: IndicatorValues::default(),
            indicator_labels: default_indicator_labels(),
            amount_labels: default_amount_labels(),
            balance_cleanup: BalanceCleanup::PlainNumeric,
            opening_balance_policy: OpeningBalancePolicy::FirstRowBalance
        }
    }

    pub fn with_noise_markers(mut self, markers: &[&str]) -> Self {
        self.noise_markers = markers.iter().map(|marker| marker.to_string()).collect();
        self
    }

    pub fn with_end_marker(mut self, marker: &str) -> Self {
        self.end_marker = Some(marker.to_string());
        self
    }

    pub fn with_schema(mut self, schema: CanonicalSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_synonyms(mut self, field: CanonicalField, synonyms: &[&str]) -> Self {
        self.column_synonyms.insert(field, synonyms.iter().map(|synonym| synonym.to_string()).collect());
        self
    }

    pub fn with_indicator_columns(mut self, debit: &str, credit: &str) -> Self {
        self.debit_credit_mode = DebitCreditMode::IndicatorPlusAmount;
        self.indicator_values = IndicatorValues {
            debit: debit.to_string(),
            credit: credit.to_string()
        };
        self
    }

    pub fn with_balance_cleanup(mut self, cleanup: BalanceCleanup) -> Self {
        self.balance_cleanup = cleanup;
        self
    }

    pub fn with_opening_balance_policy(mut self, policy: OpeningBalancePolicy) -> Self {
        self.opening_balance_policy = policy;
        self
    }

    /// Strings a raw label is scored against for `field`: the schema name first, then synonyms.
    pub fn candidates(&self, field: CanonicalField) -> Vec<&str> {
        let mut candidates = vec![self.schema.name(field)];

        if let Some(synonyms) = self.column_synonyms.get(&field) {
            candidates.extend(synonyms.iter().map(String::as_str));
        }

        candidates
    }

    /// Rejects profiles whose markers would match every row.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::invalid(&self.id, "id is empty"));
        }

        if self.header_marker.trim().is_empty() {
            return Err(ProfileError::invalid(&self.id, "header marker is empty"));
        }

        if self.noise_markers.iter().any(|marker| marker.trim().is_empty()) {
            return Err(ProfileError::invalid(&self.id, "noise markers must not be empty"));
        }

        if self.end_marker.as_deref().is_some_and(|marker| marker.trim().is_empty()) {
            return Err(ProfileError::invalid(&self.id, "end marker is empty"));
        }

        if self.debit_credit_mode == DebitCreditMode::IndicatorPlusAmount {
            let IndicatorValues { debit, credit } = &self.indicator_values;

            if debit.trim().is_empty() || credit.trim().is_empty() {
                return Err(ProfileError::invalid(&self.id, "indicator values must not be empty"));
            }

            if debit.trim().eq_ignore_ascii_case(credit.trim()) {
                return Err(ProfileError::invalid(&self.id, "debit and credit indicator values are identical"));
            }
        }

        Ok(())
    }
}
