mod bank_profile;
mod errors;
mod registry;

pub use bank_profile::{BankProfile, DebitCreditMode, OpeningBalancePolicy};
pub use registry::ProfileRegistry;
