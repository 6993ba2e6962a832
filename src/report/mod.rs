mod writer;
#[cfg(test)]
mod tests;

pub use writer::{write_account_info, write_ledger, write_summary};
