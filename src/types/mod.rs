mod errors;
mod numeric;
#[cfg(test)]
mod tests;

pub use numeric::{BalanceCleanup, Numeric};
