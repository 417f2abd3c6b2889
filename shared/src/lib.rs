pub mod error;
pub mod helpers;
pub mod models;
pub mod store;

#[cfg(test)]
mod tests;

// Test utilities - publicly exposed with test feature
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
