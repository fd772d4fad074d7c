pub mod config;
pub mod dispatcher;
pub mod error;
pub mod geodesy;
pub mod json;
pub mod problem;
pub mod solution;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
