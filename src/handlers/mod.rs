//! HTTP handlers

pub mod health;
pub mod dashboard;
pub mod companies;
pub mod reports;

#[cfg(test)]
mod tests;
