//! Entities, validation rules and row-level helpers for the three services.
//!
//! Each service module only touches the tables its own migrator creates.

pub mod errors;
pub mod db;
pub mod validation;
pub mod patch;
pub mod library;
pub mod profiles;
pub mod directory;

#[cfg(test)]
mod tests;
