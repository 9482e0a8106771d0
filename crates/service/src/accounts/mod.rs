//! Accounts module for the profiles service: domain, repository, service.
//!
//! Registration, login and the one-to-one profile live here.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AccountService;
