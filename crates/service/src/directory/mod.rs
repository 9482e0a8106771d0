//! User + details CRUD for the directory service.

pub mod domain;
pub mod user_service;
pub mod details_service;
