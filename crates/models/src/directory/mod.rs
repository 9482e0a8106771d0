//! `users` + `user_details` for the directory service.
pub mod user;
pub mod user_details;
