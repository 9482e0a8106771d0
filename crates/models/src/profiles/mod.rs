//! `users` + `user_profiles` for the profiles service.
pub mod user;
pub mod user_profile;
