//! Feature slices for the TUI (render + per-view helpers).

pub mod admin;
pub mod auth;
pub mod chat;
pub mod home;
pub mod profile;
pub mod quests;
pub mod titles;
