//! HTTP request handlers for API endpoints.
//!
//! This module contains all request handlers organized by resource type.
//! Paths are relative to `/api`.

pub mod auth;
pub mod books;
pub mod health;
pub mod orders;
pub mod users;
