//! # Booking Common Library
//!
//! Shared code for the booking listing service:
//! - Entity models and SQLite persistence (venues, artists, shows)
//! - Past/upcoming show classification
//! - Venue grouping by city and state
//! - Case-insensitive name search
//! - Transactional mutation coordinator
//! - Form validation and explicit form-to-entity mapping
//! - Bootstrap configuration loading

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod genre;
pub mod mutation;
pub mod schedule;
pub mod search;
pub mod time;
pub mod validation;

pub use error::{EntityKind, Error, Result};
pub use genre::Genre;
