//! Core business logic for unitvisit.

pub mod services;

pub use services::*;
