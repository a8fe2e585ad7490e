//! Request and response models for the functions.
//!
//! Everything here lives for a single request and is never mutated after
//! construction.

pub mod response;
pub mod verification;
