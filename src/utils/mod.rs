//! Cross-cutting helpers shared by both functions.

pub mod error;
pub mod logger;
