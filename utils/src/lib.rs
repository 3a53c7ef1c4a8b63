//! Shared infrastructure utilities for Memento.
//!
//! Cross-cutting helpers that don't belong in the domain-pure `memento-types`
//! crate:
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename)

pub mod atomic_write;

pub use atomic_write::atomic_write;
