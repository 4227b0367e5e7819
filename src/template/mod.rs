//! Template execution subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     main + per-object template sources
//!     → definition.rs (compile with helpers.rs functions)
//!     → executor.rs (original = active, per slot)
//!
//! Runtime update:
//!     new source → compile → swap active (original untouched)
//!     rollback   → active := original
//!
//! Render:
//!     config model (any Serialize value)
//!     → active definition of the slot
//!     → bytes for the caller to write and reload
//! ```
//!
//! # Design Decisions
//! - Active definitions live behind `ArcSwap`; readers never see a torn update
//! - A compile failure never touches slot state
//! - The model is opaque here; templates decide which fields they read

pub mod definition;
pub mod error;
pub mod executor;
pub mod helpers;

pub use definition::TemplateDefinition;
pub use error::{Slot, TemplateError, TemplateResult};
pub use executor::TemplateExecutor;
