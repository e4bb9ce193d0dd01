//! Common types shared by the cache, the timing model and the simulation loop.
//!
//! This module provides:
//! 1. **Access Kinds:** Read/write classification of trace entries.
//! 2. **Addresses:** The decomposed (tag, index, offset) form of a raw address.
//! 3. **Error Handling:** The `SimError` taxonomy.

/// Decomposed address type.
pub mod addr;

/// Memory access kind definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::DecodedAddress;
pub use data::AccessKind;
pub use error::SimError;
