//! Types library for the exchange trading interface
//!
//! Shared value types for the client computation layer, ensuring type
//! safety and deterministic arithmetic.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, PairId)
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Order and book sides
//! - `market`: Pair, coin and ticker metadata
//! - `errors`: Validation errors

// Public modules
pub mod ids;
pub mod numeric;
pub mod order;
pub mod market;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::market::*;
    pub use crate::errors::*;
}
