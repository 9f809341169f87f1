//! Order, market and credential types shared by the builder and the clients.

mod auth;
mod enums;
mod market;
mod order;
mod primitives;

// Re-export all types
pub use auth::*;
pub use enums::*;
pub use market::*;
pub use order::*;
pub use primitives::*;
