//! Typed shapes of the backend's REST resources.
//!
//! Responses are deserialized into these types at the client boundary, so a
//! malformed body fails in the API client instead of deep inside a view.

pub mod cart;
pub mod order;
pub mod product;
pub mod stats;
pub mod user;

pub use cart::*;
pub use order::*;
pub use product::*;
pub use stats::*;
pub use user::*;
