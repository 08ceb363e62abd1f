//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a set of Yotpo endpoints.
//!
//! ## Mapping to the Yotpo API
//!
//! | Module | Paths | Description |
//! |--------|-------|-------------|
//! | `reviews` | `reviews/*`, `v1/apps/*/reviews`, `v1/widget/*`, `products/*/bottomline` | Review submission, listing, voting and bottomlines |

pub mod reviews;

pub use reviews::ReviewsApi;
