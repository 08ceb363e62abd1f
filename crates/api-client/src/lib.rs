//! Typed client for the Yotpo reviews API
//!
//! Each operation takes an explicit parameter struct, renames its fields to
//! the names Yotpo expects on the wire, drops whatever the caller left out and
//! sends exactly one request. Responses are returned as untyped JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use yotpo_api_client::endpoints::reviews::{CreateReviewParams, ListReviewsParams};
//! use yotpo_api_client::YotpoClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YotpoClient::new()?;
//!
//!     let review = CreateReviewParams::new("my-app-key", "sku-123")
//!         .with_author("Jane", "jane@example.com")
//!         .with_review("Great mug", "Keeps coffee hot for hours")
//!         .with_score(5);
//!     let created = client.reviews().create_review(&review).await?;
//!     println!("{created}");
//!
//!     let page = client
//!         .reviews()
//!         .list_reviews(&ListReviewsParams::new("my-app-key").with_utoken("token"))
//!         .await?;
//!     println!("{page}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod payload;
pub mod request;

pub use client::YotpoClient;
pub use config::ClientConfig;
pub use endpoints::ReviewsApi;
pub use error::{ApiError, ApiResult};
pub use payload::{Payload, SparsePayload};
pub use request::{ApiRequest, HttpMethod};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::YotpoClient;
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::reviews::{
        BottomlineParams, ConvertReviewsParams, CreateReviewParams, GetReviewParams,
        ListReviewsParams, ProductReviewsParams, SiteReviewsWidgetParams, VoteParams, WidgetQuery,
    };
    pub use crate::endpoints::ReviewsApi;
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::payload::{Payload, SparsePayload};
    pub use crate::request::{ApiRequest, HttpMethod};
}
