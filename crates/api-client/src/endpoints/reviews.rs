//! Review endpoints
//!
//! Maps to the Yotpo reviews API:
//! - Submit a review (`/reviews/dynamic_create`)
//! - Fetch a single review
//! - List reviews for an account or for one product
//! - Vote on a review
//! - Product and site-wide bottomlines
//! - Site reviews widget data
//! - Bulk publish reviews as both site and product reviews
//!
//! Every operation is split in two: a `*_request` function that turns the
//! caller's parameters into an [`ApiRequest`], and a method on [`ReviewsApi`]
//! that sends it. Absent optional fields never appear on the wire.

use crate::client::YotpoClient;
use crate::error::ApiResult;
use crate::payload::{Payload, SparsePayload};
use crate::request::ApiRequest;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Pseudo-product Yotpo files site reviews under
pub const SITE_REVIEWS_PRODUCT_ID: &str = "yotpo_site_reviews";

/// Page size used by [`list_reviews_request`] when none is given
pub const DEFAULT_REVIEWS_COUNT: u32 = 20;

/// Page used by [`list_reviews_request`] when none is given
pub const DEFAULT_REVIEWS_PAGE: u32 = 1;

/// Action tag for the bulk visibility update
const CHANGE_MENTION_STATUS: &str = "change_mention_status";

/// Reviews API interface
#[derive(Clone)]
pub struct ReviewsApi {
    client: YotpoClient,
}

impl ReviewsApi {
    /// Create a new reviews API interface
    pub(crate) fn new(client: YotpoClient) -> Self {
        Self { client }
    }

    /// Submit a new review
    ///
    /// POST /reviews/dynamic_create
    pub async fn create_review(&self, params: &CreateReviewParams) -> ApiResult<Value> {
        self.client.send(&create_review_request(params)).await
    }

    /// Fetch a single review
    ///
    /// GET /reviews/<id>
    pub async fn get_review(&self, params: &GetReviewParams) -> ApiResult<Value> {
        self.client.send(&get_review_request(params)).await
    }

    /// List reviews across every product of an account
    ///
    /// GET /v1/apps/<app_key>/reviews
    pub async fn list_reviews(&self, params: &ListReviewsParams) -> ApiResult<Value> {
        self.client.send(&list_reviews_request(params)).await
    }

    /// List reviews of one product
    ///
    /// GET /v1/widget/<app_key>/products/<sku>/reviews.json
    pub async fn product_reviews(&self, params: &ProductReviewsParams) -> ApiResult<Value> {
        self.client.send(&product_reviews_request(params)).await
    }

    /// Vote on a review
    ///
    /// GET reviews/<review_id>/vote/<vote_value>
    pub async fn vote(&self, params: &VoteParams) -> ApiResult<Value> {
        self.client.send(&vote_request(params)).await
    }

    /// Aggregate rating of one product
    ///
    /// GET products/<app_key>/<product_id>/bottomline
    pub async fn product_bottomline(&self, params: &BottomlineParams) -> ApiResult<Value> {
        self.client.send(&product_bottomline_request(params)).await
    }

    /// Aggregate rating of the site reviews
    ///
    /// GET products/<app_key>/yotpo_site_reviews/bottomline
    pub async fn site_bottomline(&self, app_key: &str) -> ApiResult<Value> {
        self.client.send(&site_bottomline_request(app_key)).await
    }

    /// Data for the site reviews widget
    ///
    /// GET v1/widget/<app_key>/products/yotpo_site_reviews/reviews.json
    pub async fn site_reviews_widget(&self, params: &SiteReviewsWidgetParams) -> ApiResult<Value> {
        self.client.send(&site_reviews_widget_request(params)).await
    }

    /// Publish reviews as both product and site reviews
    ///
    /// PUT reviews/async_update
    pub async fn convert_to_site_and_product(
        &self,
        params: &ConvertReviewsParams,
    ) -> ApiResult<Value> {
        self.client
            .send(&convert_to_site_and_product_request(params))
            .await
    }
}

// ============================================================================
// Request builders
// ============================================================================

/// Build the review submission request
#[must_use]
pub fn create_review_request(params: &CreateReviewParams) -> ApiRequest {
    let body = SparsePayload::new()
        .optional("appkey", params.app_key.as_deref())
        .optional("sku", params.product_id.as_deref())
        .optional("domain", params.shop_domain.as_deref())
        .optional("product_title", params.product_title.as_deref())
        .optional("product_description", params.product_description.as_deref())
        .optional("product_url", params.product_url.as_deref())
        .optional("product_image_url", params.product_image_url.as_deref())
        .optional("display_name", params.user_display_name.as_deref())
        .optional("email", params.user_email.as_deref())
        .optional("review_content", params.review_body.as_deref())
        .optional("review_title", params.review_title.as_deref())
        .optional("review_score", params.review_score.clone())
        .optional("user_reference", params.user_id.as_deref())
        .optional("custom_fields", params.custom_fields.clone())
        .optional("product_tags", params.product_tags.as_deref())
        .optional("signature", params.signature.as_deref())
        .optional("time_stamp", params.timestamp.as_deref())
        .optional("reviewer_type", params.reviewer_type.as_deref())
        .build();

    ApiRequest::post("/reviews/dynamic_create", body)
}

/// Build the single review lookup request
#[must_use]
pub fn get_review_request(params: &GetReviewParams) -> ApiRequest {
    let query = SparsePayload::new()
        .optional("utoken", params.utoken.as_deref())
        .build();

    ApiRequest::get(format!("/reviews/{}", params.id), query)
}

/// Build the account-wide review listing request
///
/// `count` defaults to 20 and `page` to 1.
#[must_use]
pub fn list_reviews_request(params: &ListReviewsParams) -> ApiRequest {
    let query = SparsePayload::new()
        .optional("utoken", params.utoken.as_deref())
        .optional("since_id", params.since_id.as_deref())
        .optional("since_date", params.since_date.as_deref())
        .optional("since_updated_at", params.since_updated_at.as_deref())
        .required("count", params.per_page.unwrap_or(DEFAULT_REVIEWS_COUNT))
        .required("page", params.page.unwrap_or(DEFAULT_REVIEWS_PAGE))
        .optional("include_site_reviews", params.include_site_reviews)
        .optional("deleted", params.deleted)
        .optional("user_reference", params.user_reference.as_deref())
        .build();

    ApiRequest::get(format!("/v1/apps/{}/reviews", params.app_key), query)
}

/// Build the product review listing request
#[must_use]
pub fn product_reviews_request(params: &ProductReviewsParams) -> ApiRequest {
    ApiRequest::get(
        format!(
            "/v1/widget/{}/products/{}/reviews.json",
            params.app_key, params.product_id
        ),
        params.query.to_payload(),
    )
}

/// Build the vote request
#[must_use]
pub fn vote_request(params: &VoteParams) -> ApiRequest {
    ApiRequest::get_bare(format!(
        "reviews/{}/vote/{}",
        params.review_id, params.vote_value
    ))
}

/// Build the product bottomline request
#[must_use]
pub fn product_bottomline_request(params: &BottomlineParams) -> ApiRequest {
    ApiRequest::get_bare(format!(
        "products/{}/{}/bottomline",
        params.app_key, params.product_id
    ))
}

/// Build the site bottomline request
#[must_use]
pub fn site_bottomline_request(app_key: &str) -> ApiRequest {
    ApiRequest::get_bare(format!(
        "products/{app_key}/{SITE_REVIEWS_PRODUCT_ID}/bottomline"
    ))
}

/// Build the site reviews widget request
#[must_use]
pub fn site_reviews_widget_request(params: &SiteReviewsWidgetParams) -> ApiRequest {
    ApiRequest::get(
        format!(
            "v1/widget/{}/products/{SITE_REVIEWS_PRODUCT_ID}/reviews.json",
            params.app_key
        ),
        params.query.to_payload(),
    )
}

/// Build the bulk "publish as site and product review" request
///
/// The attribute list, action tag and `sync` flag are fixed; only the token
/// and review ids come from the caller.
#[must_use]
pub fn convert_to_site_and_product_request(params: &ConvertReviewsParams) -> ApiRequest {
    let body = SparsePayload::new()
        .optional("utoken", params.utoken.as_deref())
        .optional("review_ids", params.review_ids.clone())
        .required("review_action", CHANGE_MENTION_STATUS)
        .required(
            "attributes",
            json!([
                {"type": "product", "published": "1"},
                {"type": "site", "published": "1"}
            ]),
        )
        .required("sync", true)
        .build();

    ApiRequest::put("reviews/async_update", body)
}

// ============================================================================
// Parameter Types
// ============================================================================

/// Parameters for submitting a review
///
/// Nothing is required locally; Yotpo decides what a valid review is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReviewParams {
    /// App key of the account the review belongs to
    pub app_key: Option<String>,
    /// Product id (sent as `sku`)
    pub product_id: Option<String>,
    /// Shop domain
    pub shop_domain: Option<String>,
    pub product_title: Option<String>,
    pub product_description: Option<String>,
    pub product_url: Option<String>,
    pub product_image_url: Option<String>,
    /// Author name
    pub user_display_name: Option<String>,
    /// Author email
    pub user_email: Option<String>,
    /// Review text (sent as `review_content`)
    pub review_body: Option<String>,
    pub review_title: Option<String>,
    /// Rating, forwarded as given (string or number)
    pub review_score: Option<Value>,
    /// External user id (sent as `user_reference`)
    pub user_id: Option<String>,
    /// Custom field values keyed by field id
    pub custom_fields: Option<Map<String, Value>>,
    pub product_tags: Option<String>,
    /// Signature for verified reviewers
    pub signature: Option<String>,
    /// Timestamp required for trusted vendors (sent as `time_stamp`)
    pub timestamp: Option<String>,
    /// `verified_buyer` or `verified_reviewer`
    pub reviewer_type: Option<String>,
}

impl CreateReviewParams {
    /// Create params for a review of `product_id` under `app_key`
    pub fn new(app_key: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            app_key: Some(app_key.into()),
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    /// Set the shop domain
    #[must_use]
    pub fn with_shop_domain(mut self, domain: impl Into<String>) -> Self {
        self.shop_domain = Some(domain.into());
        self
    }

    /// Set product title, description, page URL and image URL at once
    #[must_use]
    pub fn with_product(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        self.product_title = Some(title.into());
        self.product_description = Some(description.into());
        self.product_url = Some(url.into());
        self.product_image_url = Some(image_url.into());
        self
    }

    /// Set the product title
    #[must_use]
    pub fn with_product_title(mut self, title: impl Into<String>) -> Self {
        self.product_title = Some(title.into());
        self
    }

    /// Set the product page URL
    #[must_use]
    pub fn with_product_url(mut self, url: impl Into<String>) -> Self {
        self.product_url = Some(url.into());
        self
    }

    /// Set author name and email
    #[must_use]
    pub fn with_author(
        mut self,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.user_display_name = Some(display_name.into());
        self.user_email = Some(email.into());
        self
    }

    /// Set review title and body
    #[must_use]
    pub fn with_review(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.review_title = Some(title.into());
        self.review_body = Some(body.into());
        self
    }

    /// Set the rating
    #[must_use]
    pub fn with_score(mut self, score: impl Into<Value>) -> Self {
        self.review_score = Some(score.into());
        self
    }

    /// Set the external user id
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add one custom field value
    #[must_use]
    pub fn with_custom_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_fields
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Set product tags
    #[must_use]
    pub fn with_product_tags(mut self, tags: impl Into<String>) -> Self {
        self.product_tags = Some(tags.into());
        self
    }

    /// Mark the review as verified
    #[must_use]
    pub fn with_verification(
        mut self,
        signature: impl Into<String>,
        timestamp: impl Into<String>,
        reviewer_type: impl Into<String>,
    ) -> Self {
        self.signature = Some(signature.into());
        self.timestamp = Some(timestamp.into());
        self.reviewer_type = Some(reviewer_type.into());
        self
    }
}

/// Parameters for fetching one review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetReviewParams {
    /// Review id
    pub id: String,
    /// OAuth token
    pub utoken: Option<String>,
}

impl GetReviewParams {
    /// Look up review `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            utoken: None,
        }
    }

    /// Authenticate with a utoken
    #[must_use]
    pub fn with_utoken(mut self, utoken: impl Into<String>) -> Self {
        self.utoken = Some(utoken.into());
        self
    }
}

/// Parameters for listing every review of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReviewsParams {
    pub app_key: String,
    /// Token of the user whose most relevant reviews should come first
    pub utoken: Option<String>,
    /// Only reviews after this id
    pub since_id: Option<String>,
    /// Only reviews created after this date
    pub since_date: Option<String>,
    /// Only reviews updated after this date
    pub since_updated_at: Option<String>,
    /// Page size (sent as `count`)
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub include_site_reviews: Option<bool>,
    /// Include deleted reviews
    pub deleted: Option<bool>,
    pub user_reference: Option<String>,
}

impl ListReviewsParams {
    /// List reviews of the account identified by `app_key`
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            utoken: None,
            since_id: None,
            since_date: None,
            since_updated_at: None,
            per_page: None,
            page: None,
            include_site_reviews: None,
            deleted: None,
            user_reference: None,
        }
    }

    /// Authenticate with a utoken
    #[must_use]
    pub fn with_utoken(mut self, utoken: impl Into<String>) -> Self {
        self.utoken = Some(utoken.into());
        self
    }

    /// Set page and page size
    #[must_use]
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Start after review id
    #[must_use]
    pub fn with_since_id(mut self, since_id: impl Into<String>) -> Self {
        self.since_id = Some(since_id.into());
        self
    }

    /// Only reviews created after `date`
    #[must_use]
    pub fn with_since_date(mut self, date: impl Into<String>) -> Self {
        self.since_date = Some(date.into());
        self
    }

    /// Only reviews updated after `date`
    #[must_use]
    pub fn with_since_updated_at(mut self, date: impl Into<String>) -> Self {
        self.since_updated_at = Some(date.into());
        self
    }

    /// Include or exclude site reviews
    #[must_use]
    pub fn with_site_reviews(mut self, include: bool) -> Self {
        self.include_site_reviews = Some(include);
        self
    }

    /// Include or exclude deleted reviews
    #[must_use]
    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = Some(deleted);
        self
    }

    /// Filter by user reference
    #[must_use]
    pub fn with_user_reference(mut self, reference: impl Into<String>) -> Self {
        self.user_reference = Some(reference.into());
        self
    }
}

/// Paging, sorting and star filter shared by the widget listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Only reviews with this star rating
    pub star: Option<u8>,
    /// Sort field, e.g. `date`, `rating`, `votes_up`
    pub sort: Option<String>,
    /// `asc` or `desc` (sent as `direction`)
    pub sort_direction: Option<String>,
}

impl WidgetQuery {
    /// Create an empty query
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page and page size
    #[must_use]
    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Filter by star rating
    #[must_use]
    pub fn with_star(mut self, star: u8) -> Self {
        self.star = Some(star);
        self
    }

    /// Sort by `field` in `direction`
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self.sort_direction = Some(direction.into());
        self
    }

    fn to_payload(&self) -> Payload {
        SparsePayload::new()
            .optional("page", self.page)
            .optional("per_page", self.per_page)
            .optional("star", self.star)
            .optional("sort", self.sort.as_deref())
            .optional("direction", self.sort_direction.as_deref())
            .build()
    }
}

/// Parameters for listing one product's reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReviewsParams {
    pub app_key: String,
    /// Product id (the `sku` path segment)
    pub product_id: String,
    #[serde(flatten)]
    pub query: WidgetQuery,
}

impl ProductReviewsParams {
    /// List reviews of `product_id` under `app_key`
    pub fn new(app_key: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            product_id: product_id.into(),
            query: WidgetQuery::default(),
        }
    }

    /// Replace paging/sorting/filtering
    #[must_use]
    pub fn with_query(mut self, query: WidgetQuery) -> Self {
        self.query = query;
        self
    }
}

/// Parameters for the site reviews widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteReviewsWidgetParams {
    pub app_key: String,
    #[serde(flatten)]
    pub query: WidgetQuery,
}

impl SiteReviewsWidgetParams {
    /// Widget data for the account identified by `app_key`
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            query: WidgetQuery::default(),
        }
    }

    /// Replace paging/sorting/filtering
    #[must_use]
    pub fn with_query(mut self, query: WidgetQuery) -> Self {
        self.query = query;
        self
    }
}

/// Parameters for voting on a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteParams {
    pub review_id: String,
    /// Vote value as Yotpo expects it in the path, e.g. `up` or `down`
    pub vote_value: String,
}

impl VoteParams {
    /// Cast `vote_value` on `review_id`
    pub fn new(review_id: impl Into<String>, vote_value: impl Into<String>) -> Self {
        Self {
            review_id: review_id.into(),
            vote_value: vote_value.into(),
        }
    }
}

/// Parameters for a product bottomline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BottomlineParams {
    pub app_key: String,
    pub product_id: String,
}

impl BottomlineParams {
    /// Bottomline of `product_id` under `app_key`
    pub fn new(app_key: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            product_id: product_id.into(),
        }
    }
}

/// Parameters for publishing reviews as site and product reviews
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertReviewsParams {
    /// OAuth token
    pub utoken: Option<String>,
    /// Reviews to convert, forwarded as given
    pub review_ids: Option<Vec<Value>>,
}

impl ConvertReviewsParams {
    /// Convert `review_ids`, authenticating with `utoken`
    pub fn new<I, V>(utoken: impl Into<String>, review_ids: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            utoken: Some(utoken.into()),
            review_ids: Some(review_ids.into_iter().map(Into::into).collect()),
        }
    }
}
