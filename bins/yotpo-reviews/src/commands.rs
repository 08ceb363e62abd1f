//! Subcommand implementations
//!
//! Each subcommand becomes an [`Operation`] holding the library's parameter
//! struct, so `--dry-run` and a real call go through the same mapping.

use crate::output::{self, OutputFormat};
use crate::{Cli, Commands, CreateArgs, WidgetArgs};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::debug;
use yotpo_api_client::endpoints::reviews::{
    self, BottomlineParams, ConvertReviewsParams, CreateReviewParams, GetReviewParams,
    ListReviewsParams, ProductReviewsParams, SiteReviewsWidgetParams, VoteParams, WidgetQuery,
};
use yotpo_api_client::{ApiRequest, ApiResult, ReviewsApi, YotpoClient};

/// A fully parameterised review operation
#[derive(Debug)]
pub enum Operation {
    Create(CreateReviewParams),
    Get(GetReviewParams),
    List(ListReviewsParams),
    Product(ProductReviewsParams),
    Vote(VoteParams),
    Bottomline(BottomlineParams),
    SiteBottomline(String),
    SiteWidget(SiteReviewsWidgetParams),
    Convert(ConvertReviewsParams),
}

impl Operation {
    /// Translate parsed arguments into an operation
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let app_key = || {
            cli.app_key
                .clone()
                .context("an app key is required (--app-key or YOTPO_APP_KEY)")
        };

        let operation = match &cli.command {
            Commands::Create(args) => Self::Create(create_params(args, cli.app_key.clone())),

            Commands::Get { id } => Self::Get(GetReviewParams {
                id: id.clone(),
                utoken: cli.utoken.clone(),
            }),

            Commands::List {
                page,
                per_page,
                since_id,
                since_date,
                since_updated_at,
                include_site_reviews,
                deleted,
                user_reference,
            } => {
                let mut params = ListReviewsParams::new(app_key()?);
                params.utoken = cli.utoken.clone();
                params.page = *page;
                params.per_page = *per_page;
                params.since_id = since_id.clone();
                params.since_date = since_date.clone();
                params.since_updated_at = since_updated_at.clone();
                params.include_site_reviews = *include_site_reviews;
                params.deleted = *deleted;
                params.user_reference = user_reference.clone();
                Self::List(params)
            }

            Commands::Product { product_id, widget } => Self::Product(
                ProductReviewsParams::new(app_key()?, product_id.clone())
                    .with_query(widget_query(widget)),
            ),

            Commands::Vote { review_id, value } => {
                Self::Vote(VoteParams::new(review_id.clone(), value.clone()))
            }

            Commands::Bottomline { product_id } => {
                Self::Bottomline(BottomlineParams::new(app_key()?, product_id.clone()))
            }

            Commands::SiteBottomline => Self::SiteBottomline(app_key()?),

            Commands::SiteWidget { widget } => Self::SiteWidget(
                SiteReviewsWidgetParams::new(app_key()?).with_query(widget_query(widget)),
            ),

            Commands::Convert { review_ids } => Self::Convert(ConvertReviewsParams {
                utoken: cli.utoken.clone(),
                review_ids: Some(review_ids.iter().map(|id| loose_value(id)).collect()),
            }),
        };

        Ok(operation)
    }

    /// The request this operation sends
    pub fn request(&self) -> ApiRequest {
        match self {
            Self::Create(params) => reviews::create_review_request(params),
            Self::Get(params) => reviews::get_review_request(params),
            Self::List(params) => reviews::list_reviews_request(params),
            Self::Product(params) => reviews::product_reviews_request(params),
            Self::Vote(params) => reviews::vote_request(params),
            Self::Bottomline(params) => reviews::product_bottomline_request(params),
            Self::SiteBottomline(app_key) => reviews::site_bottomline_request(app_key),
            Self::SiteWidget(params) => reviews::site_reviews_widget_request(params),
            Self::Convert(params) => reviews::convert_to_site_and_product_request(params),
        }
    }

    async fn execute(&self, api: &ReviewsApi) -> ApiResult<Value> {
        match self {
            Self::Create(params) => api.create_review(params).await,
            Self::Get(params) => api.get_review(params).await,
            Self::List(params) => api.list_reviews(params).await,
            Self::Product(params) => api.product_reviews(params).await,
            Self::Vote(params) => api.vote(params).await,
            Self::Bottomline(params) => api.product_bottomline(params).await,
            Self::SiteBottomline(app_key) => api.site_bottomline(app_key).await,
            Self::SiteWidget(params) => api.site_reviews_widget(params).await,
            Self::Convert(params) => api.convert_to_site_and_product(params).await,
        }
    }
}

/// Run an operation, or just print its request when `dry_run` is set
pub async fn run(operation: &Operation, dry_run: bool, format: OutputFormat) -> Result<()> {
    let request = operation.request();

    if dry_run {
        return output::print_request(&request, format);
    }

    let client = YotpoClient::new().context("Failed to create Yotpo client")?;
    debug!(base_url = client.base_url(), request = %request, "Dispatching");

    let response = operation
        .execute(&client.reviews())
        .await
        .with_context(|| format!("{request} failed"))?;

    output::print_response(&request, &response, format)
}

/// Parse a `KEY=VALUE` pair
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))
}

/// Canonical integers become JSON numbers, anything else stays a string
///
/// "007", "+5" and "05" keep their text; only values that print back
/// unchanged are sent as numbers.
fn loose_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .ok()
        .filter(|n| n.to_string() == raw)
        .map_or_else(|| Value::String(raw.to_string()), Value::from)
}

fn create_params(args: &CreateArgs, app_key: Option<String>) -> CreateReviewParams {
    let mut params = CreateReviewParams {
        app_key,
        product_id: Some(args.product_id.clone()),
        shop_domain: args.domain.clone(),
        product_title: args.product_title.clone(),
        product_description: args.product_description.clone(),
        product_url: args.product_url.clone(),
        product_image_url: args.product_image_url.clone(),
        user_display_name: args.name.clone(),
        user_email: args.email.clone(),
        review_body: args.body.clone(),
        review_title: args.title.clone(),
        review_score: args.score.as_deref().map(loose_value),
        user_id: args.user_id.clone(),
        custom_fields: None,
        product_tags: args.tags.clone(),
        signature: args.signature.clone(),
        timestamp: args.timestamp.clone(),
        reviewer_type: args.reviewer_type.clone(),
    };

    for (key, value) in &args.custom_fields {
        params = params.with_custom_field(key.clone(), value.clone());
    }
    params
}

fn widget_query(args: &WidgetArgs) -> WidgetQuery {
    WidgetQuery {
        page: args.page,
        per_page: args.per_page,
        star: args.star,
        sort: args.sort.clone(),
        sort_direction: args.direction.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;

    fn operation(args: &[&str]) -> Result<Operation> {
        let mut argv = vec!["yotpo-reviews"];
        argv.extend_from_slice(args);
        Operation::from_cli(&Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("size=M=medium").unwrap(),
            ("size".to_string(), "M=medium".to_string())
        );
        assert!(parse_key_val("size").is_err());
    }

    #[test]
    fn test_loose_value() {
        assert_eq!(loose_value("5"), json!(5));
        assert_eq!(loose_value("4.5"), json!("4.5"));
        assert_eq!(loose_value("five"), json!("five"));
        assert_eq!(loose_value("-3"), json!(-3));
    }

    #[test]
    fn test_loose_value_keeps_non_canonical_integers() {
        assert_eq!(loose_value("007"), json!("007"));
        assert_eq!(loose_value("05"), json!("05"));
        assert_eq!(loose_value("+5"), json!("+5"));
    }

    #[test]
    fn test_ids_and_score_forwarded_as_typed() {
        let convert = operation(&["convert", "007", "+5", "12"]).unwrap();
        let params = Value::Object(convert.request().params.unwrap());
        assert_eq!(params["review_ids"], json!(["007", "+5", 12]));

        let create = operation(&["--app-key", "a", "create", "p", "--score", "05"]).unwrap();
        let params = Value::Object(create.request().params.unwrap());
        assert_eq!(params["review_score"], json!("05"));
    }

    #[test]
    fn test_create_maps_to_minimal_payload() {
        let op = operation(&["--app-key", "a", "create", "p", "--score", "5"]).unwrap();
        let request = op.request();

        assert_eq!(request.path, "/reviews/dynamic_create");
        assert_eq!(
            Value::Object(request.params.unwrap()),
            json!({"appkey": "a", "sku": "p", "review_score": 5})
        );
    }

    #[test]
    fn test_list_without_app_key_fails() {
        let mut cli = Cli::try_parse_from(["yotpo-reviews", "list"]).unwrap();
        cli.app_key = None;
        assert!(Operation::from_cli(&cli).is_err());
    }

    #[test]
    fn test_convert_ids_forwarded() {
        let op = operation(&["--utoken", "tok", "convert", "17", "abc"]).unwrap();
        let params = Value::Object(op.request().params.unwrap());

        assert_eq!(params["review_ids"], json!([17, "abc"]));
        assert_eq!(params["utoken"], "tok");
        assert_eq!(params["sync"], json!(true));
    }

    #[test]
    fn test_vote_needs_no_app_key() {
        let mut cli = Cli::try_parse_from(["yotpo-reviews", "vote", "123", "1"]).unwrap();
        cli.app_key = None;
        let request = Operation::from_cli(&cli).unwrap().request();
        assert_eq!(request.path, "reviews/123/vote/1");
        assert!(request.params.is_none());
    }

    #[test]
    fn test_site_widget_query() {
        let op = operation(&[
            "--app-key",
            "key",
            "site-widget",
            "--star",
            "5",
            "--sort",
            "date",
            "--direction",
            "desc",
        ])
        .unwrap();
        let request = op.request();

        assert_eq!(
            request.path,
            "v1/widget/key/products/yotpo_site_reviews/reviews.json"
        );
        assert_eq!(
            Value::Object(request.params.unwrap()),
            json!({"star": 5, "sort": "date", "direction": "desc"})
        );
    }
}
