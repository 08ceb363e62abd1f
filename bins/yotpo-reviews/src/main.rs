//! Yotpo reviews CLI
//!
//! Submit, list, vote on and publish Yotpo reviews from the command line.

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use std::process::ExitCode;

mod commands;
mod output;

use output::OutputFormat;

/// Command-line access to the Yotpo reviews API
#[derive(Parser)]
#[command(name = "yotpo-reviews")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Account app key
    #[arg(long, global = true, env = "YOTPO_APP_KEY")]
    app_key: Option<String>,

    /// OAuth utoken
    #[arg(long, global = true, env = "YOTPO_UTOKEN", hide_env_values = true)]
    utoken: Option<String>,

    /// Print the request instead of sending it
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new review
    Create(CreateArgs),

    /// Fetch a single review
    Get {
        /// Review id
        id: String,
    },

    /// List reviews across all products of the account
    List {
        /// Page number (defaults to 1)
        #[arg(short, long)]
        page: Option<u32>,

        /// Reviews per page (defaults to 20)
        #[arg(long)]
        per_page: Option<u32>,

        /// Only reviews after this id
        #[arg(long)]
        since_id: Option<String>,

        /// Only reviews created after this date
        #[arg(long)]
        since_date: Option<String>,

        /// Only reviews updated after this date
        #[arg(long)]
        since_updated_at: Option<String>,

        /// Include site reviews (true/false)
        #[arg(long)]
        include_site_reviews: Option<bool>,

        /// Include deleted reviews (true/false)
        #[arg(long)]
        deleted: Option<bool>,

        /// Filter by user reference
        #[arg(long)]
        user_reference: Option<String>,
    },

    /// List reviews of one product
    Product {
        /// Product id
        product_id: String,

        #[command(flatten)]
        widget: WidgetArgs,
    },

    /// Vote on a review
    Vote {
        /// Review id
        review_id: String,

        /// Vote value, e.g. up or down
        value: String,
    },

    /// Show the aggregate rating of a product
    Bottomline {
        /// Product id
        product_id: String,
    },

    /// Show the aggregate rating of the site reviews
    SiteBottomline,

    /// Fetch site reviews widget data
    SiteWidget {
        #[command(flatten)]
        widget: WidgetArgs,
    },

    /// Publish reviews as both product and site reviews
    Convert {
        /// Review ids
        #[arg(required = true, num_args = 1..)]
        review_ids: Vec<String>,
    },
}

/// Fields of a new review
#[derive(Args)]
struct CreateArgs {
    /// Product id
    product_id: String,

    /// Shop domain
    #[arg(long)]
    domain: Option<String>,

    /// Product title
    #[arg(long)]
    product_title: Option<String>,

    /// Product description
    #[arg(long)]
    product_description: Option<String>,

    /// Product page URL
    #[arg(long)]
    product_url: Option<String>,

    /// Product image URL
    #[arg(long)]
    product_image_url: Option<String>,

    /// Author name
    #[arg(long)]
    name: Option<String>,

    /// Author email
    #[arg(long)]
    email: Option<String>,

    /// Review title
    #[arg(long)]
    title: Option<String>,

    /// Review text
    #[arg(long)]
    body: Option<String>,

    /// Rating; numeric values are sent as numbers
    #[arg(long)]
    score: Option<String>,

    /// External user id
    #[arg(long)]
    user_id: Option<String>,

    /// Custom field as KEY=VALUE (repeatable)
    #[arg(
        long = "custom-field",
        value_parser = commands::parse_key_val,
        allow_hyphen_values = true
    )]
    custom_fields: Vec<(String, String)>,

    /// Product tags
    #[arg(long)]
    tags: Option<String>,

    /// Signature for verified reviewers
    #[arg(long)]
    signature: Option<String>,

    /// Timestamp for trusted vendors
    #[arg(long)]
    timestamp: Option<String>,

    /// verified_buyer or verified_reviewer
    #[arg(long)]
    reviewer_type: Option<String>,
}

/// Paging, sorting and star filter for widget listings
#[derive(Args)]
struct WidgetArgs {
    /// Page number
    #[arg(short, long)]
    page: Option<u32>,

    /// Reviews per page
    #[arg(long)]
    per_page: Option<u32>,

    /// Only reviews with this star rating
    #[arg(long)]
    star: Option<u8>,

    /// Sort field (date, rating, votes_up, ...)
    #[arg(long)]
    sort: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long)]
    direction: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("yotpo_reviews=debug,yotpo_api_client=debug")
            .init();
    }

    let result = match commands::Operation::from_cli(&cli) {
        Ok(operation) => commands::run(&operation, cli.dry_run, cli.format).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "yotpo-reviews",
            "bottomline",
            "sku-1",
            "--app-key",
            "key",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.app_key.as_deref(), Some("key"));
        assert!(cli.dry_run);
        assert!(matches!(cli.command, Commands::Bottomline { .. }));
    }

    #[test]
    fn test_convert_requires_ids() {
        assert!(Cli::try_parse_from(["yotpo-reviews", "convert"]).is_err());
    }

    #[test]
    fn test_custom_field_parsing() {
        let cli = Cli::try_parse_from([
            "yotpo-reviews",
            "create",
            "sku-1",
            "--custom-field",
            "--11=Blue",
            "--custom-field",
            "fit=true to size",
        ])
        .unwrap();

        let Commands::Create(args) = cli.command else {
            panic!("expected create");
        };
        assert_eq!(
            args.custom_fields,
            vec![
                ("--11".to_string(), "Blue".to_string()),
                ("fit".to_string(), "true to size".to_string()),
            ]
        );
    }
}
