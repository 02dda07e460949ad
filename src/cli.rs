//! Command-line interface parsing for memegle
//!
//! This module handles parsing of CLI arguments using clap and runs the
//! one-shot `trending`, `search` and `cache` commands. Running without a
//! command starts the interactive TUI.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiError, GifService};
use crate::cache::StoreError;
use crate::data::GifImage;

/// Error types for CLI argument handling and one-shot commands
#[derive(Debug, Error)]
pub enum CliError {
    /// The search keyword was empty or whitespace
    #[error("Search keyword must not be empty")]
    EmptyKeyword,

    /// The GIPHY request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The trending cache could not be cleared
    #[error("Failed to clear trending cache: {0}")]
    Store(#[from] StoreError),

    /// Output could not be serialized
    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// memegle - a gif search engine for your terminal
#[derive(Parser, Debug)]
#[command(name = "memegle")]
#[command(about = "Browse trending GIFs and search GIPHY by keyword")]
#[command(version)]
pub struct Cli {
    /// Keep the trending cache in memory for this run only
    #[arg(long, global = true)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot commands; omit to start the TUI
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the current trending GIFs (cached for 30 minutes)
    Trending {
        /// Print a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Print one page of GIFs matching a keyword
    Search {
        /// Keyword to search for
        keyword: String,
        /// Zero-based page number; each page holds 16 GIFs
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Print a JSON array instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Manage the trending cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Cache maintenance actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Delete the cached trending list
    Clear,
}

/// How one-shot results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `id<TAB>title<TAB>url` per line
    #[default]
    Plain,
    /// Pretty-printed JSON array
    Json,
}

impl OutputFormat {
    fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        }
    }
}

/// What the binary should do, validated from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the TUI
    Interactive,
    /// Print trending GIFs
    Trending { format: OutputFormat },
    /// Print one page of search results
    Search {
        keyword: String,
        page: u32,
        format: OutputFormat,
    },
    /// Remove the trending cache entry
    ClearCache,
}

impl Action {
    /// Creates an Action from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Action)` with the keyword trimmed
    /// * `Err(CliError::EmptyKeyword)` if a search keyword is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        match &cli.command {
            None => Ok(Action::Interactive),
            Some(Command::Trending { json }) => Ok(Action::Trending {
                format: OutputFormat::from_flag(*json),
            }),
            Some(Command::Search {
                keyword,
                page,
                json,
            }) => {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    return Err(CliError::EmptyKeyword);
                }
                Ok(Action::Search {
                    keyword: keyword.to_string(),
                    page: *page,
                    format: OutputFormat::from_flag(*json),
                })
            }
            Some(Command::Cache {
                action: CacheAction::Clear,
            }) => Ok(Action::ClearCache),
        }
    }
}

/// Runs a one-shot action and returns the text to print
///
/// `Action::Interactive` is handled by the binary and yields an empty string.
pub async fn execute(action: &Action, service: &GifService) -> Result<String, CliError> {
    match action {
        Action::Interactive => Ok(String::new()),
        Action::Trending { format } => {
            let images = service.get_trending().await?;
            format_images(&images, *format)
        }
        Action::Search {
            keyword,
            page,
            format,
        } => {
            let images = service.search_by_keyword(keyword, *page).await?;
            format_images(&images, *format)
        }
        Action::ClearCache => {
            service.cache().clear()?;
            Ok("Trending cache cleared".to_string())
        }
    }
}

/// Renders images in the requested format
pub fn format_images(images: &[GifImage], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(images)?),
        OutputFormat::Plain => Ok(images
            .iter()
            .map(|image| {
                format!(
                    "{}\t{}\t{}",
                    image.id,
                    single_line(&image.title),
                    image.image_url
                )
            })
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Collapses tabs and newlines so a title cannot break the line format
fn single_line(text: &str) -> String {
    text.split(&['\t', '\n', '\r'][..])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FileStore, TrendingCache};
    use crate::config::{CacheConfig, Config};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;
    use url::Url;

    const CACHE_FILE: &str = "giphy_trending_cache.json";

    fn file_backed_service(dir: &TempDir) -> GifService {
        let store = Arc::new(FileStore::with_dir(dir.path().to_path_buf()));
        let cache = TrendingCache::new(store, CacheConfig::default());
        let config = Config::new("k", Url::parse("http://127.0.0.1:1").unwrap());
        GifService::new(&config, cache)
    }

    fn image(id: &str, title: &str) -> GifImage {
        GifImage {
            id: id.to_string(),
            title: title.to_string(),
            image_url: format!("https://media.giphy.com/{id}.gif"),
        }
    }

    #[test]
    fn test_cli_parse_no_args_is_interactive() {
        let cli = Cli::parse_from(["memegle"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_cache);
        assert_eq!(Action::from_cli(&cli).unwrap(), Action::Interactive);
    }

    #[test]
    fn test_cli_parse_trending() {
        let cli = Cli::parse_from(["memegle", "trending"]);
        assert_eq!(
            Action::from_cli(&cli).unwrap(),
            Action::Trending {
                format: OutputFormat::Plain
            }
        );
    }

    #[test]
    fn test_cli_parse_trending_json() {
        let cli = Cli::parse_from(["memegle", "trending", "--json"]);
        assert_eq!(
            Action::from_cli(&cli).unwrap(),
            Action::Trending {
                format: OutputFormat::Json
            }
        );
    }

    #[test]
    fn test_cli_parse_search_defaults_to_first_page() {
        let cli = Cli::parse_from(["memegle", "search", "cats"]);
        assert_eq!(
            Action::from_cli(&cli).unwrap(),
            Action::Search {
                keyword: "cats".to_string(),
                page: 0,
                format: OutputFormat::Plain
            }
        );
    }

    #[test]
    fn test_cli_parse_search_with_page() {
        let cli = Cli::parse_from(["memegle", "search", "cats", "--page", "2", "--json"]);
        assert_eq!(
            Action::from_cli(&cli).unwrap(),
            Action::Search {
                keyword: "cats".to_string(),
                page: 2,
                format: OutputFormat::Json
            }
        );
    }

    #[test]
    fn test_cli_search_trims_keyword() {
        let cli = Cli::parse_from(["memegle", "search", "  cats  "]);
        match Action::from_cli(&cli).unwrap() {
            Action::Search { keyword, .. } => assert_eq!(keyword, "cats"),
            other => panic!("Expected search action, got: {other:?}"),
        }
    }

    #[test]
    fn test_cli_search_blank_keyword_is_rejected() {
        let cli = Cli::parse_from(["memegle", "search", "   "]);
        let err = Action::from_cli(&cli).unwrap_err();
        assert!(matches!(err, CliError::EmptyKeyword));
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_cli_negative_page_is_rejected() {
        let result = Cli::try_parse_from(["memegle", "search", "cats", "--page", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_no_cache_is_global() {
        let cli = Cli::parse_from(["memegle", "trending", "--no-cache"]);
        assert!(cli.no_cache);
        let cli = Cli::parse_from(["memegle", "--no-cache"]);
        assert!(cli.no_cache);
    }

    #[test]
    fn test_cli_parse_cache_clear() {
        let cli = Cli::parse_from(["memegle", "cache", "clear"]);
        assert_eq!(Action::from_cli(&cli).unwrap(), Action::ClearCache);
    }

    #[test]
    fn test_format_plain_one_line_per_image() {
        let images = vec![image("a", "First"), image("b", "")];

        let output = format_images(&images, OutputFormat::Plain).unwrap();

        assert_eq!(
            output,
            "a\tFirst\thttps://media.giphy.com/a.gif\nb\t\thttps://media.giphy.com/b.gif"
        );
    }

    #[test]
    fn test_format_plain_flattens_title_whitespace() {
        let images = vec![image("a", "two\tparts\nhere")];

        let output = format_images(&images, OutputFormat::Plain).unwrap();

        assert_eq!(output, "a\ttwo parts here\thttps://media.giphy.com/a.gif");
    }

    #[test]
    fn test_format_json_is_array_of_display_images() {
        let images = vec![image("a", "First")];

        let output = format_images(&images, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["id"], "a");
        assert_eq!(value[0]["title"], "First");
        assert_eq!(value[0]["imageUrl"], "https://media.giphy.com/a.gif");
    }

    #[test]
    fn test_format_empty_plain_is_empty() {
        assert_eq!(format_images(&[], OutputFormat::Plain).unwrap(), "");
    }

    #[tokio::test]
    async fn test_clear_cache_deletes_entry() {
        let temp_dir = TempDir::new().unwrap();
        let service = file_backed_service(&temp_dir);
        service.cache().write(&[image("a", "A")]).unwrap();
        assert!(temp_dir.path().join(CACHE_FILE).exists());

        let output = execute(&Action::ClearCache, &service).await.unwrap();

        assert_eq!(output, "Trending cache cleared");
        assert!(!temp_dir.path().join(CACHE_FILE).exists());
    }

    #[tokio::test]
    async fn test_clear_cache_without_entry_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let service = file_backed_service(&temp_dir);

        assert!(execute(&Action::ClearCache, &service).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_cache_reports_failed_delete() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join(CACHE_FILE);
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();
        let service = file_backed_service(&temp_dir);

        let result = execute(&Action::ClearCache, &service).await;

        match result {
            Err(err @ CliError::Store(_)) => {
                assert!(err.to_string().contains("Failed to clear trending cache"));
            }
            other => panic!("Expected CliError::Store, got: {other:?}"),
        }
        assert!(blocker.exists(), "Entry should still be present");
    }
}
