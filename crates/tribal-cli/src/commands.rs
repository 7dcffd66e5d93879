use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;
use tribal_catalog::{CatalogConfig, CatalogService, InstrumentPost};
use tribal_search::{derive_categories, CategoryGroup, ListingCache, SearchBox};
use tribal_store::{InMemoryDocumentStore, InMemoryFileStore};

use crate::cli::*;
use crate::seed;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let service = build_service(&cli).await?;
    let format = cli.format;
    match cli.command {
        Command::List(args) => cmd_list(&service, args, format).await,
        Command::Search(args) => cmd_search(&service, args, format).await,
        Command::Suggest(args) => cmd_suggest(&service, args, format).await,
        Command::Categories => cmd_categories(&service, format).await,
    }
}

/// Resolve the configuration and build a service over in-memory stores,
/// seeded from `--seed` when given.
async fn build_service(cli: &Cli) -> anyhow::Result<CatalogService> {
    let config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    }
    .with_env_overrides(|k| std::env::var(k).ok())?;
    debug!(?config, "catalog configuration");

    let service = CatalogService::new(
        config,
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(InMemoryFileStore::new()),
    )
    .context("building catalog service")?;

    if let Some(path) = &cli.seed {
        let posts = seed::load_manifest(path).await?;
        seed::seed_catalog(&service, posts).await?;
    }
    Ok(service)
}

async fn cmd_list(
    service: &CatalogService,
    args: ListArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let posts = match &args.category {
        Some(category) => service.posts_by_category(category).await?,
        None => service.list_posts(None).await?,
    };
    match format {
        OutputFormat::Json => print_json(&posts),
        OutputFormat::Text => {
            if posts.is_empty() {
                println!("No instruments.");
            }
            for post in &posts {
                print_post(post);
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    term: &'a str,
    categories: &'a [String],
    groups: &'a [CategoryGroup<'a, InstrumentPost>],
}

async fn cmd_search(
    service: &CatalogService,
    args: SearchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut cache = ListingCache::new();
    cache.load(service.list_posts(None).await?);
    cache.apply_search(args.term.as_deref().unwrap_or_default());

    let groups = cache.groups();
    match format {
        OutputFormat::Json => print_json(&SearchOutput {
            term: cache.term(),
            categories: cache.categories(),
            groups: &groups,
        }),
        OutputFormat::Text => {
            if groups.is_empty() {
                println!("No instruments match {:?}.", cache.term());
            }
            for group in &groups {
                print_group(group);
            }
            Ok(())
        }
    }
}

async fn cmd_suggest(
    service: &CatalogService,
    args: SuggestArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let posts = service.list_posts(None).await?;
    let mut search_box = SearchBox::with_limit(args.limit);
    search_box.input(&posts, &args.term);
    match format {
        OutputFormat::Json => print_json(&search_box),
        OutputFormat::Text => {
            for title in search_box.suggestions() {
                println!("  {}", title.bold());
            }
            Ok(())
        }
    }
}

async fn cmd_categories(service: &CatalogService, format: OutputFormat) -> anyhow::Result<()> {
    let posts = service.list_posts(None).await?;
    let categories = derive_categories(&posts);
    match format {
        OutputFormat::Json => print_json(&categories),
        OutputFormat::Text => {
            for category in &categories {
                println!("{}", category.cyan());
            }
            Ok(())
        }
    }
}

fn print_group(group: &CategoryGroup<'_, InstrumentPost>) {
    println!("{}", group.section_title().bold().underline());
    for post in &group.items {
        print_post(post);
    }
    println!();
}

fn print_post(post: &InstrumentPost) {
    println!("  {}  {}", post.title.bold(), format!("[{}]", post.category).cyan());
    if !post.description.is_empty() {
        println!("    {}", post.description.dimmed());
    }
    println!("    image: {}", post.image.url.blue());
    println!("    audio: {}", post.audio.url.blue());
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;

    fn seed_dir(dir: &Path) {
        std::fs::write(dir.join("a.png"), b"img").unwrap();
        std::fs::write(dir.join("a.mp3"), b"aud").unwrap();
        std::fs::write(
            dir.join("seed.json"),
            r#"[
                {"title": "Tabla A", "category": "tabla", "image": "a.png", "audio": "a.mp3"},
                {"title": "Sitar B", "category": "string", "image": "a.png", "audio": "a.mp3"}
            ]"#,
        )
        .unwrap();
    }

    async fn service_for(args: &[&str]) -> CatalogService {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        build_service(&cli).await.unwrap()
    }

    #[tokio::test]
    async fn build_without_seed_is_empty() {
        let service = service_for(&["tribal", "list"]).await;
        assert!(service.list_posts(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn build_with_seed_and_config() {
        let dir = tempfile::tempdir().unwrap();
        seed_dir(dir.path());
        let config = dir.path().join("tribal.toml");
        std::fs::write(&config, "page_size = 1\n").unwrap();
        let seed = dir.path().join("seed.json");

        let service = service_for(&[
            "tribal",
            "--config",
            config.to_str().unwrap(),
            "--seed",
            seed.to_str().unwrap(),
            "categories",
        ])
        .await;
        assert_eq!(service.config().page_size, 1);
        let posts = service.list_posts(None).await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(derive_categories(&posts), ["tabla", "string"]);
    }

    #[tokio::test]
    async fn commands_run_against_seeded_catalog() {
        let dir = tempfile::tempdir().unwrap();
        seed_dir(dir.path());
        let seed = dir.path().join("seed.json");
        let seed = seed.to_str().unwrap();

        for args in [
            vec!["tribal", "--seed", seed, "list"],
            vec!["tribal", "--seed", seed, "list", "--category", "tabla"],
            vec!["tribal", "--seed", seed, "--format", "json", "search", "tabla"],
            vec!["tribal", "--seed", seed, "search", "trumpet"],
            vec!["tribal", "--seed", seed, "suggest", "s", "-n", "1"],
            vec!["tribal", "--seed", seed, "--format", "json", "categories"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            run_command(cli).await.unwrap();
        }
    }

    #[tokio::test]
    async fn missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let config = missing.to_str().unwrap();
        let cli = Cli::try_parse_from(["tribal", "--config", config, "list"]).unwrap();
        assert!(build_service(&cli).await.is_err());
    }
}
