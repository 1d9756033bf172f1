mod commands;

use clap::{Parser, Subcommand};
use polyglot_core::{config, ContentKind, ContentResolver, LocalizedStore};
use polyglot_store::SqliteStore;

#[derive(Parser)]
#[command(
    name = "polyglot",
    version,
    about = "Polyglot -- multi-language content resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a slug in a locale and print the fallback report.
    Resolve {
        /// Content collection (page, post, category).
        kind: String,
        /// Requested locale code.
        locale: String,
        /// Slug to look up.
        slug: String,
    },
    /// List published records with fields missing in a locale.
    Coverage {
        /// Content collection (page, post, category).
        kind: String,
        /// Locale to check. Defaults to every available locale.
        locale: Option<String>,
    },
    /// Show configuration and store summary.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.polyglot.log_level)),
        )
        .init();

    let locales = cfg.locales.validate()?;
    let store = build_store(&cfg).await?;
    tracing::debug!(
        "default locale {}, available: {}",
        locales.default_locale(),
        locales.available().join(", ")
    );

    match cli.command {
        Commands::Resolve { kind, locale, slug } => {
            let kind: ContentKind = kind.parse()?;
            let resolver = ContentResolver::new(store, locales);
            let report = resolver.resolve(kind, &locale, &slug).await?;
            let out = commands::render_resolve(&report, resolver.locales());
            println!("{}", serde_json::to_string_pretty(&out)?);
            if !report.is_found() {
                anyhow::bail!("no published {kind} with slug '{slug}'");
            }
        }
        Commands::Coverage { kind, locale } => {
            let kind: ContentKind = kind.parse()?;
            if let Some(ref l) = locale {
                if !locales.is_available(l) {
                    anyhow::bail!("locale '{l}' is not in the available locales");
                }
            }
            let records = store.list_published(kind).await?;
            print!(
                "{}",
                commands::render_coverage(&records, locale.as_deref(), &locales)
            );
        }
        Commands::Status => {
            let mut counts = Vec::new();
            for kind in ContentKind::ALL {
                counts.push((kind, store.count_by_status(kind).await?));
            }
            print!(
                "{}",
                commands::render_status(&cfg, &cli.config, store.name(), &counts)
            );
        }
    }

    Ok(())
}

/// Build the configured content store.
async fn build_store(cfg: &config::Config) -> anyhow::Result<SqliteStore> {
    match cfg.store.backend.as_str() {
        "sqlite" => Ok(SqliteStore::new(&cfg.store).await?),
        other => anyhow::bail!("unsupported store backend: {other}"),
    }
}
