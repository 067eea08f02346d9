use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use template_market::config::{self, MarketConfig};
use template_market::gallery::PreviewDialog;
use template_market::output;
use template_market::store::ListingStore;
use template_market::view::{PlatformFilter, SortKey, ViewQuery};

#[derive(Parser)]
#[command(name = "template-market")]
#[command(about = "Browse a template marketplace fixture")]
#[command(long_about = "\
Browse a template marketplace fixture

Listings are read once from the fixture JSON written by the marketplace
scrapers ({ \"lastUpdated\": ..., \"templates\": [...] }) and never modified.

Sort keys:
  sales        Most Popular (highest sales first)
  price_asc    Price: Low → High (first number in the price text, Free = 0)
  price_desc   Price: High → Low
  rating       Top Rated
  newest       Most recently scraped first

Set RUST_LOG=debug to trace loading and view computation.
Run 'template-market gen-config' to generate a documented market.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing market.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Listing fixture (overrides `fixture` from market.toml)
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter, search and sort the listings
    Browse {
        /// Platform to show, or "all"
        #[arg(long)]
        platform: Option<String>,
        /// Case-insensitive text matched against title, author and tags
        #[arg(long, short, default_value = "")]
        query: String,
        /// Sort key (sales, price_asc, price_desc, rating, newest)
        #[arg(long)]
        sort: Option<SortKey>,
    },
    /// Count listings per platform
    Tally,
    /// Show one listing with its image gallery
    Preview {
        /// Listing id
        id: String,
        /// Select the Nth image (1-based) before stepping
        #[arg(long)]
        image: Option<usize>,
        /// Gallery steps to apply, in order
        #[arg(long, value_enum)]
        step: Vec<Step>,
    },
    /// Validate the fixture without browsing
    Check,
    /// List the landing-page modules by rollout phase
    Roadmap,
    /// Print a stock market.toml with all options documented
    GenConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum Step {
    Next,
    Prev,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Browse {
            platform,
            query,
            sort,
        } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = load_store(cli.fixture.as_ref(), &config)?;
            let view_query = ViewQuery {
                platform: platform
                    .as_deref()
                    .map(PlatformFilter::from)
                    .unwrap_or_else(|| config.default_filter()),
                query,
                sort: sort.unwrap_or(config.browse.default_sort),
            };
            output::print_browse_output(&store, &config, &view_query);
        }
        Command::Tally => {
            let config = config::load_config(&cli.config_dir)?;
            let store = load_store(cli.fixture.as_ref(), &config)?;
            output::print_tally_output(&config, store.tally());
        }
        Command::Preview { id, image, step } => {
            let config = config::load_config(&cli.config_dir)?;
            let store = load_store(cli.fixture.as_ref(), &config)?;
            let listing = store
                .get(&id)
                .ok_or_else(|| format!("no listing with id '{id}'"))?;

            let mut dialog = PreviewDialog::new();
            dialog.show(listing);
            if let Some(gallery) = dialog.gallery_mut() {
                if let Some(n) = image {
                    let accepted = n.checked_sub(1).is_some_and(|i| gallery.jump_to(i));
                    if !accepted {
                        tracing::warn!(image = n, len = gallery.len(), "no such image, ignoring");
                    }
                }
                for s in step {
                    match s {
                        Step::Next => gallery.next(),
                        Step::Prev => gallery.prev(),
                    }
                }
            }
            if let Some(gallery) = dialog.gallery() {
                output::print_preview_output(listing, gallery, &config);
            }
            dialog.close();
        }
        Command::Check => {
            let config = config::load_config(&cli.config_dir)?;
            let path = fixture_path(cli.fixture.as_ref(), &config);
            println!("==> Checking {}", path.display());
            let store = ListingStore::load(&path)?;
            output::print_check_output(&store);
            println!("==> Fixture is valid");
        }
        Command::Roadmap => {
            output::print_roadmap_output();
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fixture_path(cli_fixture: Option<&PathBuf>, config: &MarketConfig) -> PathBuf {
    cli_fixture
        .cloned()
        .unwrap_or_else(|| PathBuf::from(&config.fixture))
}

fn load_store(
    cli_fixture: Option<&PathBuf>,
    config: &MarketConfig,
) -> Result<ListingStore, template_market::store::StoreError> {
    ListingStore::load(&fixture_path(cli_fixture, config))
}
