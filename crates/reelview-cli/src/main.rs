//! reelview - TMDB movie catalog browser CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path};
use reelview_api::catalog::{
    CatalogClient, Completion, DEFAULT_IMAGE_BASE_URL, GenreFetcher, ImageSize, LikedMovies,
    LocalCatalogApi, MoviePage, MovieId, MovieSummary, MovieView, poster_url,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List movies now playing in theaters.
    NowPlaying(ListArgs),
    /// List upcoming movies.
    Upcoming(ListArgs),
    /// List top-rated movies.
    TopRated(ListArgs),
    /// List movie genres.
    Genres,
    /// Browse movies in a genre, loading pages incrementally.
    Browse(BrowseArgs),
    /// Show movie details, recommendations and trailer.
    Movie(MovieArgs),
    /// Print the image URL for a poster path (no network access).
    Poster(PosterArgs),
}

/// Arguments for the listing subcommands.
#[derive(clap::Args)]
struct ListArgs {
    /// Result page (1-based).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Genre ID (see `reelview genres`).
    #[arg(long, required = true)]
    genre: u32,
    /// Maximum number of pages to load.
    #[arg(long, default_value_t = 1)]
    pages: u32,
    /// Toggle the like on a loaded movie (repeatable).
    #[arg(long = "like", value_name = "ID")]
    likes: Vec<u64>,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `poster` subcommand.
#[derive(clap::Args)]
struct PosterArgs {
    /// Image path as returned by the catalog (e.g. "/abc.jpg").
    #[arg(long, required = true)]
    path: String,
    /// Image rendition.
    #[arg(long, value_enum, default_value_t = SizeArg::Thumbnail)]
    size: SizeArg,
}

/// Image rendition argument.
#[derive(Clone, Copy, ValueEnum)]
enum SizeArg {
    /// Grid/card size.
    Thumbnail,
    /// Full resolution.
    Original,
}

impl From<SizeArg> for ImageSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Thumbnail => Self::Thumbnail,
            SizeArg::Original => Self::Original,
        }
    }
}

/// Which fixed listing to fetch.
#[derive(Clone, Copy)]
enum Listing {
    /// `movie/now_playing`
    NowPlaying,
    /// `movie/upcoming`
    Upcoming,
    /// `movie/top_rated`
    TopRated,
}

/// Builds a `CatalogClient` from the config file and `TMDB_API_KEY`.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, a URL override is
/// invalid, or no API key is configured.
#[instrument(skip_all)]
fn build_catalog_client(dir: Option<&PathBuf>) -> Result<CatalogClient> {
    let config_path = resolve_config_path(dir)?;
    let config = AppConfig::load(&config_path)?;
    let catalog = &config.catalog;

    let mut builder = CatalogClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(key) = catalog.effective_api_key(std::env::var(API_KEY_ENV).ok()) {
        builder = builder.api_key(key);
    } else {
        tracing::debug!(
            config = %config_path.display(),
            "no API key in config file or {API_KEY_ENV}"
        );
    }
    if let Some(ref base_url) = catalog.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid catalog.base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }
    if let Some(ref image_base_url) = catalog.image_base_url {
        builder = builder.image_base_url(image_base_url.clone());
    }
    if let Some(ref language) = catalog.language {
        builder = builder.language(language.clone());
    }
    if let Some(secs) = catalog.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().context("failed to build catalog client")
}

/// Logs a movie table.
fn log_movies(client: &CatalogClient, movies: &[MovieSummary]) {
    tracing::info!("ID\tYear\tRating\tVotes\tLang\tTitle\tPoster");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}\t{}\t{}\t{}",
            movie.id,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
            movie.vote_count,
            movie.original_language,
            movie.title,
            client
                .poster_url(movie.poster_path.as_deref(), ImageSize::Thumbnail)
                .as_deref()
                .unwrap_or("-"),
        );
    }
}

/// Logs the liked-movies list, or its empty state.
fn log_liked(liked: &LikedMovies) {
    tracing::info!("Liked Movies");
    if liked.is_empty() {
        tracing::info!("No liked movies yet.");
        return;
    }
    for movie in liked.iter() {
        tracing::info!("{}\t{}\tRating: {:.1}", movie.id, movie.title, movie.vote_average);
    }
}

/// Runs the `now-playing`, `upcoming` and `top-rated` subcommands.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_listing(listing: Listing, args: &ListArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let page: MoviePage = match listing {
        Listing::NowPlaying => client.fetch_now_playing(args.page).await,
        Listing::Upcoming => client.fetch_upcoming(args.page).await,
        Listing::TopRated => client.fetch_top_rated(args.page).await,
    }
    .context("catalog listing request failed")?;

    tracing::info!(
        "Page {}/{} ({} results total)",
        page.page,
        page.total_pages,
        page.total_results
    );
    log_movies(&client, &page.results);

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let client = build_catalog_client(dir)?;

    let genres = client
        .fetch_genres()
        .await
        .context("catalog genre list request failed")?;

    tracing::info!("ID\tName");
    for (id, name) in &genres {
        tracing::info!("{id}\t{name}");
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// Loads pages through a `GenreFetcher` until `--pages` pages were applied
/// or the listing is exhausted.
///
/// # Errors
///
/// Returns an error if the client fails to build or a page request fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.pages == 0 {
        bail!("--pages must be at least 1");
    }
    let client = build_catalog_client(dir)?;
    let mut fetcher = GenreFetcher::new(args.genre);

    let mut loaded = 0u32;
    while loaded < args.pages {
        match fetcher.fetch_next(&client).await {
            None => break,
            Some(Completion::Applied { .. }) => loaded = loaded.saturating_add(1),
            Some(Completion::Stale) => {
                tracing::warn!(page = fetcher.page(), "server returned a different page");
                break;
            }
            Some(Completion::Failed(err)) => {
                return Err(err).with_context(|| {
                    format!(
                        "failed to load page {} of genre {}",
                        fetcher.page(),
                        args.genre
                    )
                });
            }
        }
    }

    tracing::info!(
        "Genre {}: {} movies in {} page(s){}",
        args.genre,
        fetcher.len(),
        loaded,
        if fetcher.is_exhausted() {
            " (end of listing)"
        } else {
            ""
        }
    );
    log_movies(&client, fetcher.items());

    if !args.likes.is_empty() {
        let mut liked = LikedMovies::new();
        for id in &args.likes {
            match fetcher.items().iter().find(|m| m.id == *id) {
                Some(movie) => {
                    liked.toggle(movie);
                }
                None => tracing::warn!(movie_id = *id, "movie not in loaded pages, like ignored"),
            }
        }
        tracing::info!("---");
        log_liked(&liked);
    }

    Ok(())
}

/// Runs the `movie` subcommand.
///
/// An unknown movie ID is reported as an empty result, not an error.
///
/// # Errors
///
/// Returns an error if the ID is zero, the client fails to build, or the
/// detail request fails for a reason other than absence.
#[instrument(skip_all)]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let movie_id = MovieId::new(args.id).context("invalid --id")?;
    let client = build_catalog_client(dir)?;

    let view = match MovieView::load(&client, movie_id).await {
        Ok(view) => view,
        Err(err) if err.is_not_found() => {
            tracing::info!("No movie found with ID {movie_id}");
            return Ok(());
        }
        Err(err) => return Err(err).context("catalog movie request failed"),
    };

    let detail = &view.detail;
    tracing::info!("ID: {}", detail.id);
    tracing::info!("Title: {}", detail.title);
    if let Some(ref tagline) = detail.tagline {
        tracing::info!("Tagline: {tagline}");
    }
    tracing::info!(
        "Release Date: {}",
        detail.release_date.as_deref().unwrap_or("-")
    );
    tracing::info!("Status: {}", detail.status.as_deref().unwrap_or("-"));
    tracing::info!(
        "Runtime: {}",
        detail
            .runtime
            .map_or_else(|| String::from("-"), |r| format!("{r}min"))
    );
    tracing::info!("Genres: {}", detail.genre_names());
    tracing::info!(
        "Rating: {:.1} ({} votes)",
        detail.vote_average,
        detail.vote_count
    );
    tracing::info!(
        "Languages: {}",
        detail
            .spoken_languages
            .iter()
            .map(|l| l.iso_639_1.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Companies: {}",
        detail
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!(
        "Countries: {}",
        detail
            .production_countries
            .iter()
            .map(|c| c.iso_3166_1.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    tracing::info!("Revenue: {}", detail.revenue);
    tracing::info!(
        "Backdrop: {}",
        client
            .poster_url(detail.backdrop_path.as_deref(), ImageSize::Original)
            .as_deref()
            .unwrap_or("-")
    );
    tracing::info!("Overview: {}", detail.overview.as_deref().unwrap_or("-"));
    tracing::info!(
        "Trailer: {}",
        view.trailer()
            .and_then(reelview_api::catalog::Video::watch_url)
            .as_deref()
            .unwrap_or("-")
    );

    if !view.recommendations.is_empty() {
        tracing::info!("---");
        tracing::info!("Recommendations:");
        log_movies(&client, &view.recommendations);
    }

    Ok(())
}

/// Runs the `poster` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded.
fn run_poster(args: &PosterArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::load(&resolve_config_path(dir)?)?;
    let base = config
        .catalog
        .image_base_url
        .as_deref()
        .unwrap_or(DEFAULT_IMAGE_BASE_URL);

    match poster_url(base, Some(&args.path), args.size.into()) {
        Some(url) => tracing::info!("{url}"),
        None => tracing::info!("-"),
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::NowPlaying(args) => run_listing(Listing::NowPlaying, &args, dir).await,
        Commands::Upcoming(args) => run_listing(Listing::Upcoming, &args, dir).await,
        Commands::TopRated(args) => run_listing(Listing::TopRated, &args, dir).await,
        Commands::Genres => run_genres(dir).await,
        Commands::Browse(args) => run_browse(&args, dir).await,
        Commands::Movie(args) => run_movie(&args, dir).await,
        Commands::Poster(args) => run_poster(&args, dir),
    }
}
