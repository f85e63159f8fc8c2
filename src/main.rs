// src/main.rs
//
// popmovies command line
//
// Wires the favorites store, the catalog client and the services the
// same way a screen would, then runs one command and tears down.

use anyhow::Context;
use clap::{Parser, Subcommand};

use popmovies::application::dates::format_release_date;
use popmovies::integrations::tmdb::urls;
use popmovies::{
    play_video, AppConfig, AppError, AppResult, AppState, CommandUrlHandler, FavoritesChanged,
    MovieSummary, SortOrder, ToUserMessage, UserMessage,
};

#[derive(Parser)]
#[command(name = "popmovies")]
#[command(about = "Browse the movie catalog and keep favorites offline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies (popular, top_rated or favorites)
    List {
        /// Sort order; defaults to the configured one
        #[arg(short, long)]
        sort: Option<SortOrder>,
    },

    /// Show genres, trailers and reviews for a movie
    Detail { movie_id: i64 },

    /// Save a listed movie as a favorite
    Favorite { movie_id: i64 },

    /// Remove a movie from favorites
    Unfavorite { movie_id: i64 },

    /// List saved favorites
    Favorites,

    /// Play the first trailer of a movie
    Trailer { movie_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;
    if !config.has_api_key() {
        log::warn!(
            "No catalog API key; set {} or api_key in the config file",
            popmovies::config::ENV_API_KEY
        );
    }
    let state = AppState::initialize(config).context("Failed to open the favorites store")?;

    state.event_bus.subscribe::<FavoritesChanged, _>(|event| {
        log::debug!(
            "Favorites changed: {:?} on {} ({} rows)",
            event.kind,
            event.uri(),
            event.rows_affected
        );
    });

    let outcome = run(&state, cli.command).await.to_user_message();
    state.shutdown();

    if let Err(message) = outcome {
        eprintln!("{}", message);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: &AppState, command: Commands) -> AppResult<()> {
    match command {
        Commands::List { sort } => {
            let sort = sort.unwrap_or(state.config.default_sort_order);
            let movies = state.catalog_service.load_movies(sort).await?;
            print_movies(state, &movies);
        }

        Commands::Detail { movie_id } => {
            let Some(detail) = state.catalog_service.load_detail(movie_id).await? else {
                return Err(AppError::NotFound);
            };
            let saved = state.catalog_service.is_favorite(movie_id).await?;

            println!("Movie {}{}", movie_id, if saved { " (favorite)" } else { "" });
            println!("Genres: {}", detail.genre_label());

            if detail.has_videos() {
                println!("\nTrailers:");
            }
            for video in &detail.videos {
                println!(
                    "  {} [{} {}p] {}",
                    video.name,
                    video.video_type,
                    video.size,
                    urls::youtube_thumbnail_url(&video.key)
                );
            }

            if detail.has_reviews() {
                println!("\nReviews:");
            }
            for review in &detail.reviews {
                println!("  {}: {}", review.author, review.url);
            }
        }

        Commands::Favorite { movie_id } => {
            let Some(movie) = find_listed_movie(state, movie_id).await? else {
                return Err(AppError::NotFound);
            };
            let Some(detail) = state.catalog_service.load_detail(movie_id).await? else {
                return Err(AppError::NotFound);
            };

            state.favorites_service.add_favorite(&movie, &detail)?;
            println!("Saved {} to favorites", movie.title);
        }

        Commands::Unfavorite { movie_id } => {
            let removed = state.favorites_service.remove_favorite(movie_id)?;
            if removed == 0 {
                println!("Movie {} is not a favorite", movie_id);
            } else {
                println!("Removed movie {} from favorites", movie_id);
            }
        }

        Commands::Favorites => {
            let movies = state.catalog_service.load_movies(SortOrder::Favorites).await?;
            print_movies(state, &movies);
        }

        Commands::Trailer { movie_id } => {
            let Some(detail) = state.catalog_service.load_detail(movie_id).await? else {
                return Err(AppError::NotFound);
            };
            let Some(video) = detail.videos.iter().find(|v| v.is_youtube()) else {
                println!("No trailers for movie {}", movie_id);
                return Ok(());
            };

            let app = CommandUrlHandler::new("mpv");
            let web = CommandUrlHandler::system_browser();
            play_video(&video.key, &app, &web)?;
            println!("Playing {}", video.name);
        }
    }
    Ok(())
}

/// Look a movie up in the remote lists, the way a screen reaches detail
async fn find_listed_movie(state: &AppState, movie_id: i64) -> AppResult<Option<MovieSummary>> {
    for sort in [SortOrder::Popular, SortOrder::TopRated] {
        let movies = state.catalog_service.load_movies(sort).await?;
        if let Some(movie) = movies.into_iter().find(|m| m.id == movie_id) {
            return Ok(Some(movie));
        }
    }
    Ok(None)
}

fn print_movies(state: &AppState, movies: &[MovieSummary]) {
    if movies.is_empty() {
        println!("{}", UserMessage::NoResults);
        return;
    }

    for movie in movies {
        let poster = movie
            .poster_path
            .as_deref()
            .map(|path| urls::image_url(&state.config.poster_size, path))
            .unwrap_or_default();

        println!(
            "{} {:>8}  {}  ({}, {:.1}/10)  {}",
            if movie.is_favorite { "*" } else { " " },
            movie.id,
            movie.title,
            format_release_date(&movie.release_date, &state.config.display_date_format),
            movie.vote_average,
            poster
        );
    }
}
