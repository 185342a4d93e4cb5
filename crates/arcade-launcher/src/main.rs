//! Arcade Launcher
//!
//! Command-line front end for the arcade portal: browse and filter the
//! catalog, run searches, and keep track of played and favorite games.

mod portal;

use anyhow::{Context, Result, bail};
use arcade_catalog::{Game, GameFilter, SortBy, SortOrder};
use arcade_config::PortalConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use portal::Portal;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SUGGEST_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "arcade-launcher", version)]
#[command(about = "Browse, search and play games from the arcade catalog")]
struct Cli {
    /// Configuration file; the layered system and user files are used when unset
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// List games, optionally filtered and sorted
    Games(GamesArgs),
    /// Ranked search across the catalog
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Autocomplete suggestions
    Suggest { prefix: Vec<String> },
    /// Games similar to a game
    Related { game_id: String },
    /// Categories with game counts
    Categories,
    /// Catalog statistics
    Stats,
    /// Record a game as played and print its URL
    Play { game_id: String },
    /// Toggle a favorite
    Favorite { game_id: String },
    /// Recently played games
    Recent,
    /// Favorite games
    Favorites,
    /// Recent searches
    History,
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
struct GamesArgs {
    /// Only games in this category id
    #[arg(long)]
    category: Option<String>,

    /// Games carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Case-insensitive text match on name, description, tags and developer
    #[arg(long)]
    search: Option<String>,

    /// name, popularity or date-added; unknown keys leave catalog order
    #[arg(long)]
    sort: Option<String>,

    #[arg(long, value_enum, default_value_t = Order::Asc)]
    order: Order,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Order {
    #[default]
    Asc,
    Desc,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => SortOrder::Asc,
            Order::Desc => SortOrder::Desc,
        }
    }
}

impl GamesArgs {
    fn into_filter(self) -> GameFilter {
        let sort_by = self.sort.as_deref().and_then(|key| {
            let parsed = SortBy::parse(key);
            if parsed.is_none() {
                warn!("Ignoring unknown sort key '{}'", key);
            }
            parsed
        });

        GameFilter {
            category: self.category,
            tags: self.tags,
            search: self.search,
            sort_by,
            sort_order: self.order.into(),
        }
    }
}

fn print_games<'a>(games: impl IntoIterator<Item = &'a Game>) {
    let mut any = false;
    for game in games {
        any = true;
        let star = if game.featured { "★" } else { " " };
        println!(
            "{} {:<28} {:<16} {:>3}  {}",
            star,
            game.id,
            game.category.name,
            game.popularity,
            game.name
        );
    }
    if !any {
        println!("No games found");
    }
}

fn run(portal: &mut Portal, command: Command) -> Result<()> {
    match command {
        Command::Games(args) => print_games(portal.games.filter_games(&args.into_filter())),
        Command::Search { query } => {
            let query = query.join(" ");
            let options = portal.search.default_options();
            let result = portal.search.search(&query, &options);
            for (game, score) in result.games.iter().zip(&result.scores) {
                println!("{:>7.1}  {:<28} {}", score, game.id, game.name);
            }
            println!(
                "{} result(s) in {:.2}ms",
                result.total_results, result.search_time_ms
            );
            if !result.categories.is_empty() {
                let names: Vec<&str> = result.categories.iter().map(|c| c.name.as_str()).collect();
                println!("Categories: {}", names.join(", "));
            }
            if !result.suggestions.is_empty() {
                println!("Did you mean: {}", result.suggestions.join(", "));
            }
        }
        Command::Suggest { prefix } => {
            let prefix = prefix.join(" ");
            for suggestion in portal.search.generate_suggestions(&prefix, SUGGEST_LIMIT) {
                println!("{}", suggestion);
            }
        }
        Command::Related { game_id: id } => {
            if portal.catalog.get_game_by_id(&id).is_none() {
                bail!("no game with id '{}'", id);
            }
            print_games(portal.games.get_related_games(&id, 4));
        }
        Command::Categories => {
            for entry in portal.categories.get_categories_by_popularity() {
                println!(
                    "{:<16} {:>3} game(s)  {}",
                    entry.category.slug, entry.game_count, entry.category.description
                );
            }
        }
        Command::Stats => {
            let stats = portal.games.get_game_stats();
            println!("Games:              {}", stats.total_games);
            println!("Categories in use:  {}", stats.unique_categories);
            println!("Featured:           {}", stats.featured_games);
            println!("Average popularity: {}", stats.average_popularity);
        }
        Command::Play { game_id: id } => {
            let Some(game) = portal.catalog.get_game_by_id(&id) else {
                bail!("no game with id '{}'", id);
            };
            portal.user.add_to_recently_played(&game.id);
            info!("Playing {}", game.name);
            println!("{}", game.url);
        }
        Command::Favorite { game_id: id } => {
            if portal.user.toggle_favorite(&id) {
                println!("Added {} to favorites", id);
            } else {
                println!("Removed {} from favorites", id);
            }
        }
        Command::Recent => print_games(portal.user.get_recently_played()),
        Command::Favorites => print_games(portal.user.get_favorites()),
        Command::History => {
            for query in portal.search.get_search_history(20) {
                println!("{}", query);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => PortalConfig::load(&path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => PortalConfig::load_default().context("loading configuration")?,
    };

    let mut portal = Portal::from_config(&config)?;
    run(&mut portal, cli.command)
}
