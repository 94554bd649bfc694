//! Application-level configuration loading, including the seed game catalog.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "NEXT_GAME_CONFIG_PATH";
/// Development-only signing secret used when none is configured.
const DEFAULT_TOKEN_SECRET: &str = "next-game-dev-secret";
/// Session token lifetime when none is configured.
const DEFAULT_TOKEN_TTL_DAYS: u64 = 7;

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// HMAC secret used to sign session tokens.
    pub token_secret: String,
    /// Session token lifetime in days.
    pub token_ttl_days: u64,
    /// Catalog entries written to storage when the games collection is empty.
    pub seed_games: Vec<SeedGame>,
}

/// Catalog entry shipped with the binary or read from the config file.
///
/// Identifiers and timestamps are assigned at seeding time, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGame {
    /// Display name of the game.
    pub name: String,
    /// Single genre label.
    pub genre: String,
    /// Short description.
    pub description: String,
    /// Platforms the game is available on.
    pub platforms: Vec<String>,
    /// Play modes the game supports.
    pub modes: Vec<String>,
    /// Store-name to URL mapping.
    #[serde(default)]
    pub store_links: IndexMap<String, String>,
    /// Cover image URL.
    pub image: String,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        seed_count = app_config.seed_games.len(),
                        "loaded configuration file"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if config.token_secret == DEFAULT_TOKEN_SECRET {
            warn!("using the built-in development token secret; set one in the config file");
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token_secret: DEFAULT_TOKEN_SECRET.into(),
            token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
            seed_games: default_seed_games(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    token_secret: Option<String>,
    token_ttl_days: Option<u64>,
    seed_games: Option<Vec<SeedGame>>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            token_secret: value
                .token_secret
                .unwrap_or_else(|| DEFAULT_TOKEN_SECRET.into()),
            token_ttl_days: value.token_ttl_days.unwrap_or(DEFAULT_TOKEN_TTL_DAYS),
            seed_games: value.seed_games.unwrap_or_else(default_seed_games),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in catalog shipped with the binary.
fn default_seed_games() -> Vec<SeedGame> {
    fn epic(slug: &str) -> IndexMap<String, String> {
        IndexMap::from([(
            "epic".to_string(),
            format!("https://store.epicgames.com/en-US/p/{slug}"),
        )])
    }

    vec![
        SeedGame {
            name: "Fortnite".into(),
            genre: "Battle Royale".into(),
            description: "Free-to-play battle royale game with building mechanics".into(),
            platforms: vec![
                "PC".into(),
                "PlayStation".into(),
                "Xbox".into(),
                "Nintendo Switch".into(),
                "Mobile".into(),
            ],
            modes: vec!["Multiplayer".into(), "Co-op".into(), "Online".into()],
            store_links: epic("fortnite"),
            image: "https://images.unsplash.com/photo-1550745165-9bc0b252726f?w=800".into(),
        },
        SeedGame {
            name: "The Witcher 3: Wild Hunt".into(),
            genre: "RPG".into(),
            description: "Action role-playing game set in a fantasy world".into(),
            platforms: vec![
                "PC".into(),
                "PlayStation".into(),
                "Xbox".into(),
                "Nintendo Switch".into(),
            ],
            modes: vec!["Singleplayer".into(), "Offline".into()],
            store_links: epic("the-witcher-3-wild-hunt"),
            image: "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=800".into(),
        },
        SeedGame {
            name: "Rocket League".into(),
            genre: "Sports".into(),
            description: "Soccer with rocket-powered cars".into(),
            platforms: vec![
                "PC".into(),
                "PlayStation".into(),
                "Xbox".into(),
                "Nintendo Switch".into(),
            ],
            modes: vec!["Multiplayer".into(), "Co-op".into(), "Online".into()],
            store_links: epic("rocket-league"),
            image: "https://images.unsplash.com/photo-1551103782-8ab07afd45c1?w=800".into(),
        },
        SeedGame {
            name: "Among Us".into(),
            genre: "Party".into(),
            description: "Online multiplayer social deduction game".into(),
            platforms: vec!["PC".into(), "Mobile".into(), "Nintendo Switch".into()],
            modes: vec!["Multiplayer".into(), "Online".into()],
            store_links: epic("among-us"),
            image: "https://images.unsplash.com/photo-1618331833071-1c0c6ee3d19e?w=800".into(),
        },
        SeedGame {
            name: "Cyberpunk 2077".into(),
            genre: "RPG".into(),
            description: "Open-world action-adventure RPG".into(),
            platforms: vec!["PC".into(), "PlayStation".into(), "Xbox".into()],
            modes: vec!["Singleplayer".into(), "Offline".into()],
            store_links: epic("cyberpunk-2077"),
            image: "https://images.unsplash.com/photo-1618331835717-801e976710b2?w=800".into(),
        },
    ]
}
