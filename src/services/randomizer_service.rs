//! Filtered uniform random selection over the game catalog.

use rand::Rng;

use crate::{
    dao::models::GameEntity, dto::game::GameSummary, error::ServiceError, state::SharedState,
};

/// Sentinel filter value meaning "no constraint", sent by the frontend for an
/// untouched dropdown.
const ALL: &str = "all";

/// Filter criteria narrowing the catalog before the random draw.
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    /// Genre constraint, matched against the scalar genre field.
    pub genre: Option<String>,
    /// Platform constraint, matched against any platform entry.
    pub platform: Option<String>,
    /// Mode constraint, matched against any mode entry.
    pub mode: Option<String>,
}

impl GameFilter {
    fn active(value: &Option<String>) -> Option<&str> {
        value
            .as_deref()
            .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(ALL))
    }
}

/// Draw one uniformly random game matching `filter`, or fail with not-found
/// when nothing matches.
///
/// Every call is an independent draw over a fresh catalog snapshot; repeats
/// are possible and previously seen games are not excluded.
pub async fn select_random(
    state: &SharedState,
    filter: GameFilter,
) -> Result<GameSummary, ServiceError> {
    let catalog = super::catalog_service::read_catalog(state).await?;
    let candidates = filter_catalog(catalog, &filter);

    draw(candidates)
        .map(Into::into)
        .ok_or_else(|| ServiceError::NotFound("no games match the requested filters".into()))
}

/// Narrow the catalog to games matching every active filter field.
///
/// Matching is a case-insensitive substring test, not exact equality, so
/// `rpg` matches "RPG" and `switch` matches "Nintendo Switch". The three
/// filters compose by logical AND and apply independently of order.
pub fn filter_catalog(mut catalog: Vec<GameEntity>, filter: &GameFilter) -> Vec<GameEntity> {
    if let Some(genre) = GameFilter::active(&filter.genre) {
        catalog.retain(|game| contains_ignore_case(&game.genre, genre));
    }
    if let Some(platform) = GameFilter::active(&filter.platform) {
        catalog.retain(|game| {
            game.platforms
                .iter()
                .any(|candidate| contains_ignore_case(candidate, platform))
        });
    }
    if let Some(mode) = GameFilter::active(&filter.mode) {
        catalog.retain(|game| {
            game.modes
                .iter()
                .any(|candidate| contains_ignore_case(candidate, mode))
        });
    }
    catalog
}

/// Uniform draw over the candidate set.
fn draw(mut candidates: Vec<GameEntity>) -> Option<GameEntity> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use indexmap::IndexMap;
    use uuid::Uuid;

    use super::*;

    fn game(name: &str, genre: &str, platforms: &[&str], modes: &[&str]) -> GameEntity {
        GameEntity {
            id: Uuid::new_v4(),
            name: name.into(),
            genre: genre.into(),
            description: String::new(),
            platforms: platforms.iter().map(|p| p.to_string()).collect(),
            modes: modes.iter().map(|m| m.to_string()).collect(),
            store_links: IndexMap::new(),
            image: String::new(),
            created_at: SystemTime::UNIX_EPOCH,
        }
    }

    fn catalog() -> Vec<GameEntity> {
        vec![
            game("Witcher", "RPG", &["PC"], &["Singleplayer"]),
            game("Rocket League", "Sports", &["PC", "Xbox"], &["Multiplayer"]),
            game(
                "Fortnite",
                "Battle Royale",
                &["PC", "Nintendo Switch"],
                &["Multiplayer", "Co-op"],
            ),
        ]
    }

    fn filter(genre: Option<&str>, platform: Option<&str>, mode: Option<&str>) -> GameFilter {
        GameFilter {
            genre: genre.map(Into::into),
            platform: platform.map(Into::into),
            mode: mode.map(Into::into),
        }
    }

    #[test]
    fn genre_matches_case_insensitive_substring() {
        let matched = filter_catalog(catalog(), &filter(Some("rpg"), None, None));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Witcher");
    }

    #[test]
    fn platform_matches_any_set_member() {
        let matched = filter_catalog(catalog(), &filter(None, Some("switch"), None));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Fortnite");
    }

    #[test]
    fn filters_compose_by_and() {
        let matched = filter_catalog(catalog(), &filter(None, Some("pc"), Some("multiplayer")));
        let names = matched.iter().map(|g| g.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Rocket League", "Fortnite"]);
    }

    #[test]
    fn all_sentinel_and_absent_mean_no_constraint() {
        assert_eq!(filter_catalog(catalog(), &GameFilter::default()).len(), 3);
        assert_eq!(
            filter_catalog(catalog(), &filter(Some("all"), Some("ALL"), None)).len(),
            3
        );
    }

    #[test]
    fn empty_candidate_set_yields_no_draw() {
        let matched = filter_catalog(catalog(), &filter(Some("horror"), None, None));
        assert!(matched.is_empty());
        assert!(draw(matched).is_none());
    }

    #[test]
    fn single_candidate_always_drawn() {
        // With one match the draw is deterministic regardless of the RNG.
        for _ in 0..20 {
            let matched = filter_catalog(catalog(), &filter(Some("rpg"), None, None));
            let drawn = draw(matched).unwrap();
            assert_eq!(drawn.name, "Witcher");
        }
    }

    #[test]
    fn draw_always_satisfies_active_filters() {
        for _ in 0..50 {
            let matched = filter_catalog(catalog(), &filter(None, Some("pc"), Some("multi")));
            let drawn = draw(matched).unwrap();
            assert!(drawn.platforms.iter().any(|p| p.to_lowercase().contains("pc")));
            assert!(drawn.modes.iter().any(|m| m.to_lowercase().contains("multi")));
        }
    }
}
