use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Next Game Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::games::list_games,
        crate::routes::games::append_game,
        crate::routes::games::random_game,
        crate::routes::games::like_game,
        crate::routes::games::unlike_game,
        crate::routes::users::list_favorites,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::auth::RegisterRequest,
            crate::dto::auth::LoginRequest,
            crate::dto::auth::UserProfile,
            crate::dto::auth::AuthResponse,
            crate::dto::game::GameInput,
            crate::dto::game::GameSummary,
            crate::dto::favorites::FavoriteIdsResponse,
            crate::dto::favorites::FavoriteGamesResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and login"),
        (name = "games", description = "Game catalog and random selection"),
        (name = "favorites", description = "Per-user favorites"),
    )
)]
pub struct ApiDoc;
