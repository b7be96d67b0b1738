//! OpenAPI documentation and Swagger UI integration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::AppContext;

/// OpenAPI documentation for randomedia.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "randomedia API",
        version = "0.1.0",
        description = "Random movies, TV shows, and music artists aggregated from upstream media APIs",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "/", description = "Default server")
    ),
    paths(
        super::routes_random::random_movie,
        super::routes_random::random_show,
        super::routes_random::random_artist,
    ),
    components(
        schemas(
            crate::projection::MoviePayload,
            crate::projection::MovieInfo,
            crate::projection::StreamingInfo,
            crate::projection::ShowPayload,
            crate::projection::ShowInfo,
            crate::projection::Trailer,
            crate::projection::ArtistPayload,
            crate::projection::ArtistInfo,
            crate::projection::Event,
            super::error::ErrorEnvelope,
            super::error::ErrorDetail,
        )
    ),
    tags(
        (name = "random", description = "Random entity discovery endpoints"),
    )
)]
pub struct ApiDoc;

pub fn openapi_routes() -> Router<AppContext> {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
