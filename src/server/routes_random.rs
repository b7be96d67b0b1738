use crate::projection::{ArtistPayload, Envelope, MoviePayload, ShowPayload};
use crate::server::{error::ErrorEnvelope, ApiError, AppContext};
use axum::{extract::State, routing::get, Json, Router};
use randomedia_core::RandomSampler;

pub fn random_routes() -> Router<AppContext> {
    Router::new()
        .route("/movie/random", get(random_movie))
        .route("/tv/random", get(random_show))
        .route("/artist/random", get(random_artist))
}

/// Random movie that is available on at least one streaming service.
#[utoipa::path(
    get,
    path = "/movie/random",
    tag = "random",
    responses(
        (status = 200, description = "Movie details and streaming locations, tagged `status: ok`", body = MoviePayload),
        (status = 502, description = "Upstream failure", body = ErrorEnvelope),
        (status = 503, description = "No valid movie found within the discovery budget", body = ErrorEnvelope)
    )
)]
pub async fn random_movie(
    State(ctx): State<AppContext>,
) -> Result<Json<Envelope<MoviePayload>>, ApiError> {
    let mut sampler = RandomSampler::from_entropy();
    let payload = ctx.service.random_movie(&mut sampler).await?;
    Ok(Json(Envelope::ok(payload)))
}

/// Random TV show with trailer search results.
#[utoipa::path(
    get,
    path = "/tv/random",
    tag = "random",
    responses(
        (status = 200, description = "Show details and trailers, tagged `status: ok`", body = ShowPayload),
        (status = 502, description = "Upstream failure", body = ErrorEnvelope),
        (status = 503, description = "No valid show found within the discovery budget", body = ErrorEnvelope)
    )
)]
pub async fn random_show(
    State(ctx): State<AppContext>,
) -> Result<Json<Envelope<ShowPayload>>, ApiError> {
    let mut sampler = RandomSampler::from_entropy();
    let payload = ctx.service.random_show(&mut sampler).await?;
    Ok(Json(Envelope::ok(payload)))
}

/// Random music artist with upcoming live events.
#[utoipa::path(
    get,
    path = "/artist/random",
    tag = "random",
    responses(
        (status = 200, description = "Artist details and events, tagged `status: ok`", body = ArtistPayload),
        (status = 502, description = "Upstream failure", body = ErrorEnvelope),
        (status = 503, description = "No valid artist found within the discovery budget", body = ErrorEnvelope)
    )
)]
pub async fn random_artist(
    State(ctx): State<AppContext>,
) -> Result<Json<Envelope<ArtistPayload>>, ApiError> {
    let mut sampler = RandomSampler::from_entropy();
    let payload = ctx.service.random_artist(&mut sampler).await?;
    Ok(Json(Envelope::ok(payload)))
}
