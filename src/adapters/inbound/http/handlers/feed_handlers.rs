use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    adapters::inbound::http::{
        dto::{
            ErrorResponseDto, FeedSnapshotDto, HealthDto, LiveStreamDto, MediaListingDto,
            MediaQueryDto,
        },
        router::AppState,
    },
    domain::{models::FeedKind, value_objects::Prefix},
};

type HandlerError = (StatusCode, Json<ErrorResponseDto>);

fn parse_feed_kind(kind: &str) -> Result<FeedKind, HandlerError> {
    kind.parse::<FeedKind>()
        .map_err(|e| (StatusCode::NOT_FOUND, Json(ErrorResponseDto::not_found(&e))))
}

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto::ok())
}

/// Return a feed's current snapshot without triggering a load
pub async fn get_feed(
    State(app_state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<FeedSnapshotDto>, HandlerError> {
    let kind = parse_feed_kind(&kind)?;
    let snapshot = app_state.feed_service.snapshot(kind).await;

    Ok(Json(snapshot.into()))
}

/// Run a load cycle and return the snapshot it produced
pub async fn reload_feed(
    State(app_state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<FeedSnapshotDto>, HandlerError> {
    let kind = parse_feed_kind(&kind)?;
    let snapshot = app_state.feed_service.load(kind).await;

    Ok(Json(snapshot.into()))
}

/// List and resolve arbitrary prefixes
pub async fn list_media(
    State(app_state): State<AppState>,
    Query(params): Query<MediaQueryDto>,
) -> Result<Json<MediaListingDto>, HandlerError> {
    let prefixes = Prefix::parse_all(
        params
            .prefixes
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty()),
    )
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::bad_request(&format!(
                "Invalid prefix: {}",
                e
            ))),
        )
    })?;

    if prefixes.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponseDto::bad_request("At least one prefix is required")),
        ));
    }

    let listing = app_state
        .media_service
        .list_and_resolve(&prefixes)
        .await
        .map_err(|e| {
            let status_code = StatusCode::from(e.clone());
            (status_code, Json(ErrorResponseDto::from_storage_error(e)))
        })?;

    Ok(Json(listing.into()))
}

pub async fn get_live_stream(State(app_state): State<AppState>) -> Json<LiveStreamDto> {
    Json(LiveStreamDto::from(&app_state.live_stream))
}
