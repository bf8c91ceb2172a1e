//! Feed handlers.

use std::collections::HashSet;

use actix_web::{HttpResponse, web};

use kindred_core::domain::GeoPoint;
use kindred_core::feed::radius::DEFAULT_RADIUS_MILES;
use kindred_core::feed::{
    CharityIndex, filter_local_feed, following_feed, recent_feed, resolve_user_location,
};
use kindred_core::ports::BaseRepository;
use kindred_shared::dto::{FeedResponse, LocalFeedQuery, LocalFeedResponse};

use super::convert::{location_dto, posts_response};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/feed
pub async fn recent(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_recent(state.settings.feed_post_limit).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: posts_response(&recent_feed(&posts)),
    }))
}

fn device_location(query: &LocalFeedQuery) -> AppResult<Option<GeoPoint>> {
    match (query.lat, query.lon) {
        (Some(lat), Some(lon)) => Ok(Some(GeoPoint::new(lat, lon))),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "lat and lon must be given together".to_string(),
        )),
    }
}

/// GET /api/feed/local?lat=&lon=&radius=
///
/// Location falls back to the caller's saved profile location, radius to the
/// saved radius and then the default.
pub async fn local(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<LocalFeedQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let device = device_location(&query)?;

    if query
        .radius
        .is_some_and(|radius| !(radius.is_finite() && radius >= 0.0))
    {
        return Err(AppError::BadRequest(
            "radius must be a non-negative number of miles".to_string(),
        ));
    }

    let profile = match &identity.0 {
        Some(identity) => state.profiles.find_by_id(identity.user_id.clone()).await?,
        None => None,
    };

    let radius_miles = query
        .radius
        .or(profile.as_ref().map(|p| p.feed_radius_miles))
        .unwrap_or(DEFAULT_RADIUS_MILES);
    let location = resolve_user_location(device, profile.as_ref());

    if location.is_none() {
        tracing::debug!("No user location known, local feed is empty");
    }

    let (posts, charities) = tokio::try_join!(
        state.posts.list_recent(state.settings.feed_post_limit),
        state.charities.list(None),
    )?;

    let index = CharityIndex::new(&charities);
    let feed = filter_local_feed(&posts, |id| index.get(id), location, radius_miles);

    tracing::debug!(
        candidates = posts.len(),
        included = feed.posts.len(),
        radius_miles,
        "Local feed computed"
    );

    Ok(HttpResponse::Ok().json(LocalFeedResponse {
        posts: posts_response(&feed.posts),
        distances: feed.distances,
        radius_miles,
        location: location.map(location_dto),
    }))
}

/// GET /api/feed/following
pub async fn following(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let followed: HashSet<String> = state
        .follows
        .followed_charity_ids(&identity.user_id)
        .await?
        .into_iter()
        .collect();

    let posts = if followed.is_empty() {
        Vec::new()
    } else {
        let posts = state.posts.list_recent(state.settings.feed_post_limit).await?;
        following_feed(&posts, &followed)
    };

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: posts_response(&posts),
    }))
}
