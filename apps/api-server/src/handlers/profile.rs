//! Profile handlers: the caller's own profile and local feed preferences.

use actix_web::{HttpResponse, web};

use kindred_core::domain::{GeoPoint, UserProfile};
use kindred_core::feed::radius::{clamp_radius, step_radius};
use kindred_core::ports::BaseRepository;
use kindred_shared::dto::{LocationDto, UpdateRadiusRequest};

use super::convert::{charity_response, donation_response, profile_response, radius_step};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Fetch the caller's profile, creating a default one on first use.
async fn load_or_create(state: &AppState, identity: &Identity) -> AppResult<UserProfile> {
    if let Some(profile) = state.profiles.find_by_id(identity.user_id.clone()).await? {
        return Ok(profile);
    }

    let display_name = identity
        .email
        .split('@')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("donor");
    let profile = UserProfile::new(identity.user_id.clone(), display_name);

    tracing::info!(user_id = %identity.user_id, "Creating profile");
    Ok(state.profiles.save(profile).await?)
}

/// GET /api/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profile = load_or_create(&state, &identity).await?;
    Ok(HttpResponse::Ok().json(profile_response(&profile)))
}

/// PUT /api/me/location
pub async fn update_location(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<LocationDto>,
) -> AppResult<HttpResponse> {
    let LocationDto {
        latitude,
        longitude,
    } = body.into_inner();

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest(
            "latitude must be within [-90, 90] and longitude within [-180, 180]".to_string(),
        ));
    }

    let mut profile = load_or_create(&state, &identity).await?;
    profile.location = Some(GeoPoint::new(latitude, longitude));
    profile.touch();
    let profile = state.profiles.save(profile).await?;

    Ok(HttpResponse::Ok().json(profile_response(&profile)))
}

/// PUT /api/me/radius
///
/// `{"step": "increase" | "decrease"}` moves the radius by one step;
/// `{"miles": n}` sets it. Both are clamped to the allowed range.
pub async fn update_radius(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateRadiusRequest>,
) -> AppResult<HttpResponse> {
    let mut profile = load_or_create(&state, &identity).await?;

    profile.feed_radius_miles = match body.into_inner() {
        UpdateRadiusRequest::Step { step } => {
            step_radius(profile.feed_radius_miles, radius_step(step))
        }
        UpdateRadiusRequest::Miles { miles } => clamp_radius(miles),
    };
    profile.touch();
    let profile = state.profiles.save(profile).await?;

    tracing::debug!(user_id = %profile.id, radius = profile.feed_radius_miles, "Feed radius updated");
    Ok(HttpResponse::Ok().json(profile_response(&profile)))
}

/// GET /api/me/follows
pub async fn follows(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let ids = state.follows.followed_charity_ids(&identity.user_id).await?;

    let mut charities = Vec::with_capacity(ids.len());
    for id in ids {
        // A followed charity may have been removed since
        if let Some(charity) = state.charities.find_by_id(id).await? {
            charities.push(charity_response(&charity));
        }
    }

    Ok(HttpResponse::Ok().json(charities))
}

/// GET /api/me/donations
pub async fn donations(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let donations = state.donations.find_by_user_id(&identity.user_id).await?;
    let body: Vec<_> = donations.iter().map(donation_response).collect();
    Ok(HttpResponse::Ok().json(body))
}
