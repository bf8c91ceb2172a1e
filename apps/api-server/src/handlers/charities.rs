//! Charity discovery and follow handlers.

use actix_web::{HttpResponse, web};

use kindred_core::DomainError;
use kindred_core::domain::{Charity, Follow};
use kindred_core::ports::BaseRepository;
use kindred_shared::dto::{CharityListQuery, FollowResponse};

use super::convert::charity_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub(super) async fn find_charity(state: &AppState, id: &str) -> AppResult<Charity> {
    state
        .charities
        .find_by_id(id.to_string())
        .await?
        .ok_or_else(|| DomainError::not_found("Charity", id).into())
}

/// GET /api/charities?category=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<CharityListQuery>,
) -> AppResult<HttpResponse> {
    let charities = state.charities.list(query.category.as_deref()).await?;
    let body: Vec<_> = charities.iter().map(charity_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/charities/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let charity = find_charity(&state, &path).await?;

    let (follower_count, total_donated) = tokio::try_join!(
        state.follows.follower_count(&charity.id),
        state.donations.total_for_charity(&charity.id),
    )?;

    let mut body = charity_response(&charity);
    body.follower_count = Some(follower_count);
    body.total_donated_cents = Some(total_donated);
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/charities/{id}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let charity = find_charity(&state, &path).await?;

    let created = state
        .follows
        .follow(Follow::new(identity.user_id.clone(), charity.id.clone()))
        .await?;
    if created {
        tracing::info!(user_id = %identity.user_id, charity_id = %charity.id, "Charity followed");
    }

    let body = FollowResponse {
        follower_count: state.follows.follower_count(&charity.id).await?,
        charity_id: charity.id,
        following: true,
    };

    Ok(if created {
        HttpResponse::Created().json(body)
    } else {
        HttpResponse::Ok().json(body)
    })
}

/// DELETE /api/charities/{id}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let charity = find_charity(&state, &path).await?;

    if state.follows.unfollow(&identity.user_id, &charity.id).await? {
        tracing::info!(user_id = %identity.user_id, charity_id = %charity.id, "Charity unfollowed");
    }

    Ok(HttpResponse::Ok().json(FollowResponse {
        follower_count: state.follows.follower_count(&charity.id).await?,
        charity_id: charity.id,
        following: false,
    }))
}
