//! Publishing posts.

use actix_web::{HttpResponse, web};

use kindred_core::DomainError;
use kindred_core::domain::Post;
use kindred_core::ports::BaseRepository;
use kindred_shared::dto::{CreatePostRequest, FeedResponse};

use super::charities::find_charity;
use super::convert::{post_response, posts_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MAX_CONTENT_CHARS: usize = 2000;

/// POST /api/posts
///
/// Publishing as a charity requires the `charity:<id>` role for that charity.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let content = req.content.trim();
    if content.is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(AppError::BadRequest(format!(
            "content must be at most {MAX_CONTENT_CHARS} characters"
        )));
    }

    let mut post = match req.charity_id {
        Some(charity_id) => {
            let charity = find_charity(&state, &charity_id).await?;
            if !identity.speaks_for(&charity.id) {
                return Err(DomainError::Forbidden(format!(
                    "not allowed to post as charity {}",
                    charity.id
                ))
                .into());
            }
            Post::by_charity(charity.id, content)
        }
        None => Post::by_user(identity.user_id.clone(), content),
    };
    post.image_url = req.image_url.filter(|url| !url.trim().is_empty());

    let saved = state.posts.save(post).await?;

    tracing::info!(
        post_id = %saved.id,
        author = %identity.user_id,
        charity_id = ?saved.charity_id,
        "Post published"
    );

    Ok(HttpResponse::Created().json(post_response(&saved)))
}

/// GET /api/charities/{id}/posts
pub async fn by_charity(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let charity = find_charity(&state, &path).await?;
    let posts = state.posts.find_by_charity_id(&charity.id).await?;

    Ok(HttpResponse::Ok().json(FeedResponse {
        posts: posts_response(&posts),
    }))
}
