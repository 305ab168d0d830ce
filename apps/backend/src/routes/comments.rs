//! Comment routes: post-scoped CRUD for the authenticated user.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::repos::comments::Comment;
use crate::services::comments;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub body: String,
    #[serde(default)]
    pub attachment_file_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub size: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            author_id: value.author_id,
            body: value.body,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// POST /api/comments
///
/// Creates a comment authored by the caller and publishes the count,
/// notification and milestone events for its post.
async fn create_comment(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();
    let author_id = current_user.id;

    let state = app_state.clone();
    let comment = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            comments::create_comment(
                txn,
                state.get_ref(),
                author_id,
                payload.post_id,
                &payload.body,
                payload.attachment_file_ids,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// GET /api/comments/{id}
async fn get_comment(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let comment_id = path.into_inner();

    let comment = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { comments::get_comment(txn, comment_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// GET /api/comments/post/{post_id}?page&size
///
/// One page of the post's comments, oldest first. `page` defaults to 0 and
/// `size` to 10 (clamped to 1..=100).
async fn list_post_comments(
    req: HttpRequest,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let page = query.page;
    let size = query.size;

    let items = with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move { comments::list_comments(txn, post_id, page, size).await })
    })
    .await?;

    let items: Vec<CommentResponse> = items.into_iter().map(CommentResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// PUT /api/comments/{id}
///
/// Replaces the comment body. Only the author may edit.
async fn update_comment(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateCommentRequest>,
) -> Result<HttpResponse, AppError> {
    let comment_id = path.into_inner();
    let payload = body.into_inner();
    let actor_id = current_user.id;

    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            comments::update_comment(txn, actor_id, comment_id, &payload.body).await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/comments/{id}
///
/// Deletes the comment (attachments cascade) and publishes the file-delete,
/// deletion and count events. Only the author may delete.
async fn delete_comment(
    req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let comment_id = path.into_inner();
    let actor_id = current_user.id;

    let state = app_state.clone();
    with_txn(Some(&req), &app_state, move |txn| {
        Box::pin(async move {
            comments::delete_comment(txn, state.get_ref(), actor_id, comment_id).await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(create_comment)));
    cfg.service(web::resource("/post/{post_id}").route(web::get().to(list_post_comments)));
    cfg.service(
        web::resource("/{id}")
            .route(web::get().to(get_comment))
            .route(web::put().to(update_comment))
            .route(web::delete().to(delete_comment)),
    );
}
