//! Content API handlers.
//!
//! ```text
//! POST /api/courses/{course_id}/contents
//! GET/PATCH/DELETE /api/courses/{course_id}/contents/{content_id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Content;
use crate::domain::ports::{CreateContentRequest, UpdateContentRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedActor;
use crate::inbound::http::state::HttpState;

/// Public representation of a content record.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContentResponse {
    /// Stable content identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Teaching text.
    pub content: String,
    /// Optional video link.
    pub video_url: Option<String>,
    /// Owning course identifier.
    pub course_id: Uuid,
}

impl From<Content> for ContentResponse {
    fn from(value: Content) -> Self {
        Self {
            id: value.id(),
            name: value.name().to_owned(),
            content: value.body().to_owned(),
            video_url: value.video_url().map(str::to_owned),
            course_id: value.course_id(),
        }
    }
}

/// Content creation body; the owning course comes from the route.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateContentBody {
    /// Display name.
    pub name: Option<String>,
    /// Teaching text.
    pub content: Option<String>,
    /// Optional video link.
    pub video_url: Option<String>,
}

/// Partial content update body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateContentBody {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement teaching text.
    pub content: Option<String>,
    /// Replacement video link; explicit `null` clears it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<Option<String>>,
}

/// Create a content under a course. Superuser only.
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/contents",
    request_body = CreateContentBody,
    params(("course_id" = Uuid, Path, description = "Owning course")),
    responses(
        (status = 201, description = "Content created", body = ContentResponse),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course not found"),
    ),
    tags = ["contents"],
    operation_id = "createContent"
)]
#[post("/courses/{course_id}/contents")]
pub async fn create_content(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<Uuid>,
    payload: web::Json<CreateContentBody>,
) -> ApiResult<HttpResponse> {
    let course_id = path.into_inner();
    let body = payload.into_inner();
    let created = state
        .contents_command
        .create(
            actor.0,
            course_id,
            CreateContentRequest {
                name: body.name,
                body: body.content,
                video_url: body.video_url,
            },
        )
        .await?;
    Ok(HttpResponse::Created().json(ContentResponse::from(created)))
}

/// Retrieve a content. Superusers and enrolled students only.
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/contents/{content_id}",
    params(
        ("course_id" = Uuid, Path, description = "Owning course"),
        ("content_id" = Uuid, Path, description = "Content to retrieve"),
    ),
    responses(
        (status = 200, description = "Content", body = ContentResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is neither superuser nor enrolled"),
        (status = 404, description = "Course or content not found, distinct details"),
    ),
    tags = ["contents"],
    operation_id = "retrieveContent"
)]
#[get("/courses/{course_id}/contents/{content_id}")]
pub async fn retrieve_content(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<web::Json<ContentResponse>> {
    let (course_id, content_id) = path.into_inner();
    let content = state
        .contents_query
        .retrieve(actor.0, course_id, content_id)
        .await?;
    Ok(web::Json(ContentResponse::from(content)))
}

/// Apply a partial update to a content. Superuser only.
#[utoipa::path(
    patch,
    path = "/api/courses/{course_id}/contents/{content_id}",
    request_body = UpdateContentBody,
    params(
        ("course_id" = Uuid, Path, description = "Owning course"),
        ("content_id" = Uuid, Path, description = "Content to update"),
    ),
    responses(
        (status = 200, description = "Updated content", body = ContentResponse),
        (status = 400, description = "Per-field validation errors"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course or content not found, distinct details"),
    ),
    tags = ["contents"],
    operation_id = "updateContent"
)]
#[patch("/courses/{course_id}/contents/{content_id}")]
pub async fn update_content(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<UpdateContentBody>,
) -> ApiResult<web::Json<ContentResponse>> {
    let (course_id, content_id) = path.into_inner();
    let body = payload.into_inner();
    let updated = state
        .contents_command
        .update(
            actor.0,
            course_id,
            content_id,
            UpdateContentRequest {
                name: body.name,
                body: body.content,
                video_url: body.video_url,
            },
        )
        .await?;
    Ok(web::Json(ContentResponse::from(updated)))
}

/// Delete a content permanently. Superuser only.
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}/contents/{content_id}",
    params(
        ("course_id" = Uuid, Path, description = "Owning course"),
        ("content_id" = Uuid, Path, description = "Content to delete"),
    ),
    responses(
        (status = 204, description = "Content deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Actor is not a superuser"),
        (status = 404, description = "Course or content not found, distinct details"),
    ),
    tags = ["contents"],
    operation_id = "deleteContent"
)]
#[delete("/courses/{course_id}/contents/{content_id}")]
pub async fn delete_content(
    state: web::Data<HttpState>,
    actor: AuthenticatedActor,
    path: web::Path<(Uuid, Uuid)>,
) -> ApiResult<HttpResponse> {
    let (course_id, content_id) = path.into_inner();
    state
        .contents_command
        .delete(actor.0, course_id, content_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
