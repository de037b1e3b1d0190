use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::user_dto::{
        CreateUserPayload, MessageResponse, UpdateUserPayload, UserListQuery, UserListResponse,
    },
    error::{Error, Result},
    models::user::User,
    AppState,
};

#[utoipa::path(
    get,
    path = "/users",
    params(
        ("page" = Option<usize>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<usize>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Page of users", body = Json<UserListResponse>),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
#[axum::debug_handler]
pub async fn list_users(
    State(state): State<AppState>,
    query: std::result::Result<Query<UserListQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.user_service.list(query)?;
    Ok(Json(UserListResponse::from(page)))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = Json<User>),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let user: User = state.user_service.get_by_id(id)?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "User created", body = Json<User>),
        (status = 400, description = "Invalid user data")
    )
)]
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUserPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let user = state.user_service.create(payload)?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "User updated", body = Json<User>),
        (status = 400, description = "Invalid user data"),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn update_user(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
    payload: std::result::Result<Json<UpdateUserPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    // An unknown id wins over a bad body.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) if state.user_service.exists(id) => return Err(Error::from(rejection)),
        Err(_) => return Err(Error::user_not_found()),
    };
    let user = state.user_service.update(id, payload)?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = Json<MessageResponse>),
        (status = 404, description = "User not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<AppState>,
    id: std::result::Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.user_service.delete(id)?;
    Ok(Json(MessageResponse::new("User deleted")))
}
