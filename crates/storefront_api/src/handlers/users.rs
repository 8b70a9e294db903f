//! `/users` routes.

use crate::error::ApiError;
use crate::handlers::{entity_id, json_payload, MessageBody};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use storefront_core::{EntityKind, User, UserId, UserSchema};

type UserPath = Result<Path<UserId>, PathRejection>;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.run(|store| Ok(store.users.list_users()?)).await?;
    Ok(Json(users))
}

pub async fn get_user(State(state): State<AppState>, path: UserPath) -> Result<Json<User>, ApiError> {
    let id = entity_id(path, EntityKind::User)?;
    let user = state.run(move |store| Ok(store.users.get_user(id)?)).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let payload = json_payload::<UserSchema>(&headers, &body)?;
    let user = state
        .run(move |store| Ok(store.users.create_user(&payload)?))
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Full replace. A missing user is reported before body errors.
pub async fn update_user(
    State(state): State<AppState>,
    path: UserPath,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<User>, ApiError> {
    let id = entity_id(path, EntityKind::User)?;
    let payload = json_payload::<UserSchema>(&headers, &body);
    let user = state
        .run(move |store| {
            store.users.get_user(id)?;
            let payload = payload?;
            Ok(store.users.update_user(id, &payload)?)
        })
        .await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    path: UserPath,
) -> Result<Json<MessageBody>, ApiError> {
    let id = entity_id(path, EntityKind::User)?;
    state
        .run(move |store| Ok(store.users.delete_user(id)?))
        .await?;
    Ok(Json(MessageBody::new(format!(
        "Successfully deleted user {id}"
    ))))
}
