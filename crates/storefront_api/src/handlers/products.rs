//! `/products` routes.

use crate::error::ApiError;
use crate::handlers::{entity_id, json_payload, MessageBody};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use storefront_core::{EntityKind, Product, ProductId, ProductSchema};

type ProductPath = Result<Path<ProductId>, PathRejection>;

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .run(|store| Ok(store.products.list_products()?))
        .await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: ProductPath,
) -> Result<Json<Product>, ApiError> {
    let id = entity_id(path, EntityKind::Product)?;
    let product = state
        .run(move |store| Ok(store.products.get_product(id)?))
        .await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let payload = json_payload::<ProductSchema>(&headers, &body)?;
    let product = state
        .run(move |store| Ok(store.products.create_product(&payload)?))
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: ProductPath,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Product>, ApiError> {
    let id = entity_id(path, EntityKind::Product)?;
    let payload = json_payload::<ProductSchema>(&headers, &body);
    let product = state
        .run(move |store| {
            store.products.get_product(id)?;
            let payload = payload?;
            Ok(store.products.update_product(id, &payload)?)
        })
        .await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: ProductPath,
) -> Result<Json<MessageBody>, ApiError> {
    let id = entity_id(path, EntityKind::Product)?;
    state
        .run(move |store| Ok(store.products.delete_product(id)?))
        .await?;
    Ok(Json(MessageBody::new(format!(
        "Successfully deleted product {id}"
    ))))
}
