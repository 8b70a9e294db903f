//! `/orders` routes, including order/product links and nested reads.

use crate::error::ApiError;
use crate::handlers::{entity_id, json_payload, link_ids, MessageBody};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use storefront_core::{EntityKind, Order, OrderId, OrderSchema, Product, ProductId, UserId};

type OrderPath = Result<Path<OrderId>, PathRejection>;
type LinkPath = Result<Path<(OrderId, ProductId)>, PathRejection>;

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.run(|store| Ok(store.orders.list_orders()?)).await?;
    Ok(Json(orders))
}

pub async fn get_order(
    State(state): State<AppState>,
    path: OrderPath,
) -> Result<Json<Order>, ApiError> {
    let order_id = entity_id(path, EntityKind::Order)?;
    let order = state
        .run(move |store| Ok(store.orders.get_order(order_id)?))
        .await?;
    Ok(Json(order))
}

pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let payload = json_payload::<OrderSchema>(&headers, &body)?;
    let order = state
        .run(move |store| Ok(store.orders.create_order(&payload)?))
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<AppState>,
    path: OrderPath,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Order>, ApiError> {
    let order_id = entity_id(path, EntityKind::Order)?;
    let payload = json_payload::<OrderSchema>(&headers, &body);
    let order = state
        .run(move |store| {
            store.orders.get_order(order_id)?;
            let payload = payload?;
            Ok(store.orders.update_order(order_id, &payload)?)
        })
        .await?;
    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    path: OrderPath,
) -> Result<Json<MessageBody>, ApiError> {
    let order_id = entity_id(path, EntityKind::Order)?;
    state
        .run(move |store| Ok(store.orders.delete_order(order_id)?))
        .await?;
    Ok(Json(MessageBody::new(format!(
        "Successfully deleted order {order_id}"
    ))))
}

pub async fn add_product(
    State(state): State<AppState>,
    path: LinkPath,
) -> Result<Json<MessageBody>, ApiError> {
    let (order_id, product_id) = link_ids(path)?;
    let (order, product) = state
        .run(move |store| {
            store
                .orders
                .add_product(order_id, product_id)
                .map_err(ApiError::from_link_error)
        })
        .await?;
    Ok(Json(MessageBody::new(format!(
        "Product {} added to order {}",
        product.product_name, order.id
    ))))
}

pub async fn remove_product(
    State(state): State<AppState>,
    path: LinkPath,
) -> Result<Json<MessageBody>, ApiError> {
    let (order_id, product_id) = link_ids(path)?;
    let (order, product) = state
        .run(move |store| {
            store
                .orders
                .remove_product(order_id, product_id)
                .map_err(ApiError::from_link_error)
        })
        .await?;
    Ok(Json(MessageBody::new(format!(
        "Product {} removed from order {}",
        product.product_name, order.id
    ))))
}

pub async fn user_orders(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let user_id = entity_id(path, EntityKind::User)?;
    let orders = state
        .run(move |store| Ok(store.orders.orders_for_user(user_id)?))
        .await?;
    Ok(Json(orders))
}

pub async fn order_products(
    State(state): State<AppState>,
    path: OrderPath,
) -> Result<Json<Vec<Product>>, ApiError> {
    let order_id = entity_id(path, EntityKind::Order)?;
    let products = state
        .run(move |store| Ok(store.orders.products_for_order(order_id)?))
        .await?;
    Ok(Json(products))
}
