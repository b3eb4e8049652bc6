use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    dto::orders::{CreatedOrder, Kpis, OrderList, OrderRequest, OrderUpdate, UpdatedOrder},
    error::{AppError, AppResult},
    models::{ProxyOrder, truncate_logo},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::validate_order,
};

const UNKNOWN_COSTING: &str = "Unknown";

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let book = state.orders.read().await;
    let count = book.orders.len();
    Ok(ApiResponse::ok(
        "ok",
        OrderList {
            count,
            orders: book.orders.clone(),
        },
        Some(Meta::count(count)),
    ))
}

pub async fn create_order(
    state: &AppState,
    payload: OrderRequest,
) -> AppResult<ApiResponse<CreatedOrder>> {
    let field = |v: &Option<String>| v.clone().unwrap_or_default();
    let required = [
        ("first_name", field(&payload.first_name)),
        ("surname", field(&payload.surname)),
        ("club_school", field(&payload.club_school)),
        ("contact_number", field(&payload.contact_number)),
        ("contact_email", field(&payload.contact_email)),
        ("payment_option", field(&payload.payment_option)),
        ("costing", field(&payload.costing)),
    ];
    let required_refs: Vec<(&str, &str)> = required.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let logo = field(&payload.logo_image);

    validate_order(
        &required_refs,
        &field(&payload.contact_number),
        &field(&payload.contact_email),
        &logo,
    )
    .map_err(AppError::Validation)?;

    let trimmed = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
    let mut book = state.orders.write().await;
    let id = book.next_order_id();
    let order = ProxyOrder {
        id: id.clone(),
        timestamp: Utc::now().timestamp(),
        impression: payload
            .impression
            .as_deref()
            .or(payload.id.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        first_name: trimmed(&payload.first_name),
        surname: trimmed(&payload.surname),
        club_school: trimmed(&payload.club_school),
        contact_number: trimmed(&payload.contact_number),
        contact_email: trimmed(&payload.contact_email),
        payment_option: trimmed(&payload.payment_option),
        costing: trimmed(&payload.costing),
        colour: payload.colour().unwrap_or_default().trim().to_string(),
        additional_notes: trimmed(&payload.additional_notes),
        logo_image_truncated: truncate_logo(&logo),
    };
    book.orders.push(order);

    tracing::info!(order_id = %id, impression = ?payload.impression, "proxy order captured");

    Ok(ApiResponse::success(
        "Order captured in proxy (not forwarded).",
        CreatedOrder {
            id,
            stored_fields: ProxyOrder::FIELD_NAMES.iter().map(|f| f.to_string()).collect(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn get_order(state: &AppState, id: &str) -> AppResult<ApiResponse<ProxyOrder>> {
    let book = state.orders.read().await;
    let order = match book.find(id) {
        Some(o) => o.clone(),
        None => return Err(AppError::OrderNotFound(id.to_string())),
    };
    Ok(ApiResponse::ok("ok", order, Some(Meta::empty())))
}

/// Overwrites every provided field; an explicit `null` clears it. The stored
/// order only changes when the merged record still validates.
pub async fn update_order(
    state: &AppState,
    id: &str,
    payload: OrderUpdate,
) -> AppResult<ApiResponse<UpdatedOrder>> {
    let mut book = state.orders.write().await;
    let stored = match book.find_mut(id) {
        Some(o) => o,
        None => return Err(AppError::OrderNotFound(id.to_string())),
    };

    let mut order = stored.clone();
    let mut changed = BTreeMap::new();

    let text_fields = [
        ("first_name", &payload.first_name, &mut order.first_name),
        ("surname", &payload.surname, &mut order.surname),
        ("club_school", &payload.club_school, &mut order.club_school),
        ("contact_number", &payload.contact_number, &mut order.contact_number),
        ("contact_email", &payload.contact_email, &mut order.contact_email),
        ("payment_option", &payload.payment_option, &mut order.payment_option),
        ("costing", &payload.costing, &mut order.costing),
        ("additional_notes", &payload.additional_notes, &mut order.additional_notes),
    ];
    for (name, incoming, target) in text_fields {
        if let Some(value) = incoming {
            *target = value.as_deref().unwrap_or_default().trim().to_string();
            changed.insert(name.to_string(), target.clone());
        }
    }

    if let Some(colour) = payload.colour() {
        order.colour = colour.trim().to_string();
        changed.insert("colour".to_string(), order.colour.clone());
    }

    let logo = payload.logo_image.as_ref().map(|l| l.as_deref().unwrap_or_default());
    if let Some(logo) = logo {
        order.logo_image_truncated = truncate_logo(logo);
        changed.insert("logo_image_truncated".to_string(), order.logo_image_truncated.clone());
    }

    validate_order(
        &[
            ("first_name", order.first_name.as_str()),
            ("surname", order.surname.as_str()),
            ("club_school", order.club_school.as_str()),
            ("contact_number", order.contact_number.as_str()),
            ("contact_email", order.contact_email.as_str()),
            ("payment_option", order.payment_option.as_str()),
            ("costing", order.costing.as_str()),
        ],
        &order.contact_number,
        &order.contact_email,
        logo.unwrap_or_default(),
    )
    .map_err(AppError::Validation)?;

    *stored = order;
    tracing::info!(order_id = %id, fields = changed.len(), "proxy order updated");

    Ok(ApiResponse::success(
        "Order updated",
        UpdatedOrder {
            id: id.to_string(),
            updated: changed,
        },
        Some(Meta::empty()),
    ))
}

pub async fn kpis(state: &AppState) -> AppResult<ApiResponse<Kpis>> {
    let book = state.orders.read().await;

    // First-seen order decides ties for the most popular costing.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for order in &book.orders {
        let costing = if order.costing.is_empty() {
            UNKNOWN_COSTING
        } else {
            order.costing.as_str()
        };
        match counts.iter_mut().find(|(c, _)| c == costing) {
            Some((_, n)) => *n += 1,
            None => counts.push((costing.to_string(), 1)),
        }
    }

    let mut popular: Option<&(String, usize)> = None;
    for entry in &counts {
        if popular.is_none_or(|best| entry.1 > best.1) {
            popular = Some(entry);
        }
    }

    let data = Kpis {
        total_orders: book.orders.len(),
        distinct_costing_types: counts.len(),
        example_popular_costing: popular.map(|(c, _)| c.clone()),
        costing_breakdown: counts.iter().cloned().collect(),
    };
    Ok(ApiResponse::ok("ok", data, Some(Meta::empty())))
}

pub async fn orders_cached(state: &AppState) -> usize {
    state.orders.read().await.orders.len()
}
