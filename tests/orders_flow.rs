use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use snugfit_booking::{
    dto::orders::{OrderRequest, OrderUpdate},
    error::AppError,
    routes::create_app,
    services::order_service,
    state::AppState,
};
use tower::ServiceExt;

fn booking(costing: &str) -> OrderRequest {
    OrderRequest {
        impression: Some("IMP1".into()),
        first_name: Some("  Jane ".into()),
        surname: Some("Doe".into()),
        club_school: Some("Tuks Hockey".into()),
        contact_number: Some("+27821234567".into()),
        contact_email: Some("jane@tuks.co.za".into()),
        payment_option: Some("EFT".into()),
        costing: Some(costing.into()),
        colour_selection: Some("Galaxy (+ R180)".into()),
        logo_image: Some(format!("data:image/png;base64,{}", "A".repeat(200))),
        additional_notes: Some("Name on strap".into()),
        ..OrderRequest::default()
    }
}

// Integration flow: capture two orders, read them back, update one, check KPIs.
#[tokio::test]
async fn create_update_and_kpi_flow() -> anyhow::Result<()> {
    let state = AppState::new();

    let first = order_service::create_order(&state, booking("MG Standard")).await?;
    let first = first.data.unwrap();
    assert_eq!(first.id, "PX01");
    assert!(first.stored_fields.iter().any(|f| f == "logo_image_truncated"));

    let second = order_service::create_order(&state, booking("Ortho (T)")).await?;
    assert_eq!(second.data.unwrap().id, "PX02");

    let order = order_service::get_order(&state, "PX01").await?.data.unwrap();
    assert_eq!(order.first_name, "Jane");
    assert_eq!(order.colour, "Galaxy (+ R180)");
    assert_eq!(order.impression.as_deref(), Some("IMP1"));
    assert!(order.logo_image_truncated.ends_with('…'));

    let updated = order_service::update_order(
        &state,
        "PX02",
        OrderUpdate {
            costing: Some(Some(" MG Standard ".into())),
            colour: Some(Some("Red".into())),
            ..OrderUpdate::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.updated["costing"], "MG Standard");
    assert_eq!(updated.updated["colour"], "Red");
    assert_eq!(updated.updated.len(), 2);

    let kpis = order_service::kpis(&state).await?.data.unwrap();
    assert_eq!(kpis.total_orders, 2);
    assert_eq!(kpis.distinct_costing_types, 1);
    assert_eq!(kpis.costing_breakdown["MG Standard"], 2);
    assert_eq!(kpis.example_popular_costing.as_deref(), Some("MG Standard"));

    let list = order_service::list_orders(&state).await?.data.unwrap();
    assert_eq!(list.count, 2);
    Ok(())
}

#[tokio::test]
async fn invalid_update_leaves_order_untouched() -> anyhow::Result<()> {
    let state = AppState::new();
    order_service::create_order(&state, booking("MG Standard")).await?;

    let err = order_service::update_order(
        &state,
        "PX01",
        OrderUpdate {
            surname: Some(Some("Smith".into())),
            contact_number: Some(Some("12345".into())),
            ..OrderUpdate::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(ref errors) if errors.len() == 1));

    let order = order_service::get_order(&state, "PX01").await?.data.unwrap();
    assert_eq!(order.surname, "Doe");
    assert_eq!(order.contact_number, "+27821234567");
    Ok(())
}

#[tokio::test]
async fn null_in_update_clears_the_field() -> anyhow::Result<()> {
    let state = AppState::new();
    order_service::create_order(&state, booking("MG Standard")).await?;

    let update: OrderUpdate = serde_json::from_value(json!({
        "additional_notes": null,
        "logo_image": null,
    }))?;
    assert_eq!(update.additional_notes, Some(None));
    assert_eq!(update.surname, None);

    let updated = order_service::update_order(&state, "PX01", update).await?.data.unwrap();
    assert_eq!(updated.updated["additional_notes"], "");
    assert_eq!(updated.updated["logo_image_truncated"], "");

    let order = order_service::get_order(&state, "PX01").await?.data.unwrap();
    assert_eq!(order.additional_notes, "");
    assert_eq!(order.surname, "Doe");

    // Clearing a required field fails validation and keeps the stored value.
    let update: OrderUpdate = serde_json::from_value(json!({ "surname": null }))?;
    let err = order_service::update_order(&state, "PX01", update).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(ref errors) if errors == &["Missing required field: surname"]));
    Ok(())
}

#[tokio::test]
async fn short_raw_base64_logo_is_captured() -> anyhow::Result<()> {
    let state = AppState::new();
    let request = OrderRequest {
        logo_image: Some("iVBORw0KGgp=".into()),
        ..booking("MG Standard")
    };
    let created = order_service::create_order(&state, request).await?.data.unwrap();
    let order = order_service::get_order(&state, &created.id).await?.data.unwrap();
    assert_eq!(order.logo_image_truncated, "iVBORw0KGgp=");
    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let state = AppState::new();
    let err = order_service::create_order(&state, OrderRequest::default())
        .await
        .unwrap_err();
    match err {
        AppError::Validation(errors) => assert_eq!(errors.len(), 7),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn kpis_on_empty_store() -> anyhow::Result<()> {
    let kpis = order_service::kpis(&AppState::new()).await?.data.unwrap();
    assert_eq!(kpis.total_orders, 0);
    assert_eq!(kpis.example_popular_costing, None);
    Ok(())
}

async fn send(app: axum::Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn router_create_returns_created_and_envelope() -> anyhow::Result<()> {
    let app = create_app(AppState::new(), 1024 * 1024);
    let body = json!({
        "id": "IMP9",
        "impression": "IMP9",
        "first_name": "Sipho",
        "surname": "Dlamini",
        "club_school": "Maties",
        "contact_number": "0731234567",
        "contact_email": "sipho@maties.ac.za",
        "payment_option": "Card",
        "costing": "Retainer",
        "colour": "Clear",
        "logo_image": "",
        "additional_notes": ""
    });
    let (status, json) = send(app.clone(), json_request("POST", "/api/orders", body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["id"], "PX01");

    let (status, json) = send(
        app,
        Request::builder().uri("/api/orders").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    // Router clones share one order store.
    assert_eq!(json["data"]["count"], 1);
    assert_eq!(json["meta"]["count"], 1);
    Ok(())
}

#[tokio::test]
async fn router_rejects_non_json_and_unknown_ids() -> anyhow::Result<()> {
    let app = create_app(AppState::new(), 1024 * 1024);

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("first_name=Jane"))?;
    let (status, _) = send(app.clone(), request).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, json) = send(
        app.clone(),
        Request::builder().uri("/api/orders/PX77").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "Order PX77 not found");

    let (status, _) = send(
        app.clone(),
        json_request("PUT", "/api/orders/PX77", json!({ "costing": "x" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(
        app,
        json_request("POST", "/api/orders", json!({ "first_name": "Jane" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["data"]["errors"].as_array().unwrap().len() >= 6);
    Ok(())
}

#[tokio::test]
async fn router_serves_catalogue_and_fallback() -> anyhow::Result<()> {
    let app = create_app(AppState::new(), 1024 * 1024);

    let (status, json) = send(
        app.clone(),
        Request::builder()
            .uri("/api/products?product_code=Retainer")
            .body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["base_price"], 1600);

    let (status, json) = send(
        app,
        Request::builder().uri("/nope").body(Body::empty())?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["path"], "/nope");
    Ok(())
}
