// rest_api/src/handlers/orders.rs

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

use crate::handlers::parse_object_id;
use crate::{require_admin, AppState, RestApiError};
use models::{NewOrder, Order};

// Handler for POST /api/v1/orders.
//
// The guarded flow: one conditional update decrements stock only when
// enough is on hand, then the order record is written as a second,
// unguarded step. A crash between the two writes leaves the decrement in
// place without an order record; the catalog never oversells.
pub async fn place_order_handler(
    State(state): State<AppState>,
    Json(payload): Json<NewOrder>,
) -> Result<Json<Value>, RestApiError> {
    payload.validate()?;
    let user_id = parse_object_id(&payload.user_id)?;
    let medicine_id = parse_object_id(&payload.medicine_id)?;

    let medicine = state
        .medicines
        .reserve_stock(&medicine_id, payload.quantity)
        .await?;

    // The price snapshot comes from the document the decrement returned.
    let order = Order::place(
        &user_id.to_hex(),
        &medicine_id.to_hex(),
        payload.quantity,
        medicine.price,
    );
    let stored = state.orders.insert_order(&order).await?;

    tracing::info!(
        user = %stored.user_id,
        medicine = %stored.medicine_id,
        quantity = stored.quantity,
        "placed order"
    );
    Ok(Json(json!({ "success": true, "result": stored })))
}

// Handler for GET /api/v1/orders/user/{user_id}
pub async fn list_orders_for_user_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, RestApiError> {
    let orders = state.orders.list_for_user(&user_id).await?;
    Ok(Json(json!({ "success": true, "result": orders })))
}

// Handler for GET /api/v1/orders (admin)
pub async fn list_all_orders_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, RestApiError> {
    require_admin(&state, &headers)?;
    let orders = state.orders.list_all().await?;
    Ok(Json(json!({ "success": true, "result": orders })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use mongodb::bson::oid::ObjectId;
    use models::{Medicine, NewMedicine};

    const ADMIN_TOKEN: &str = "test-admin-token";

    fn test_state() -> AppState {
        AppState::with_memory_engines(ADMIN_TOKEN)
    }

    async fn stock_medicine(state: &AppState, price: f64, stock: i64) -> ObjectId {
        let medicine = Medicine::from_new_medicine(NewMedicine {
            name: "Ibuprofen 200mg".to_string(),
            category: "painkiller".to_string(),
            price,
            stock: Some(stock),
            description: None,
            image: None,
        })
        .unwrap();
        let stored = state.medicines.insert_medicine(&medicine).await.unwrap();
        stored.id.unwrap()
    }

    fn placement(user_id: &ObjectId, medicine_id: &ObjectId, quantity: i64) -> NewOrder {
        NewOrder {
            user_id: user_id.to_hex(),
            medicine_id: medicine_id.to_hex(),
            quantity,
        }
    }

    #[tokio::test]
    async fn should_decrement_stock_and_snapshot_price() {
        let state = test_state();
        let medicine_id = stock_medicine(&state, 2.50, 10).await;
        let user_id = ObjectId::new();

        let response = place_order_handler(
            State(state.clone()),
            Json(placement(&user_id, &medicine_id, 4)),
        )
        .await
        .unwrap();

        assert_eq!(response.0["result"]["quantity"], 4);
        assert_eq!(response.0["result"]["price_per_unit"], 2.50);
        assert_eq!(response.0["result"]["total_price"], 10.0);
        assert_eq!(response.0["result"]["status"], "placed");

        let remaining = state
            .medicines
            .get_medicine(&medicine_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(remaining.stock, 6);
    }

    #[tokio::test]
    async fn should_fail_order_exceeding_stock_and_leave_it_unchanged() {
        let state = test_state();
        let medicine_id = stock_medicine(&state, 2.50, 3).await;

        let err = place_order_handler(
            State(state.clone()),
            Json(placement(&ObjectId::new(), &medicine_id, 5)),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RestApiError::InvalidInput(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let untouched = state
            .medicines
            .get_medicine(&medicine_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.stock, 3);
        assert!(state.orders.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_404_for_missing_medicine() {
        let state = test_state();
        let err = place_order_handler(
            State(state),
            Json(placement(&ObjectId::new(), &ObjectId::new(), 1)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_zero_quantity_order() {
        let state = test_state();
        let medicine_id = stock_medicine(&state, 2.50, 3).await;
        let err = place_order_handler(
            State(state),
            Json(placement(&ObjectId::new(), &medicine_id, 0)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RestApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn should_list_orders_for_one_user_only() {
        let state = test_state();
        let medicine_id = stock_medicine(&state, 2.50, 10).await;
        let buyer = ObjectId::new();
        let other = ObjectId::new();

        place_order_handler(State(state.clone()), Json(placement(&buyer, &medicine_id, 1)))
            .await
            .unwrap();
        place_order_handler(State(state.clone()), Json(placement(&other, &medicine_id, 2)))
            .await
            .unwrap();

        let listed = list_orders_for_user_handler(State(state), Path(buyer.to_hex()))
            .await
            .unwrap();
        let result = listed.0["result"].as_array().unwrap().clone();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["quantity"], 1);
    }

    #[tokio::test]
    async fn should_forbid_full_order_listing_without_admin_header() {
        let state = test_state();
        let err = list_all_orders_handler(State(state), HeaderMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
