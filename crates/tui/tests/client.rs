use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::{Value, json};

use api_types::expense::ExpenseNew;
use gastos_tui::client::{Client, ClientError};
use gastos_tui::filter::filter_expenses;

/// Binds the router to an ephemeral local port and returns the base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("test backend failed");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn categories_list_decodes_payload() {
    let router = Router::new().route(
        "/api/categorias",
        get(|| async {
            Json(json!([
                {"id": 1, "name": "Alimentação"},
                {"id": 2, "name": "Transporte"}
            ]))
        }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let categories = client.categories_list().await.unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].id, 1);
    assert_eq!(categories[0].name, "Alimentação");
    assert_eq!(categories[1].name, "Transporte");
}

#[tokio::test]
async fn create_expense_posts_the_wire_body() {
    let received: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = received.clone();
    let router = Router::new().route(
        "/api/gastos/registrar",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(body);
                StatusCode::OK
            }
        }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let request = ExpenseNew {
        category_name: "Food".to_string(),
        establishment_name: "Market".to_string(),
        amount: "12.50".to_string(),
    };
    client.expense_create(&request).await.unwrap();

    let body = received.lock().unwrap().take().unwrap();
    assert_eq!(body["categoryName"], "Food");
    assert_eq!(body["establishmentName"], "Market");
    // The amount travels as a numeric-literal string, not a JSON number.
    assert_eq!(body["amount"], "12.50");
}

#[tokio::test]
async fn create_expense_rejection_maps_to_status_error() {
    let router = Router::new().route(
        "/api/gastos/registrar",
        post(|| async { StatusCode::UNPROCESSABLE_ENTITY }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let request = ExpenseNew {
        category_name: "Nope".to_string(),
        establishment_name: "Nowhere".to_string(),
        amount: "not-a-number".to_string(),
    };
    let err = client.expense_create(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 422));
}

#[tokio::test]
async fn expenses_list_keeps_server_order() {
    let router = Router::new().route(
        "/api/gastos",
        get(|| async {
            Json(json!([
                {
                    "_id": "b2",
                    "categoryName": "Transporte",
                    "establishmentName": "Taxi",
                    "amount": 32.9,
                    "createDt": "2024-04-20T09:12:00.000Z"
                },
                {
                    "_id": "a1",
                    "categoryName": "Alimentação",
                    "establishmentName": "Mercado Central",
                    "amount": 12.5,
                    "createDt": "2024-04-19T14:05:22.000Z"
                }
            ]))
        }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let expenses = client.expenses_list().await.unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].id, "b2");
    assert_eq!(expenses[1].id, "a1");
    assert_eq!(expenses[1].establishment_name, "Mercado Central");
    assert_eq!(expenses[1].amount, 12.5);
}

#[tokio::test]
async fn empty_store_lists_and_filters_to_empty() {
    let router = Router::new().route("/api/gastos", get(|| async { Json(json!([])) }));
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let expenses = client.expenses_list().await.unwrap();
    assert!(expenses.is_empty());
    assert!(filter_expenses("mercado", &expenses).is_empty());
    assert!(filter_expenses("", &expenses).is_empty());
}

#[tokio::test]
async fn delete_hits_the_id_scoped_path() {
    let deleted: Arc<Mutex<Option<String>>> = Arc::default();
    let sink = deleted.clone();
    let router = Router::new().route(
        "/api/gastos/eliminar/{id}",
        delete(move |Path(id): Path<String>| {
            let sink = sink.clone();
            async move {
                *sink.lock().unwrap() = Some(id);
                StatusCode::OK
            }
        }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    client.expense_delete("6621f0c2a4e9b01f8c3d2a11").await.unwrap();
    assert_eq!(
        deleted.lock().unwrap().take().as_deref(),
        Some("6621f0c2a4e9b01f8c3d2a11")
    );
}

#[tokio::test]
async fn delete_unknown_id_is_a_status_error() {
    let router = Router::new().route(
        "/api/gastos/eliminar/{id}",
        delete(|Path(_id): Path<String>| async { StatusCode::NOT_FOUND }),
    );
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let err = client.expense_delete("nonexistent-id").await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status.as_u16() == 404));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().route("/api/gastos", get(|| async { "not json" }));
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let err = client.expenses_list().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let client = Client::new("http://127.0.0.1:1").unwrap();
    let err = client.categories_list().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn operations_run_concurrently() {
    let router = Router::new()
        .route(
            "/api/categorias",
            get(|| async { Json(json!([{"id": 1, "name": "Alimentação"}])) }),
        )
        .route("/api/gastos", get(|| async { Json(json!([])) }));
    let base = serve(router).await;
    let client = Client::new(&base).unwrap();

    let (categories, expenses) = tokio::join!(client.categories_list(), client.expenses_list());
    assert_eq!(categories.unwrap().len(), 1);
    assert!(expenses.unwrap().is_empty());
}
