//! End-to-end tests through the axum router with scripted backends.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use erp_gateway::backend::{BackendError, BackendKind, BackendRouter, MockRpcClient, RpcCode};
use erp_gateway::gateway::build_router;
use erp_gateway::gateway::services::GatewayEngine;
use erp_gateway::gateway::state::AppState;
use erp_gateway::resources::ResourceRegistry;

fn app(mocks: &[Arc<MockRpcClient>]) -> Router {
    let mut builder = BackendRouter::builder();
    for mock in mocks {
        builder = builder.register(mock.clone());
    }
    let engine = GatewayEngine::new(ResourceRegistry::standard(), builder.build());
    build_router(Arc::new(AppState::new(engine)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_missing_required_field_never_reaches_backend() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));

    let (status, body) = send(
        app(&[finance.clone()]),
        json_request(
            "POST",
            "/api/v1/ChartOfAccounts",
            json!({"account_name": "Cash", "account_type": "asset"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], json!("account_code is required"));
    assert_eq!(body["code"], json!(1001));
    assert_eq!(finance.call_count(), 0);
}

#[tokio::test]
async fn test_create_accepts_camel_case_and_returns_201() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance).with_response(
        "CreateAccount",
        json!({"account": {"id": "acc-1", "code": "1000", "name": "Cash", "type": "asset"}}),
    ));

    let (status, body) = send(
        app(&[finance.clone()]),
        json_request(
            "POST",
            "/api/v1/chart-of-accounts",
            json!({"accountCode": "1000", "accountName": "Cash", "accountType": "asset"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], json!(0));
    assert_eq!(body["data"]["id"], json!("acc-1"));
    assert_eq!(body["data"]["account_code"], json!("1000"));
    assert_eq!(body["data"]["account_name"], json!("Cash"));

    let calls = finance.calls_to("CreateAccount");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload["accountCode"], json!("1000"));
    assert_eq!(calls[0].payload["currency"], json!("USD"));
}

#[tokio::test]
async fn test_vendor_list_probes_data_wrapper() {
    let supply = Arc::new(MockRpcClient::new(BackendKind::SupplyChain).with_response(
        "GetVendors",
        json!({"data": [{"id": "v1", "name": "Acme"}, {"id": "v2", "name": "Globex"}]}),
    ));

    let (status, body) = send(app(&[supply.clone()]), get("/api/v1/Vendor?page=2&page_size=10")).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["items"][0]["id"], json!("v1"));
    assert_eq!(data["items"][1]["name"], json!("Globex"));
    assert_eq!(data["total"], json!(2));
    assert_eq!(data["page"], json!(2));
    assert_eq!(data["page_size"], json!(10));

    let calls = supply.calls_to("GetVendors");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload["page"], json!(2));
    assert_eq!(calls[0].payload["pageSize"], json!(10));
}

#[tokio::test]
async fn test_not_found_surfaces_detail() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance).with_error(
        "GetAccount",
        BackendError::with_code(RpcCode::NOT_FOUND, "account not found")
            .with_details("no account with id acc-404"),
    ));

    let (status, body) = send(app(&[finance]), get("/api/v1/ChartOfAccounts/acc-404")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], json!("account not found"));
    assert_eq!(body["detail"], json!("no account with id acc-404"));
}

#[tokio::test]
async fn test_unclassified_rejection_hides_detail() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance).with_error(
        "GetAccount",
        BackendError::with_code(RpcCode::PERMISSION_DENIED, "denied")
            .with_details("policy engine rule 17"),
    ));

    let (status, body) = send(app(&[finance]), get("/api/v1/ChartOfAccounts/acc-1")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], json!("request rejected by backend service"));
    assert!(body.get("detail").is_none());
}

#[tokio::test]
async fn test_payment_proceeds_when_organization_lookup_fails() {
    let finance = Arc::new(
        MockRpcClient::new(BackendKind::Finance)
            .with_error(
                "GetDefaultOrganization",
                BackendError::with_code(RpcCode::INTERNAL, "organization service down"),
            )
            .with_response("CreateCustomerPayment", json!({"customerPayment": {"id": "pay-1"}})),
    );

    let (status, body) = send(
        app(&[finance.clone()]),
        json_request(
            "POST",
            "/api/v1/CustomerPayment",
            json!({"customer_id": "c-1", "payment_date": "2024-05-01", "amount": "250.00"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], json!("pay-1"));

    let creates = finance.calls_to("CreateCustomerPayment");
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].payload["organizationId"], Value::Null);
    assert_eq!(finance.calls_to("GetDefaultOrganization").len(), 1);
}

#[tokio::test]
async fn test_bearer_token_forwarded_except_reference_data() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));
    let router = app(&[finance.clone()]);

    let with_auth = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer tok-123")
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(router.clone(), with_auth("/api/v1/Invoice/inv-1")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(router, with_auth("/api/v1/Currency/usd")).await;
    assert_eq!(status, StatusCode::OK);

    let calls = finance.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].metadata.auth_token.as_deref(), Some("tok-123"));
    assert_eq!(calls[1].metadata.auth_token, None);
}

#[tokio::test]
async fn test_request_id_echoed_and_generated() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));
    let router = app(&[finance.clone()]);

    let request = Request::builder()
        .uri("/api/v1/Invoice/inv-1")
        .header("x-request-id", "req-abc")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-abc");
    assert_eq!(finance.calls()[0].metadata.correlation_id.as_deref(), Some("req-abc"));

    let response = router.oneshot(get("/api/v1/health")).await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[tokio::test]
async fn test_invalid_id_rejected_before_dispatch() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));

    let (status, body) = send(app(&[finance.clone()]), get("/api/v1/Invoice/bad%20id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(1003));
    assert_eq!(finance.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_resource_is_404() {
    let (status, body) = send(app(&[]), get("/api/v1/Spaceship")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(4001));
}

#[tokio::test]
async fn test_unsupported_operation_is_405() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));

    let (status, body) = send(
        app(&[finance.clone()]),
        json_request("POST", "/api/v1/GeneralLedger", json!({"account_id": "a1"})),
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], json!(4005));
    assert_eq!(finance.call_count(), 0);
}

#[tokio::test]
async fn test_trial_balance_is_list_only() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance).with_response(
        "GetTrialBalance",
        json!({"rows": [{"accountId": "a1", "debit": "10", "credit": "0"}]}),
    ));
    let router = app(&[finance.clone()]);

    let (status, body) = send(router.clone(), get("/api/v1/TrialBalance/a1")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], json!(4005));
    assert_eq!(finance.call_count(), 0);

    let (status, body) = send(router, get("/api/v1/TrialBalance")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["account_id"], json!("a1"));
    assert_eq!(body["data"]["items"][0]["debit"], json!(10.0));
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/Invoice")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"customer_id\": "))
        .unwrap();
    let (status, body) = send(app(&[finance.clone()]), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(1004));
    assert_eq!(finance.call_count(), 0);
}

#[tokio::test]
async fn test_uninitialized_backend_is_503() {
    let (status, body) = send(app(&[]), get("/api/v1/Vendor")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!(5001));
}

#[tokio::test]
async fn test_action_and_delete_routes() {
    let finance = Arc::new(
        MockRpcClient::new(BackendKind::Finance)
            .with_response("PostJournalEntry", json!({"journalEntry": {"id": "je-1", "status": "posted"}}))
            .with_response("DeleteJournalEntry", json!({"success": true})),
    );
    let router = app(&[finance.clone()]);

    let (status, body) = send(
        router.clone(),
        json_request("POST", "/api/v1/JournalEntry/je-1/POST", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("posted"));

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/JournalEntry/je-1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"id": "je-1", "deleted": true}));

    let (status, _) = send(
        router,
        json_request("POST", "/api/v1/JournalEntry/je-1/teleport", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_reports_degraded_backends() {
    let finance = Arc::new(MockRpcClient::new(BackendKind::Finance));

    let (status, body) = send(app(&[finance]), get("/api/v1/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("degraded"));
    let backends = body["data"]["backends"].as_array().unwrap();
    assert_eq!(backends.len(), 3);
    assert_eq!(backends[0], json!({"backend": "finance", "initialized": true}));
    assert_eq!(backends[1], json!({"backend": "crm", "initialized": false}));
}

#[tokio::test]
async fn test_catalog_lists_every_family() {
    let (status, body) = send(app(&[]), get("/api/v1/resources")).await;

    assert_eq!(status, StatusCode::OK);
    let families = body["data"].as_array().unwrap();
    assert_eq!(families.len(), ResourceRegistry::standard().len());
    assert!(families.iter().any(|f| f["family"] == json!("ChartOfAccounts")));
}
