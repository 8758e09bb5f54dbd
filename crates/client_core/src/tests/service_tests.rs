use super::*;
use axum::{http::StatusCode, http::Uri, response::IntoResponse, Json, Router};

#[path = "support.rs"]
mod support;
use support::{
    center_details_body, charges_body, client_details_body, group_details_body, loan_body,
    savings_body, spawn_server, unreachable_server_url, RequestLog,
};

fn customer_backend(log: RequestLog) -> Router {
    Router::new().fallback(move |uri: Uri| {
        let log = log.clone();
        async move {
            let path = uri.path().to_string();
            log.record(path.clone());
            match path.as_str() {
                "/client/num-000100.json" => Json(client_details_body()).into_response(),
                "/group/num-000200.json" => Json(group_details_body()).into_response(),
                "/center/num-000300.json" => Json(center_details_body()).into_response(),
                "/client/charges/num-000100.json" => Json(charges_body()).into_response(),
                "/personnel/clients/id-current.json" => Json(serde_json::json!({
                    "customers": [
                        { "globalCustNum": "000100", "displayName": "Mary Jameson", "kind": "client" },
                        { "globalCustNum": "000200", "displayName": "Umoja group", "kind": "group" }
                    ]
                }))
                .into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        }
    })
}

#[tokio::test]
async fn customer_dispatch_routes_each_category_to_its_endpoint_once() {
    let log = RequestLog::default();
    let server_url = spawn_server(customer_backend(log.clone())).await;
    let service = CustomerService::new(server_url);

    let client = CustomerIdentity::new("000100", CustomerKind::Client, "Mary Jameson");
    let group = CustomerIdentity::new("000200", CustomerKind::Group, "Umoja group");
    let center = CustomerIdentity::new("000300", CustomerKind::Center, "North center");

    let details = service.details_for_customer(&client).await.expect("client");
    assert!(matches!(details, CustomerDetails::Client(_)));
    let details = service.details_for_customer(&group).await.expect("group");
    assert!(matches!(details, CustomerDetails::Group(_)));
    let details = service.details_for_customer(&center).await.expect("center");
    assert!(matches!(details, CustomerDetails::Center(_)));

    assert_eq!(log.count_of("/client/num-000100.json"), 1);
    assert_eq!(log.count_of("/group/num-000200.json"), 1);
    assert_eq!(log.count_of("/center/num-000300.json"), 1);
    assert_eq!(log.count(), 3);
}

#[tokio::test]
async fn charges_resolve_only_for_clients() {
    let log = RequestLog::default();
    let server_url = spawn_server(customer_backend(log.clone())).await;
    let service = CustomerService::new(server_url);

    let group = CustomerIdentity::new("000200", CustomerKind::Group, "Umoja group");
    let center = CustomerIdentity::new("000300", CustomerKind::Center, "North center");
    assert!(service
        .charges_for_customer(&group)
        .await
        .expect("group charges")
        .is_none());
    assert!(service
        .charges_for_customer(&center)
        .await
        .expect("center charges")
        .is_none());
    assert_eq!(log.count(), 0);

    let client = CustomerIdentity::new("000100", CustomerKind::Client, "Mary Jameson");
    let charges = service
        .charges_for_customer(&client)
        .await
        .expect("client charges")
        .expect("clients carry charges");
    assert_eq!(charges.amount_due, "12.5");
    assert_eq!(log.count_of("/client/charges/num-000100.json"), 1);
}

#[tokio::test]
async fn loan_officer_portfolio_is_fetched_from_personnel_endpoint() {
    let log = RequestLog::default();
    let server_url = spawn_server(customer_backend(log.clone())).await;
    let service = CustomerService::new(server_url);

    let portfolio = service.loan_officer_customers().await.expect("portfolio");
    assert_eq!(portfolio.customers.len(), 2);
    assert_eq!(portfolio.customers[0].kind, CustomerKind::Client);
    assert_eq!(log.count_of("/personnel/clients/id-current.json"), 1);
}

#[tokio::test]
async fn account_dispatch_routes_by_account_category() {
    let log = RequestLog::default();
    let router = Router::new().fallback({
        let log = log.clone();
        move |uri: Uri| {
            let log = log.clone();
            async move {
                let path = uri.path().to_string();
                log.record(path.clone());
                match path.as_str() {
                    "/account/savings/num-000100000000012.json" => {
                        Json(savings_body("MANDATORY_DEPOSIT")).into_response()
                    }
                    "/account/loan/num-000100000000044.json" => {
                        Json(loan_body()).into_response()
                    }
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }
        }
    });
    let server_url = spawn_server(router).await;
    let service = AccountService::new(server_url);

    let savings = AccountIdentity::new("000100000000012", AccountKind::Savings);
    let details = service.details_for_account(&savings).await.expect("savings");
    assert!(matches!(details, AccountDetails::Savings(_)));

    let loan = AccountIdentity::new("000100000000044", AccountKind::Loan);
    let details = service.details_for_account(&loan).await.expect("loan");
    assert!(matches!(details, AccountDetails::Loan(_)));

    assert_eq!(log.count(), 2);
}

#[tokio::test]
async fn missing_entity_surfaces_as_not_found() {
    let server_url = spawn_server(customer_backend(RequestLog::default())).await;
    let service = CustomerService::new(server_url);

    let err = service
        .client_details(&GlobalCustNum::new("999999"))
        .await
        .expect_err("unknown customer");
    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn server_failure_keeps_its_status_code() {
    let router = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    let server_url = spawn_server(router).await;
    let service = AccountService::new(server_url);

    let err = service
        .savings_details(&GlobalAccountNum::new("000100000000012"))
        .await
        .expect_err("server failure");
    match err {
        FetchError::Server { status, .. } => assert_eq!(status, 500),
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_surfaces_as_decode_failure() {
    let router =
        Router::new().fallback(|| async { Json(serde_json::json!({ "unexpected": true })) });
    let server_url = spawn_server(router).await;
    let service = CustomerService::new(server_url);

    let err = service
        .client_details(&GlobalCustNum::new("000100"))
        .await
        .expect_err("bad payload");
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_surfaces_as_connectivity_failure() {
    let service = CustomerService::new(unreachable_server_url().await);

    let err = service
        .client_details(&GlobalCustNum::new("000100"))
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, FetchError::Connectivity(_)));
    assert!(err.is_transient());
}
