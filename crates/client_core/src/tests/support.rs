#![allow(dead_code)]

//! Shared fixtures and a fake REST backend for client_core tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Records every request path the fake backend serves.
#[derive(Clone, Default)]
pub struct RequestLog {
    paths: Arc<Mutex<Vec<String>>>,
}

impl RequestLog {
    pub fn record(&self, path: impl Into<String>) {
        self.paths.lock().expect("log lock").push(path.into());
    }

    pub fn count(&self) -> usize {
        self.paths.lock().expect("log lock").len()
    }

    pub fn count_of(&self, path: &str) -> usize {
        self.paths
            .lock()
            .expect("log lock")
            .iter()
            .filter(|recorded| recorded.as_str() == path)
            .count()
    }
}

pub async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

/// An address nothing listens on, for connectivity-failure tests.
pub async fn unreachable_server_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("listener addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn client_details_body() -> Value {
    json!({
        "clientDisplay": {
            "globalCustNum": "000100",
            "displayName": "Mary Jameson",
            "statusName": "Active",
            "branchName": "Kigali branch"
        },
        "mfiJoiningDate": "2010-09-14",
        "externalId": "ext-17"
    })
}

pub fn group_details_body() -> Value {
    json!({
        "groupDisplay": {
            "globalCustNum": "000200",
            "displayName": "Umoja group",
            "statusName": "Active"
        },
        "clientCount": 4
    })
}

pub fn center_details_body() -> Value {
    json!({
        "centerDisplay": {
            "globalCustNum": "000300",
            "displayName": "North center",
            "statusName": "Active"
        },
        "groupCount": 2,
        "establishedDate": "2008-03-02"
    })
}

pub fn charges_body() -> Value {
    json!({
        "amountDue": "12.5",
        "amountPaid": "2.5",
        "charges": [
            { "name": "Membership fee", "amount": "10.0" }
        ]
    })
}

pub fn savings_body(deposit_type: &str) -> Value {
    json!({
        "globalAccountNum": "000100000000012",
        "accountStateName": "Active",
        "depositTypeName": deposit_type,
        "savingsBalance": "150.0",
        "totalAmountDue": "10.0",
        "nextDepositDueDate": "2011-05-20"
    })
}

pub fn loan_body() -> Value {
    json!({
        "globalAccountNum": "000100000000044",
        "accountStateName": "Active in Good Standing",
        "loanAmount": "1200.0",
        "outstandingBalance": "800.0",
        "interestRate": "12.0",
        "nextInstallmentDate": "2011-06-01"
    })
}
