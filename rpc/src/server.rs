//! Axum-based JSON-RPC server.
//!
//! Accepts `{"id", "method", "params"}` objects as `POST /` and answers with
//! `{"result", "error", "id"}`. Submissions block on the builder, so each call
//! runs on the blocking pool.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use overlay_store::ConsensusState;
use overlay_transactions::{PayloadCodec, TransactionBuilder, WireCodec};
use overlay_wallet_core::Coordinator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, info_span};

use crate::error::RpcError;
use crate::handlers;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Value,
    method: Option<String>,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub result: Value,
    pub error: Option<ErrorObject>,
    pub id: Value,
}

impl Response {
    fn ok(id: Value, result: String) -> Self {
        Self {
            result: Value::String(result),
            error: None,
            id,
        }
    }

    fn err(id: Value, error: &RpcError) -> Self {
        Self {
            result: Value::Null,
            error: Some(ErrorObject {
                code: error.code(),
                message: error.to_string(),
            }),
            id,
        }
    }
}

pub struct RpcServer<S, B, C = WireCodec> {
    pub port: u16,
    coordinator: Arc<Coordinator<S, B, C>>,
}

impl<S, B, C> RpcServer<S, B, C>
where
    S: ConsensusState + Send + Sync + 'static,
    B: TransactionBuilder + Send + Sync + 'static,
    C: PayloadCodec + Send + Sync + 'static,
{
    pub fn new(port: u16, coordinator: Arc<Coordinator<S, B, C>>) -> Self {
        Self { port, coordinator }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator<S, B, C>> {
        &self.coordinator
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle::<S, B, C>))
            .with_state(self.coordinator.clone())
    }

    /// Bind and serve until the listener fails.
    pub async fn start(&self) -> Result<(), RpcError> {
        let addr = format!("0.0.0.0:{}", self.port);
        info!("RPC server listening on {}", addr);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        axum::serve(listener, self.router())
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}

async fn handle<S, B, C>(
    State(coordinator): State<Arc<Coordinator<S, B, C>>>,
    body: String,
) -> Json<Response>
where
    S: ConsensusState + Send + Sync + 'static,
    B: TransactionBuilder + Send + Sync + 'static,
    C: PayloadCodec + Send + Sync + 'static,
{
    let request: Request = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return Json(Response::err(Value::Null, &RpcError::Parse(e.to_string()))),
    };
    let id = request.id;

    let Some(method) = request.method else {
        let error = RpcError::InvalidRequest("missing method".into());
        return Json(Response::err(id, &error));
    };
    let params = match request.params {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        _ => {
            let error = RpcError::InvalidRequest("params must be an array".into());
            return Json(Response::err(id, &error));
        }
    };

    let outcome = tokio::task::spawn_blocking(move || {
        let _span = info_span!("rpc", method = %method).entered();
        let outcome = handlers::dispatch(&coordinator, &method, &params);
        if let Err(e) = &outcome {
            debug!(code = e.code(), error = %e, "rpc call rejected");
        }
        outcome
    })
    .await
    .unwrap_or_else(|e| Err(RpcError::Server(e.to_string())));

    Json(match outcome {
        Ok(result) => Response::ok(id, result),
        Err(e) => Response::err(id, &e),
    })
}
