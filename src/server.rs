//! HTTP listener for the gateway
//!
//! Exposes the two-endpoint A2A surface plus a liveness probe:
//!
//! - `GET /.well-known/agent.json`: the gateway's capability card
//! - `POST /tasks/send`: task submission
//! - `GET /health`: liveness
//!
//! Status mapping: 200 for any envelope-level outcome (including a
//! downstream agent's own business failure), 400 for a malformed envelope,
//! 502 for downstream unreachability (still carrying a `failed` task body).

use crate::gateway::Gateway;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::Filter;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    agent: String,
}

/// Build the warp filter tree for the gateway
pub fn routes(
    gateway: Arc<Gateway>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let discovery_gateway = gateway.clone();
    let discovery_route = warp::path!(".well-known" / "agent.json")
        .and(warp::get())
        .map(move || warp::reply::json(discovery_gateway.agent_card()));

    let send_gateway = gateway.clone();
    let send_route = warp::path!("tasks" / "send")
        .and(warp::post())
        .and(warp::body::bytes())
        .and_then(move |body: bytes::Bytes| {
            let gateway = send_gateway.clone();
            async move {
                let reply = match gateway.handle_task(&body).await {
                    Ok(outcome) => {
                        let status = if outcome.is_unreachable() {
                            StatusCode::BAD_GATEWAY
                        } else {
                            StatusCode::OK
                        };
                        warp::reply::with_status(warp::reply::json(&outcome.into_task()), status)
                    }
                    Err(e) if e.is_protocol_error() => warp::reply::with_status(
                        warp::reply::json(&ErrorResponse {
                            error: e.to_string(),
                        }),
                        StatusCode::BAD_REQUEST,
                    ),
                    Err(e) => {
                        // Unknown agent from a routing decision means the
                        // deployment is misconfigured, not the request.
                        error!(error = %e, "task handling failed");
                        warp::reply::with_status(
                            warp::reply::json(&ErrorResponse {
                                error: e.to_string(),
                            }),
                            StatusCode::INTERNAL_SERVER_ERROR,
                        )
                    }
                };
                Ok::<_, Infallible>(reply)
            }
        });

    let health_gateway = gateway.clone();
    let health_route = warp::path("health").and(warp::get()).map(move || {
        warp::reply::json(&HealthResponse {
            status: "ok",
            agent: health_gateway.agent_card().name.clone(),
        })
    });

    discovery_route.or(send_route).or(health_route)
}

/// Serve the gateway on the given port until the process is stopped
pub async fn run(gateway: Arc<Gateway>, port: u16) {
    info!(port, "starting gateway server");
    warp::serve(routes(gateway)).run(([0, 0, 0, 0], port)).await;
}
