//! HTTP surface: `GET /api/fpl-data/{id}` and `GET /health`.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;

use serde::Serialize;
use tracing::{error, info, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::error::{ErrorKind, FplError};
use crate::rate_limiter::RateLimiter;
use crate::service::{SeasonService, ServedSummary};

const UNKNOWN_CLIENT: &str = "unknown";

/// Body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Processing => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Network
        | ErrorKind::ServerError
        | ErrorKind::MalformedResponse
        | ErrorKind::Config => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// The limiter key: first `X-Forwarded-For` hop, else the peer address.
fn client_key(forwarded_for: Option<String>, remote: Option<SocketAddr>) -> String {
    forwarded_for
        .as_deref()
        .and_then(|header| header.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .map(str::to_string)
        .or_else(|| remote.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Build the route tree.
pub fn routes(
    service: SeasonService,
    limiter: RateLimiter,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let service_filter = warp::any().map(move || service.clone());
    let limiter_filter = warp::any().map(move || limiter.clone());
    let client_filter = warp::header::optional::<String>("x-forwarded-for")
        .and(warp::addr::remote())
        .map(client_key);

    let fpl_data = warp::path!("api" / "fpl-data" / String)
        .and(warp::get())
        .and(client_filter)
        .and(service_filter)
        .and(limiter_filter)
        .and_then(get_fpl_data);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })));

    fpl_data
        .or(health)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "OPTIONS"]),
        )
        .with(warp::trace::request())
}

async fn get_fpl_data(
    raw_id: String,
    client: String,
    service: SeasonService,
    limiter: RateLimiter,
) -> Result<warp::reply::Response, Infallible> {
    if !limiter.is_allowed(&client).await {
        let retry_after = limiter.retry_after(&client).await;
        return Ok(error_response(&FplError::RateLimited {
            client,
            retry_after,
        }));
    }

    match service.summary(&raw_id).await {
        Ok(served) => Ok(summary_response(served)),
        Err(err) => Ok(error_response(&err)),
    }
}

fn summary_response(served: ServedSummary) -> warp::reply::Response {
    let reply = warp::reply::json(&served.summary);
    let reply = warp::reply::with_header(reply, "X-Cache", served.cache.to_string());
    let reply = warp::reply::with_header(reply, "X-Data-Source", served.source.to_string());
    let reply = warp::reply::with_header(
        reply,
        "X-Data-Quality-Score",
        served.quality_score.to_string(),
    );
    reply.into_response()
}

fn error_response(err: &FplError) -> warp::reply::Response {
    let kind = err.kind();
    let status = status_for(kind);
    if status.is_server_error() {
        error!(%kind, error = %err, "request failed");
    } else {
        warn!(%kind, error = %err, "request rejected");
    }

    let body = ErrorBody {
        error: err.user_message(),
        kind,
    };
    let reply = warp::reply::with_status(warp::reply::json(&body), status);
    match err {
        FplError::RateLimited { retry_after, .. } => {
            warp::reply::with_header(reply, "Retry-After", retry_after.to_string()).into_response()
        }
        _ => reply.into_response(),
    }
}

/// Bind and serve until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    service: SeasonService,
    limiter: RateLimiter,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), warp::Error> {
    let (bound, server) =
        warp::serve(routes(service, limiter)).try_bind_with_graceful_shutdown(addr, shutdown)?;
    info!(%bound, "listening");
    server.await;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::Value;

    use super::*;
    use crate::test_support::{FakeSeason, FakeUpstream};

    fn api_for(
        upstream: &FakeUpstream,
        limit: u32,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let service = SeasonService::from_config(&upstream.config()).unwrap();
        routes(service, RateLimiter::new(limit, Duration::from_secs(60)))
    }

    fn json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let remote: SocketAddr = "10.1.1.1:5555".parse().unwrap();
        assert_eq!(
            client_key(Some("203.0.113.7, 10.0.0.1".to_string()), Some(remote)),
            "203.0.113.7"
        );
        assert_eq!(client_key(None, Some(remote)), "10.1.1.1");
        assert_eq!(client_key(Some(" ".to_string()), None), UNKNOWN_CLIENT);
    }

    #[tokio::test]
    async fn test_health() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request().path("/health").reply(&api).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json(res.body())["status"], "ok");
    }

    #[tokio::test]
    async fn test_demo_request() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request().path("/api/fpl-data/demo").reply(&api).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["X-Data-Source"], "DEMO");
        let body = json(res.body());
        assert_eq!(body["totalPoints"], 2156);
        assert_eq!(body["managerName"], "Demo Manager");
        assert_eq!(upstream.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request().path("/api/fpl-data/abc").reply(&api).await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json(res.body());
        assert_eq!(body["type"], "validation");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid manager ID"));
        assert_eq!(upstream.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_out_of_range_id_is_rejected() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request()
            .path("/api/fpl-data/999999999")
            .reply(&api)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json(res.body());
        assert!(body["error"].as_str().unwrap().contains("out of range"));
        assert_eq!(upstream.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_unknown_manager_is_not_found() {
        let upstream = FakeSeason {
            missing_entry: true,
            ..Default::default()
        }
        .spawn()
        .await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request().path("/api/fpl-data/777").reply(&api).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = json(res.body());
        assert_eq!(body["type"], "not-found");
        assert!(body["error"].as_str().unwrap().starts_with("Manager not found"));
    }

    #[tokio::test]
    async fn test_failing_transfers_still_serve_a_summary() {
        let upstream = FakeSeason {
            failing_transfers: true,
            ..Default::default()
        }
        .spawn()
        .await;
        let api = api_for(&upstream, 30);

        let res = warp::test::request().path("/api/fpl-data/777").reply(&api).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["X-Data-Source"], "FPL_API");
        let body = json(res.body());
        assert_eq!(body["transferActivity"]["estimated"], true);
        assert_eq!(body["transferActivity"]["bestTransferIn"], Value::Null);
        assert_eq!(body["captaincy"]["estimated"], false);
    }

    #[tokio::test]
    async fn test_repeat_request_is_served_from_cache() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 30);

        let first = warp::test::request().path("/api/fpl-data/777").reply(&api).await;
        let hits = upstream.total_hits();
        let second = warp::test::request().path("/api/fpl-data/777").reply(&api).await;

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers()["X-Cache"], "MISS");
        assert_eq!(second.headers()["X-Cache"], "HIT");
        assert_eq!(second.headers()["X-Data-Source"], "CACHE");
        assert_eq!(
            first.headers()["X-Data-Quality-Score"],
            second.headers()["X-Data-Quality-Score"]
        );
        assert_eq!(first.body(), second.body());
        assert_eq!(upstream.total_hits(), hits);
    }

    #[tokio::test]
    async fn test_rate_limit_sets_retry_after() {
        let upstream = FakeSeason::default().spawn().await;
        let api = api_for(&upstream, 1);

        let request = || {
            warp::test::request()
                .path("/api/fpl-data/demo")
                .header("x-forwarded-for", "198.51.100.4")
        };
        let first = request().reply(&api).await;
        let second = request().reply(&api).await;

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let retry_after: u64 = second.headers()["Retry-After"].to_str().unwrap().parse().unwrap();
        assert!((1..=60).contains(&retry_after));
        assert_eq!(json(second.body())["type"], "rate-limited");

        let other = warp::test::request()
            .path("/api/fpl-data/demo")
            .header("x-forwarded-for", "198.51.100.5")
            .reply(&api)
            .await;
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::Timeout), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(status_for(ErrorKind::Network), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(ErrorKind::Processing), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(ErrorKind::MalformedResponse), StatusCode::SERVICE_UNAVAILABLE);
    }
}
