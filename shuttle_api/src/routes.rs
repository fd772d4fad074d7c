use std::sync::Arc;

use aide::axum::{
    ApiRouter,
    routing::{get, post_with},
};
use shuttle_route_optimization::route_solver::RouteSolver;

use crate::{health::health_handler, optimize::post_handler::post_handler, state::AppState};

pub fn api_routes<S>(state: Arc<AppState<S>>) -> ApiRouter
where
    S: RouteSolver + 'static,
{
    aide::generate::infer_responses(true);

    let router = ApiRouter::new()
        .api_route(
            "/optimize",
            post_with(post_handler::<S>, |op| {
                op.description("Optimizes passenger bookings over the given fleet.")
            }),
        )
        .api_route("/health", get(health_handler))
        .with_state(state);

    aide::generate::infer_responses(false);

    router
}

#[cfg(test)]
mod tests {
    use aide::openapi::OpenApi;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use shuttle_dispatch::{config::DispatchConfig, dispatcher::Dispatcher};
    use shuttle_route_optimization::error::SolverError;
    use tower::ServiceExt;

    use super::*;
    use crate::test_utils::{StaticSolver, one_booking_response};

    fn app(solver: StaticSolver) -> (Router, Arc<AppState<StaticSolver>>) {
        let state = Arc::new(AppState {
            dispatcher: Dispatcher::new(DispatchConfig::default(), solver),
        });
        let router = api_routes(state.clone()).finish_api(&mut OpenApi::default());

        (router, state)
    }

    fn optimize_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn one_booking() -> Value {
        json!({
            "bookings": [{
                "job_id": 42,
                "pax_count": 2,
                "origin": { "latitude": 50.8466, "longitude": 4.3528 },
                "destination": { "latitude": 50.8798, "longitude": 4.7005 }
            }],
            "vehicles": [{
                "vehicle_number": 1,
                "start_location": { "latitude": 50.8466, "longitude": 4.3528 },
                "vehicle_capacity": 7
            }],
            "parameters": { "STOP_TIME_IN_MINUTES": 3, "MAX_ROUTE_TIME_IN_MINUTES": 90 },
            "time_window": {
                "start": "2025-06-10T08:00:00Z",
                "end": "2025-06-11T08:00:00Z"
            }
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (router, _) = app(StaticSolver::responding(one_booking_response()));

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_optimize() {
        let (router, state) = app(StaticSolver::responding(one_booking_response()));

        let response = router
            .oneshot(optimize_request("/optimize", one_booking()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["status"], json!("success"));
        assert_eq!(body["summary"]["total_routes"], json!(1));
        assert_eq!(body["summary"]["routes"][0]["total_passengers"], json!(2));
        assert_eq!(body["summary"]["routes"][0]["vehicle_capacity"], json!(7));
        assert_eq!(body["api_response"]["status"], json!("Ok"));
        assert_eq!(body["api_response"]["responde"][1]["booking_id"], json!(42));
        assert_eq!(body["detailed_visits"][0]["visits"][0]["passengers"], json!(-2));
        assert_eq!(
            body["detailed_visits"][0]["visits"][0]["travel_time_minutes"],
            json!(36)
        );
        assert_eq!(state.dispatcher.solver().calls(), 1);
    }

    #[tokio::test]
    async fn test_optimize_pickups() {
        let (router, _) = app(StaticSolver::responding(one_booking_response()));

        let response = router
            .oneshot(optimize_request("/optimize?visits=pickup", one_booking()))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["detailed_visits"][0]["visits"][0]["passengers"], json!(2));
    }

    #[tokio::test]
    async fn test_missing_bookings() {
        let (router, state) = app(StaticSolver::responding(one_booking_response()));

        let mut request = one_booking();
        request["bookings"] = json!([]);

        let response = router
            .oneshot(optimize_request("/optimize", request))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["status"], json!("error"));
        assert!(
            body["details"]
                .as_str()
                .unwrap()
                .contains("booking required")
        );
        assert_eq!(state.dispatcher.solver().calls(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_job_id() {
        let (router, state) = app(StaticSolver::responding(one_booking_response()));

        let mut request = one_booking();
        request["bookings"][0]["job_id"] = json!("ABC");

        let response = router
            .oneshot(optimize_request("/optimize", request))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.dispatcher.solver().calls(), 0);
    }

    #[tokio::test]
    async fn test_solver_failure() {
        let (router, _) = app(StaticSolver::failing(|| SolverError::Api {
            status: 503,
            message: String::from("The service is currently unavailable."),
            details: Some(String::from("UNAVAILABLE")),
        }));

        let response = router
            .oneshot(optimize_request("/optimize", one_booking()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = json_body(response).await;
        assert_eq!(body["status"], json!("error"));
        assert_eq!(body["details"], json!("UNAVAILABLE"));
    }
}
