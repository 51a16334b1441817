//! Server-rendered page over a shared [`EnvironmentSynchronizer`].
//!
//! Serving a page never fetches from the API; the poller keeps the mirror
//! current. The two controls run the synchronizer's mutations and always
//! redirect back to the page, whatever the outcome.

use crate::api::EnvironmentApi;
use crate::models::environments::EnvironmentRecord;
use crate::render::render_page;
use crate::synchronizer::EnvironmentSynchronizer;
use axum::{
    Json, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct DashboardState<A> {
    sync: Arc<EnvironmentSynchronizer<A>>,
}

impl<A> Clone for DashboardState<A> {
    fn clone(&self) -> Self {
        Self {
            sync: Arc::clone(&self.sync),
        }
    }
}

pub fn router<A: EnvironmentApi>(sync: Arc<EnvironmentSynchronizer<A>>) -> Router {
    Router::new()
        .route("/", get(index::<A>))
        .route("/status", get(status::<A>))
        .route("/environments", get(list::<A>).post(create::<A>))
        .route("/environments/:id/take-down", post(take_down::<A>))
        .with_state(DashboardState { sync })
}

async fn index<A: EnvironmentApi>(State(state): State<DashboardState<A>>) -> Html<String> {
    Html(render_page(&state.sync.snapshot()))
}

async fn list<A: EnvironmentApi>(
    State(state): State<DashboardState<A>>,
) -> Json<Vec<EnvironmentRecord>> {
    Json(state.sync.snapshot().records())
}

async fn status<A: EnvironmentApi>(State(state): State<DashboardState<A>>) -> Json<Value> {
    Json(json!({
        "service": "env-console",
        "status": "running",
        "environments": state.sync.snapshot().len(),
    }))
}

async fn create<A: EnvironmentApi>(State(state): State<DashboardState<A>>) -> Redirect {
    // outcome is logged by the synchronizer
    let _ = state.sync.create().await;
    Redirect::to("/")
}

async fn take_down<A: EnvironmentApi>(
    State(state): State<DashboardState<A>>,
    Path(id): Path<String>,
) -> Redirect {
    let _ = state.sync.remove(&id).await;
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synchronizer::testing::FakeApi;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use std::sync::atomic::Ordering;

    fn server_with(
        records: Vec<EnvironmentRecord>,
    ) -> (TestServer, Arc<EnvironmentSynchronizer<FakeApi>>) {
        let sync = Arc::new(EnvironmentSynchronizer::new(FakeApi::with_records(records)));
        let server = TestServer::new(router(sync.clone())).unwrap();
        (server, sync)
    }

    fn two_envs() -> Vec<EnvironmentRecord> {
        vec![
            EnvironmentRecord::new("env-1", "http://a"),
            EnvironmentRecord::new("env-2", "http://b"),
        ]
    }

    #[tokio::test]
    async fn test_index_renders_current_mirror_without_fetching() {
        let (server, sync) = server_with(two_envs());
        sync.refresh().await.unwrap();

        let response = server.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let page = response.text();
        assert!(page.contains("data-id=\"env-1\""));
        assert!(page.contains("data-id=\"env-2\""));
        assert!(page.contains("<a href=\"http://a\" target=\"_blank\">env-1</a>"));
        assert_eq!(sync.api().list_call_count(), 1);
    }

    #[tokio::test]
    async fn test_take_down_deletes_refreshes_and_redirects() {
        let (server, sync) = server_with(two_envs());
        sync.refresh().await.unwrap();

        let response = server.post("/environments/env-1/take-down").await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");

        assert_eq!(sync.api().mutations(), vec!["DELETE env-1"]);
        assert_eq!(sync.api().list_call_count(), 2);

        let listed: Vec<EnvironmentRecord> = server.get("/environments").await.json();
        assert_eq!(listed, vec![EnvironmentRecord::new("env-2", "http://b")]);
    }

    #[tokio::test]
    async fn test_create_redirects_even_when_service_fails() {
        let (server, sync) = server_with(vec![]);
        sync.api().fail_mutations.store(true, Ordering::SeqCst);

        let response = server.post("/environments").await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(sync.api().mutations(), vec!["POST"]);
        assert_eq!(sync.api().list_call_count(), 1);
    }

    #[tokio::test]
    async fn test_status_reports_mirror_size() {
        let (server, sync) = server_with(two_envs());
        sync.refresh().await.unwrap();

        let body: Value = server.get("/status").await.json();
        assert_eq!(body["environments"], 2);
        assert_eq!(body["status"], "running");
    }
}
