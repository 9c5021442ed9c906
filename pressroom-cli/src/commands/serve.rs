//! JSON API over the article repository.

use crate::envelope::{envelope, ArticlePayload};
use anyhow::{Context, Result};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use pressroom_core::{ArticleRepository, LoadReport, LoadStatus, RepositoryError};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    repo: ArticleRepository,
    recent_count: usize,
}

/// Serve the repository on localhost until interrupted
pub async fn serve(repo: ArticleRepository, recent_count: usize, port: u16) -> Result<()> {
    let app = router(AppState { repo, recent_count });

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving articles on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/articles", get(api_articles))
        .route("/api/articles/{slug}", get(api_article))
        .route("/api/tags/{tag}", get(api_tag))
        .route("/api/recent", get(api_recent))
        .route("/api/status", get(api_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---- API handlers ----

#[derive(Deserialize)]
struct ArticlesParams {
    full: Option<bool>,
}

#[derive(Deserialize)]
struct RecentParams {
    count: Option<usize>,
}

#[derive(Serialize)]
struct StatusData {
    status: &'static str,
    report: Option<LoadReport>,
}

async fn api_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticlesParams>,
) -> Response {
    if params.full.unwrap_or(false) {
        match state.repo.all_articles().await {
            Ok(articles) => Json(envelope("article.all", articles)).into_response(),
            Err(e) => unavailable(e),
        }
    } else {
        match state.repo.all_metadata().await {
            Ok(metadata) => Json(envelope("article.list", metadata)).into_response(),
            Err(e) => unavailable(e),
        }
    }
}

async fn api_article(AxumPath(slug): AxumPath<String>, State(state): State<AppState>) -> Response {
    match state.repo.article_by_slug(&slug).await {
        Ok(Some(article)) => {
            Json(envelope("article.full", ArticlePayload::from(article))).into_response()
        }
        Ok(None) => (StatusCode::NOT_FOUND, "Article not found").into_response(),
        Err(e) => unavailable(e),
    }
}

async fn api_tag(AxumPath(tag): AxumPath<String>, State(state): State<AppState>) -> Response {
    match state.repo.articles_by_tag(&tag).await {
        Ok(metadata) => Json(envelope("article.list", metadata)).into_response(),
        Err(e) => unavailable(e),
    }
}

async fn api_recent(State(state): State<AppState>, Query(params): Query<RecentParams>) -> Response {
    let count = params.count.unwrap_or(state.recent_count);
    match state.repo.recent_articles(count).await {
        Ok(metadata) => Json(envelope("article.recent", metadata)).into_response(),
        Err(e) => unavailable(e),
    }
}

async fn api_status(State(state): State<AppState>) -> Response {
    if state.repo.status() == LoadStatus::Loading {
        let data = StatusData {
            status: "loading",
            report: None,
        };
        return Json(envelope("load.status", data)).into_response();
    }

    match state.repo.load_report().await {
        Ok(report) => {
            let data = StatusData {
                status: "ready",
                report: Some(report),
            };
            Json(envelope("load.status", data)).into_response()
        }
        Err(e) => unavailable(e),
    }
}

// ---- helpers ----

fn unavailable(err: RepositoryError) -> Response {
    tracing::error!("Article repository unavailable: {}", err);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        format!("Error loading content: {}", err),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use pressroom_core::{ContentSource, DiscoveryError, MemorySource, SourceDocument};

    fn doc(title: &str, date: &str, tags: &str) -> String {
        format!(
            "---\ntitle: {}\ndescription: About {}\ndate: {}\ntags: [{}]\n---\n# {}\n\nBody.\n",
            title, title, date, tags, title
        )
    }

    fn sample_state() -> AppState {
        let source = MemorySource::new()
            .with_document("articles/older.md", doc("Older", "2023-05-01", "security"))
            .with_document("articles/newer.md", doc("Newer", "2024-05-01", "ai, news"))
            .with_document("articles/broken.md", "no frontmatter");
        AppState {
            repo: ArticleRepository::new(source),
            recent_count: 1,
        }
    }

    struct FailingSource;

    impl ContentSource for FailingSource {
        fn describe(&self) -> String {
            "failing".into()
        }

        fn discover(&self) -> Result<Vec<SourceDocument>, DiscoveryError> {
            Err(DiscoveryError::Unavailable("bucket gone".into()))
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn api_articles_returns_sorted_metadata() {
        let response = api_articles(
            State(sample_state()),
            Query(ArticlesParams { full: None }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["schema_version"], "pressroom-v1");
        assert_eq!(value["kind"], "article.list");
        let data = value["data"].as_array().expect("data array");
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["slug"], "newer");
        assert!(data[0].get("content").is_none());
    }

    #[tokio::test]
    async fn api_articles_full_includes_content() {
        let response = api_articles(
            State(sample_state()),
            Query(ArticlesParams { full: Some(true) }),
        )
        .await;
        let value = body_json(response).await;
        assert_eq!(value["kind"], "article.all");
        assert_eq!(value["data"][0]["content"], "# Newer\n\nBody.");
    }

    #[tokio::test]
    async fn api_article_renders_html() {
        let response = api_article(AxumPath("older".into()), State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["data"]["title"], "Older");
        assert_eq!(value["data"]["date"], "2023-05-01");
        assert!(value["data"]["content_html"]
            .as_str()
            .unwrap()
            .contains("<h1>Older</h1>"));
    }

    #[tokio::test]
    async fn api_article_not_found() {
        let response = api_article(AxumPath("broken".into()), State(sample_state())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_tag_filters_exactly() {
        let response = api_tag(AxumPath("ai".into()), State(sample_state())).await;
        let value = body_json(response).await;
        let data = value["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["slug"], "newer");

        let response = api_tag(AxumPath("AI".into()), State(sample_state())).await;
        let value = body_json(response).await;
        assert!(value["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_recent_uses_configured_default() {
        let response =
            api_recent(State(sample_state()), Query(RecentParams { count: None })).await;
        let value = body_json(response).await;
        assert_eq!(value["data"].as_array().unwrap().len(), 1);

        let response =
            api_recent(State(sample_state()), Query(RecentParams { count: Some(10) })).await;
        let value = body_json(response).await;
        assert_eq!(value["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn api_status_reports_skipped() {
        let state = sample_state();
        state.repo.store().await.unwrap();

        let response = api_status(State(state)).await;
        let value = body_json(response).await;
        assert_eq!(value["data"]["status"], "ready");
        assert_eq!(value["data"]["report"]["discovered"], 3);
        assert_eq!(value["data"]["report"]["skipped"][0]["source"], "articles/broken.md");
    }

    #[tokio::test]
    async fn discovery_failure_is_service_unavailable() {
        let state = AppState {
            repo: ArticleRepository::new(FailingSource),
            recent_count: 3,
        };
        let response =
            api_articles(State(state.clone()), Query(ArticlesParams { full: None })).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("bucket gone"));

        let response = api_status(State(state)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            path, addr
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn router_serves_slug_route() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(sample_state());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let response = http_get(addr, "/api/articles/older").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
        assert!(response.contains("\"slug\":\"older\""));
        assert!(response.contains("\"kind\":\"article.full\""));

        let response = http_get(addr, "/api/articles/missing").await;
        assert!(response.starts_with("HTTP/1.1 404"), "{}", response);

        let response = http_get(addr, "/api/tags/ai").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);
        assert!(response.contains("\"slug\":\"newer\""));
    }
}
