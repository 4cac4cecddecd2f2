use std::sync::Arc;
use std::time::Instant;

use async_graphql_axum::GraphQL;
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::{
    database::Database,
    http_server::{
        error::{handle_panic, not_found},
        graphql,
        http_routes::{artists, home, shows, venues},
        state::AppState,
    },
};

pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub database: Database,
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = start.elapsed();
    if status.is_server_error() {
        log::error!("{} {} -> {} ({:?})", method, uri, status, elapsed);
    } else {
        log::info!("{} {} -> {} ({:?})", method, uri, status, elapsed);
    }

    response
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let schema = graphql::create_schema(app_state.clone());

    #[cfg(debug_assertions)]
    let cors_layer = CorsLayer::permissive();

    #[cfg(not(debug_assertions))]
    let cors_layer = CorsLayer::new();

    Router::new()
        .route("/", get(home))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route("/venues/create", post(venues::create_venue))
        .route(
            "/venues/{venue_id}",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/{venue_id}/edit",
            get(venues::edit_venue).post(venues::update_venue),
        )
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route("/artists/create", post(artists::create_artist))
        .route(
            "/artists/{artist_id}",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route(
            "/artists/{artist_id}/edit",
            get(artists::edit_artist).post(artists::update_artist),
        )
        .route("/shows", get(shows::list_shows))
        .route("/shows/create", post(shows::create_show))
        .route("/shows/{show_id}", axum::routing::delete(shows::delete_show))
        .route(
            "/graphql",
            get(graphql::graphql).post_service(GraphQL::new(schema)),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(middleware::from_fn(log_requests))
                .layer(cors_layer),
        )
        .with_state(app_state)
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(config.database),
    });
    let app = build_router(app_state);

    let address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| eyre!("Failed to bind to {}", address))?;

    log::info!("Listening on http://{}", address);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Failed to start HTTP server")?;

    log::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::http_server::http_routes::test_support::{body_json, send, test_app};

    #[tokio::test]
    async fn test_home() {
        let app = test_app().await;
        let response = send(&app, Method::GET, "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["name"], "venue-listings");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = test_app().await;
        let response = send(&app, Method::GET, "/nowhere", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_graphiql_page() {
        let app = test_app().await;
        let response = send(&app, Method::GET, "/graphql", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
