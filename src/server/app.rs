use anyhow::{anyhow, Result};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, Method},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{debug, warn};

use super::handlers::health;
use crate::app_context::AppContext;
use crate::auth::Actor;
use crate::services::SessionService;

#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema, RequestActor};
#[cfg(feature = "graphql")]
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionService,
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let app_context = Arc::new(AppContext::new(db.clone()));

    let state = AppState {
        sessions: SessionService::new(db),
        #[cfg(feature = "graphql")]
        graphql_schema: build_schema(GraphQLContext::new(app_context)),
    };

    let allow_origin: AllowOrigin = match cors_origin {
        None | Some("*") => Any.into(),
        Some(origin) => origin
            .parse::<HeaderValue>()
            .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?
            .into(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    let mut app = Router::new().route("/health", get(health::health_check));

    #[cfg(feature = "graphql")]
    {
        app = app.route("/graphql", get(graphql_playground).post(graphql_handler));
    }

    let app = app
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

/// Resolve the `Authorization: Bearer` header to an actor.
///
/// Any failure leaves the request anonymous; operations then report
/// `Unauthenticated` themselves.
pub async fn resolve_actor(sessions: &SessionService, headers: &HeaderMap) -> Option<Actor> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let result = match SessionService::parse_bearer(header) {
        Ok(token) => sessions.actor_for_token(token).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(actor) => Some(actor),
        Err(err) if err.is_anonymous() => {
            debug!(error = %err, "Treating request as anonymous");
            None
        }
        Err(err) => {
            warn!(error = %err, "Failed to resolve session");
            None
        }
    }
}

#[cfg(feature = "graphql")]
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let actor = resolve_actor(&state.sessions, &headers).await;
    debug!(authenticated = actor.is_some(), "GraphQL request received");

    let request = req.into_inner().data(RequestActor(actor));
    state.graphql_schema.execute(request).await.into()
}

#[cfg(feature = "graphql")]
async fn graphql_playground() -> impl IntoResponse {
    Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
