use std::sync::Arc;

use crate::app_context::AppContext;
use crate::auth::Actor;
use crate::services::SessionService;

#[derive(Clone)]
pub struct GraphQLContext {
    pub app: Arc<AppContext>,
    pub sessions: SessionService,
}

impl GraphQLContext {
    pub fn new(app: Arc<AppContext>) -> Self {
        let sessions = SessionService::new(app.db().clone());
        Self { app, sessions }
    }
}

/// The caller resolved at the HTTP edge, attached to each request.
#[derive(Clone, Debug, Default)]
pub struct RequestActor(pub Option<Actor>);

/// Actor for the current request, `None` when anonymous.
pub fn request_actor<'a>(ctx: &async_graphql::Context<'a>) -> Option<&'a Actor> {
    ctx.data_opt::<RequestActor>()
        .and_then(|request| request.0.as_ref())
}
