#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_editor_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-editor".to_string(),
        roles: vec!["editor".to_string()],
    }
}

#[cfg(test)]
async fn inject_editor_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_editor_user());
    next.run(request).await
}

/// Wrap a router so every request carries an authenticated identity
#[cfg(test)]
pub fn with_authenticated_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_editor_middleware))
}
