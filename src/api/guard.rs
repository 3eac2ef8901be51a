use std::sync::Arc;

use poem::{
    http::{Method, StatusCode},
    Endpoint, IntoResponse, Middleware, Request, Response,
};

use crate::errors::AuthError;
use crate::services::TokenService;
use crate::types::internal::auth::{Claims, ROLE_ADMIN};

/// Access requirement attached to a route rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// No token required
    Public,
    /// Any valid bearer token
    Authenticated,
    /// Valid bearer token whose role claim equals the given role
    Role(String),
}

/// A single entry in the guard's rule chain
///
/// Rules pair an optional method list with a path pattern. A pattern ending
/// in `/*` matches any path nested below the prefix; any other pattern must
/// match the request path exactly.
#[derive(Debug, Clone)]
pub struct RouteRule {
    methods: Option<Vec<Method>>,
    pattern: String,
    access: Access,
}

impl RouteRule {
    /// Create a rule that applies to every HTTP method
    pub fn any_method(pattern: &str, access: Access) -> Self {
        Self {
            methods: None,
            pattern: pattern.to_string(),
            access,
        }
    }

    /// Create a rule restricted to the given HTTP methods
    pub fn methods(methods: &[Method], pattern: &str, access: Access) -> Self {
        Self {
            methods: Some(methods.to_vec()),
            pattern: pattern.to_string(),
            access,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        let method_matches = match &self.methods {
            Some(methods) => methods.contains(method),
            None => true,
        };
        method_matches && path_matches(&self.pattern, path)
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/')),
        None => pattern == path,
    }
}

/// Resolve the access requirement for a request
///
/// Rules are evaluated in order and the first match wins. Requests that
/// match no rule require a valid token.
fn resolve(rules: &[RouteRule], method: &Method, path: &str) -> Access {
    rules
        .iter()
        .find(|rule| rule.matches(method, path))
        .map(|rule| rule.access.clone())
        .unwrap_or(Access::Authenticated)
}

/// Middleware enforcing bearer-token authentication and role checks
///
/// The guard sits in front of the whole route tree and decides per request
/// whether a token is needed and which role it must carry, keeping the
/// access policy in one ordered rule chain instead of spread across
/// individual handlers.
pub struct AuthGuard {
    token_service: Arc<TokenService>,
    rules: Arc<Vec<RouteRule>>,
}

impl AuthGuard {
    /// Create a guard with an explicit rule chain
    pub fn new(token_service: Arc<TokenService>, rules: Vec<RouteRule>) -> Self {
        Self {
            token_service,
            rules: Arc::new(rules),
        }
    }

    /// Create the guard configured for the catalog API
    ///
    /// Login, the health probe, product reads and the Swagger UI are public;
    /// product writes require the ADMIN role; everything else needs a valid
    /// token.
    pub fn for_catalog(token_service: Arc<TokenService>) -> Self {
        Self::new(token_service, catalog_rules())
    }
}

fn catalog_rules() -> Vec<RouteRule> {
    vec![
        RouteRule::methods(&[Method::POST], "/api/auth/login", Access::Public),
        RouteRule::methods(&[Method::GET], "/api/health", Access::Public),
        RouteRule::methods(&[Method::GET], "/api/products", Access::Public),
        RouteRule::methods(&[Method::GET], "/api/products/*", Access::Public),
        RouteRule::methods(
            &[Method::POST],
            "/api/products",
            Access::Role(ROLE_ADMIN.to_string()),
        ),
        RouteRule::methods(
            &[Method::PUT, Method::PATCH, Method::DELETE],
            "/api/products/*",
            Access::Role(ROLE_ADMIN.to_string()),
        ),
        RouteRule::any_method("/swagger", Access::Public),
        RouteRule::any_method("/swagger/*", Access::Public),
    ]
}

impl<E: Endpoint> Middleware<E> for AuthGuard {
    type Output = AuthGuardEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        AuthGuardEndpoint {
            inner: ep,
            token_service: self.token_service.clone(),
            rules: self.rules.clone(),
        }
    }
}

/// Endpoint wrapper produced by [`AuthGuard`]
pub struct AuthGuardEndpoint<E> {
    inner: E,
    token_service: Arc<TokenService>,
    rules: Arc<Vec<RouteRule>>,
}

impl<E> AuthGuardEndpoint<E> {
    /// Extract and verify the bearer token from the Authorization header
    fn claims_from(&self, req: &Request) -> Result<Claims, AuthError> {
        let header = req
            .header("Authorization")
            .ok_or_else(AuthError::missing_auth_header)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(AuthError::invalid_auth_header)?;

        self.token_service.verify_token(token.trim())
    }
}

impl<E: Endpoint> Endpoint for AuthGuardEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> poem::Result<Self::Output> {
        let access = resolve(&self.rules, req.method(), req.uri().path());

        if access == Access::Public {
            return self.inner.call(req).await.map(IntoResponse::into_response);
        }

        let claims = match self.claims_from(&req) {
            Ok(claims) => claims,
            Err(error) => return Ok(deny(&req, error)),
        };

        if let Access::Role(required) = &access {
            if claims.role != *required {
                return Ok(deny(&req, AuthError::forbidden(required)));
            }
        }

        self.inner.call(req).await.map(IntoResponse::into_response)
    }
}

/// Turn an auth failure into the same JSON error body the handlers produce
fn deny(req: &Request, error: AuthError) -> Response {
    let body = error.body();

    tracing::warn!(
        method = %req.method(),
        path = %req.uri().path(),
        error = %body.error,
        "Request rejected by auth guard"
    );

    let status =
        StatusCode::from_u16(body.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let payload = serde_json::to_string(body)
        .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, body.error));

    Response::builder()
        .status(status)
        .content_type("application/json")
        .body(payload)
}
