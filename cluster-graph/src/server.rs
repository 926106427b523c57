use async_graphql::{http::GraphiQLSource, PathSegment, ServerError};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use cluster_graph_clients::Credentials;
use cluster_graph_graph::{ClusterGraphSchema, FieldError, ResponseContext};

pub fn router(schema: ClusterGraphSchema) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql))
        .route("/live", get(|| async { "live" }))
        .route("/ready", get(|| async { "ready" }))
        .with_state(schema)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Executes one query with the caller's credentials. Field errors recorded
/// during resolution are merged into the response, so the caller receives
/// whatever data resolved alongside the full error list.
async fn graphql(
    State(schema): State<ClusterGraphSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let creds = credentials_from_headers(&headers);
    let rsp_ctx = ResponseContext::new();

    let req = req.into_inner().data(creds).data(rsp_ctx.clone());
    let mut rsp = schema.execute(req).await;
    merge_field_errors(&mut rsp, rsp_ctx.errors());
    rsp.into()
}

/// The caller's identity, from the bearer token and impersonation headers
/// forwarded with the request.
fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let mut creds = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(Credentials::bearer)
        .unwrap_or_default();

    if let Some(user) = headers
        .get("impersonate-user")
        .and_then(|value| value.to_str().ok())
    {
        creds = creds.impersonate_user(user);
    }
    for group in headers.get_all("impersonate-group") {
        if let Ok(group) = group.to_str() {
            creds = creds.impersonate_group(group);
        }
    }
    creds
}

fn merge_field_errors(rsp: &mut async_graphql::Response, errors: Vec<FieldError>) {
    for FieldError { path, message } in errors {
        let mut error = ServerError::new(message, None);
        error.path = path
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Field(segment.to_string()),
            })
            .collect();
        rsp.errors.push(error);
    }
}
