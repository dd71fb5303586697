//! GraphQL endpoint and explorer.

use actix_web::{HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use tracing::Instrument;

use crate::observability::RequestId;
use crate::state::AppState;

/// POST /graphql
pub async fn execute(
    state: web::Data<AppState>,
    request_id: RequestId,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(state.caller.clone());
    let span = tracing::info_span!(
        "graphql",
        request_id = %request_id.as_str(),
        operation = request.operation_name.as_deref().unwrap_or("anonymous"),
    );

    let response = state.schema.execute(request).instrument(span).await;
    if response.is_err() {
        tracing::debug!(
            request_id = %request_id.as_str(),
            errors = response.errors.len(),
            "GraphQL request finished with errors"
        );
    }
    response.into()
}

/// GET /graphql - the interactive explorer, when enabled.
pub async fn graphiql(state: web::Data<AppState>) -> HttpResponse {
    if !state.graphiql {
        return HttpResponse::NotFound().finish();
    }

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
