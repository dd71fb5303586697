//! GraphQL over HTTP.

use serde::de::DeserializeOwned;
use serde_json::json;

use quill_shared::dto::{HelloData, PostData, PostDto, PostFilterDto, PostsData, UpdateData};
use quill_shared::{GraphQLRequest, GraphQLResponse};

use crate::editor::Draft;
use crate::error::ClientError;

const POST_FIELDS: &str = "id title body author image";

/// Default endpoint of a locally running API server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

#[derive(Debug, Clone)]
pub struct GraphQLClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphQLClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn hello(&self, name: Option<&str>) -> Result<String, ClientError> {
        let request = GraphQLRequest::new("query Hello($name: String) { hello(name: $name) }")
            .with_variables(json!({ "name": name }));
        let data: HelloData = self.execute(request).await?;
        Ok(data.hello)
    }

    pub async fn posts(&self, filter: PostFilterDto) -> Result<Vec<PostDto>, ClientError> {
        let request = GraphQLRequest::new(format!(
            "query Posts($filter: PostFilter) {{ posts(filter: $filter) {{ {POST_FIELDS} }} }}"
        ))
        .with_variables(json!({ "filter": filter }));
        let data: PostsData = self.execute(request).await?;
        Ok(data.posts)
    }

    pub async fn post(&self, id: &str) -> Result<PostDto, ClientError> {
        let request = GraphQLRequest::new(format!(
            "query Post($id: String!) {{ post(id: $id) {{ {POST_FIELDS} }} }}"
        ))
        .with_variables(json!({ "id": id }));
        let data: PostData = self.execute(request).await?;
        Ok(data.post)
    }

    pub async fn update(&self, draft: &Draft) -> Result<PostDto, ClientError> {
        let request = GraphQLRequest::new(format!(
            "mutation Update($id: String, $title: String!, $body: String!, $image: String) \
             {{ update(id: $id, title: $title, body: $body, image: $image) {{ {POST_FIELDS} }} }}"
        ))
        .with_variables(json!({
            "id": draft.id,
            "title": draft.title,
            "body": draft.body,
            // The draft holds the whole post, so no image means remove it.
            "image": draft.image.as_deref().unwrap_or(""),
        }));
        let data: UpdateData = self.execute(request).await?;
        Ok(data.update)
    }

    async fn execute<T: DeserializeOwned>(&self, request: GraphQLRequest) -> Result<T, ClientError> {
        tracing::debug!(endpoint = %self.endpoint, query = %request.query, "Sending GraphQL request");

        let response: GraphQLResponse<T> = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.errors.is_empty() {
            return Err(ClientError::GraphQL(response.errors));
        }
        response.data.ok_or(ClientError::MissingData)
    }
}
