use crate::client::{Client, Error, GraphqlError, Result};
use log::debug;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Variables for a GraphQL request, keyed by the names declared in the query
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Struct to represent a request to a GraphQL server
#[derive(Debug, Serialize)]
struct Query<'a> {
    /// The GraphQL query
    query: &'a str,
    /// The values for the variables. They must match those declared in the provided query.
    variables: &'a Variables,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

/// `GraphqlClient` handles communication with the GitHub's GraphQL API.
///
/// GitHub API docs: https://developer.github.com/v4/
pub struct GraphqlClient<'a> {
    inner: &'a Client,
}

impl<'a> GraphqlClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// Perform a Query against GitHub's GraphQL Endpoint
    pub async fn query<R: DeserializeOwned>(&self, query: &str, variables: &Variables) -> Result<R> {
        debug!("graphql query with variables {:?}", variables);

        let response = self
            .inner
            .post("graphql")
            .json(&Query { query, variables })
            .send()
            .await?;
        let response = self
            .inner
            .process_response::<GraphqlResponse<R>>(response)
            .await?;

        match (response.data, response.errors) {
            (Some(data), None) => Ok(data),
            (_, Some(errors)) => Err(Error::GraphqlError(errors)),
            (None, None) => Err("empty GraphQL response".into()),
        }
    }
}
