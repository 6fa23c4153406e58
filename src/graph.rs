//! Neo4j HTTP adapter for shortest cell paths.
//!
//! Cells are `H3` nodes keyed by `hex_name`, linked by weighted
//! `CAN_PASS {cost}` relationships. Paths come from the Graph Data Science
//! Dijkstra procedure over a named in-memory projection.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GraphError;
use crate::traits::PathSource;

const GRAPH_EXISTS: &str = "CALL gds.graph.exists($graph) YIELD exists RETURN exists";

const PROJECT_GRAPH: &str = "\
CALL gds.graph.project($graph, 'H3', { CAN_PASS: { type: 'CAN_PASS', properties: 'cost' } })
YIELD graphName
RETURN graphName";

const SHORTEST_PATH: &str = "\
MATCH (source:H3 {hex_name: $from}), (target:H3 {hex_name: $to})
CALL gds.shortestPath.dijkstra.stream($graph, {
  nodeLabels: ['H3'],
  relationshipTypes: ['CAN_PASS'],
  relationshipWeightProperty: 'cost',
  sourceNode: source,
  targetNode: target
})
YIELD nodeIds
RETURN [nodeId IN nodeIds | gds.util.asNode(nodeId).hex_name] AS nodeNames";

#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    /// HTTP endpoint, e.g. `http://localhost:7474`.
    pub base_url: String,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Name of the GDS in-memory projection.
    pub graph_name: String,
    pub timeout_secs: u64,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            graph_name: "myGraph".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Neo4jPathSource {
    config: Neo4jConfig,
    client: reqwest::blocking::Client,
}

impl Neo4jPathSource {
    pub fn new(config: Neo4jConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.config.base_url.trim_end_matches('/'),
            self.config.database
        )
    }

    /// Projects the named graph unless it already exists.
    ///
    /// Returns `true` when a new projection was created.
    pub fn ensure_projection(&self) -> Result<bool, GraphError> {
        let params = GraphParams {
            graph: &self.config.graph_name,
        };

        let exists = self
            .run::<_, (bool,)>(GRAPH_EXISTS, &params)?
            .first()
            .is_some_and(|(exists,)| *exists);
        if exists {
            debug!(graph = %self.config.graph_name, "graph projection already exists");
            return Ok(false);
        }

        self.run::<_, (String,)>(PROJECT_GRAPH, &params)?;
        info!(graph = %self.config.graph_name, "projected graph");
        Ok(true)
    }

    /// Runs one parameterized statement in an auto-commit transaction and
    /// decodes each result row as `T`.
    fn run<P, T>(&self, statement: &str, parameters: &P) -> Result<Vec<T>, GraphError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let body = CommitRequest {
            statements: [Statement {
                statement,
                parameters,
            }],
        };

        let response = self
            .client
            .post(self.commit_url())
            .basic_auth(&self.config.user, Some(&self.config.password))
            .json(&body)
            .send()
            .and_then(|resp| resp.error_for_status())?
            .json::<CommitResponse<T>>()?;

        into_rows(response)
    }
}

impl PathSource for Neo4jPathSource {
    type Error = GraphError;

    fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<String>, GraphError> {
        let params = PathParams {
            graph: &self.config.graph_name,
            from,
            to,
        };

        let cells = self
            .run::<_, (Vec<String>,)>(SHORTEST_PATH, &params)?
            .into_iter()
            .next()
            .map(|(cells,)| cells)
            .filter(|cells| !cells.is_empty())
            .ok_or_else(|| GraphError::NoPath {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        debug!(from, to, cells = cells.len(), "shortest path");
        Ok(cells)
    }
}

fn into_rows<T>(response: CommitResponse<T>) -> Result<Vec<T>, GraphError> {
    if let Some(error) = response.errors.into_iter().next() {
        return Err(GraphError::Query {
            code: error.code,
            message: error.message,
        });
    }

    Ok(response
        .results
        .into_iter()
        .flat_map(|result| result.data)
        .map(|record| record.row)
        .collect())
}

#[derive(Debug, Serialize)]
struct CommitRequest<'a, P> {
    statements: [Statement<'a, P>; 1],
}

#[derive(Debug, Serialize)]
struct Statement<'a, P> {
    statement: &'a str,
    parameters: &'a P,
}

#[derive(Debug, Serialize)]
struct GraphParams<'a> {
    graph: &'a str,
}

#[derive(Debug, Serialize)]
struct PathParams<'a> {
    graph: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct CommitResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<QueryResult<T>>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct QueryResult<T> {
    #[serde(default = "Vec::new")]
    data: Vec<Record<T>>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Record<T> {
    row: T,
}

#[derive(Debug, Deserialize)]
struct Neo4jError {
    code: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_url() {
        let source = Neo4jPathSource::new(Neo4jConfig {
            base_url: "http://neo4j:7474/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(source.commit_url(), "http://neo4j:7474/db/neo4j/tx/commit");
    }

    #[test]
    fn test_request_body_uses_parameters() {
        let params = PathParams {
            graph: "myGraph",
            from: "833849fffffffff",
            to: "83318dfffffffff",
        };
        let body = CommitRequest {
            statements: [Statement {
                statement: SHORTEST_PATH,
                parameters: &params,
            }],
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        let statement = &json["statements"][0];
        assert_eq!(statement["parameters"]["from"], "833849fffffffff");
        assert_eq!(statement["parameters"]["graph"], "myGraph");
        assert!(!statement["statement"].as_str().unwrap().contains("833849fffffffff"));
    }

    #[test]
    fn test_decodes_path_rows() {
        let payload = r#"{
            "results": [{
                "columns": ["nodeNames"],
                "data": [{"row": [["a", "b", "c"]], "meta": [null]}]
            }],
            "errors": []
        }"#;
        let response: CommitResponse<(Vec<String>,)> = serde_json::from_str(payload).unwrap();
        let rows = into_rows(response).unwrap();
        assert_eq!(rows, vec![(vec!["a".to_string(), "b".to_string(), "c".to_string()],)]);
    }

    #[test]
    fn test_surfaces_query_errors() {
        let payload = r#"{
            "results": [],
            "errors": [{"code": "Neo.ClientError.Statement.SyntaxError", "message": "bad query"}]
        }"#;
        let response: CommitResponse<(bool,)> = serde_json::from_str(payload).unwrap();
        match into_rows(response) {
            Err(GraphError::Query { code, message }) => {
                assert_eq!(code, "Neo.ClientError.Statement.SyntaxError");
                assert_eq!(message, "bad query");
            }
            other => panic!("expected query error, got {:?}", other),
        }
    }
}
