use async_trait::async_trait;
use chrono::NaiveDate;
use neo4rs::{query, ConfigBuilder, Graph, Query, Row};
use std::sync::Arc;
use toolbox_config::Neo4jConfig;

use super::{queries, ChunkOrder, GraphStore, FULLTEXT_INDEX};
use crate::errors::{ToolboxError, ToolboxResult};
use crate::models::{Article, ArticleDetail, Organization, PersonRole, Role};

/// Neo4j-backed store. Works with local Neo4j (`bolt://`) and AuraDB
/// (`neo4j+s://`). The underlying `Graph` is a pooled, shareable client.
pub struct Neo4jStore {
    graph: Arc<Graph>,
    uri: String,
    database: String,
    article_detail_cypher: String,
}

impl Neo4jStore {
    pub async fn connect(config: &Neo4jConfig) -> ToolboxResult<Self> {
        tracing::info!(uri = %config.uri, database = %config.database, "Connecting to Neo4j");

        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .db(config.database.as_str())
            .fetch_size(config.fetch_size)
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| ToolboxError::StoreUnavailable(format!("invalid Neo4j config: {}", e)))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| ToolboxError::StoreUnavailable(format!("failed to connect to Neo4j: {}", e)))?;

        let chunk_order = ChunkOrder::from_property(config.chunk_sequence_property.as_deref());
        if chunk_order == ChunkOrder::NodeId {
            tracing::warn!(
                "CHUNK_SEQUENCE_PROPERTY not set; article chunks are ordered by internal node id"
            );
        }

        let store = Self {
            graph: Arc::new(graph),
            uri: config.uri.clone(),
            database: config.database.clone(),
            article_detail_cypher: queries::article_detail(&chunk_order),
        };
        store.ping().await?;

        Ok(store)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Run a read query and decode every row; any failure discards the rows
    /// already read.
    async fn fetch<T, F>(&self, q: Query, decode: F) -> ToolboxResult<Vec<T>>
    where
        F: Fn(&Row) -> ToolboxResult<T> + Send,
        T: Send,
    {
        let mut stream = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(decode(&row)?);
        }
        Ok(rows)
    }
}

fn organization(row: &Row) -> ToolboxResult<Organization> {
    Ok(Organization {
        id: row.get("id")?,
        name: row.get("name")?,
        summary: row.get("summary")?,
    })
}

fn article(row: &Row) -> ToolboxResult<Article> {
    Ok(Article {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        date: row.get("published")?,
        sentiment: row.get("sentiment")?,
    })
}

fn article_detail(row: &Row) -> ToolboxResult<ArticleDetail> {
    Ok(ArticleDetail {
        article: article(row)?,
        site: row.get("site")?,
        summary: row.get("summary")?,
        content: row.get("content")?,
    })
}

fn person_role(row: &Row) -> ToolboxResult<PersonRole> {
    let edge_type: String = row.get("edge_type")?;
    Ok(PersonRole {
        name: row.get("name")?,
        role: Role::from_edge_type(&edge_type),
    })
}

/// Lucene rejects unbalanced query syntax such as `AT&T (`; that is the
/// caller's search term at fault, not the store.
fn search_error(err: ToolboxError) -> ToolboxError {
    match err {
        ToolboxError::QueryFailure(message) if message.contains("ParseException") => {
            ToolboxError::invalid("search", message)
        }
        other => other,
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn ping(&self) -> ToolboxResult<()> {
        let mut stream = self.graph.execute(query(queries::PING)).await?;
        match stream.next().await? {
            Some(_) => Ok(()),
            None => Err(ToolboxError::StoreUnavailable("connection test returned no rows".to_string())),
        }
    }

    async fn industries(&self) -> ToolboxResult<Vec<String>> {
        self.fetch(query(queries::INDUSTRIES), |row| Ok(row.get("industry")?))
            .await
    }

    async fn search_organizations(&self, search: &str, limit: usize) -> ToolboxResult<Vec<Organization>> {
        let q = query(queries::SEARCH_ORGANIZATIONS)
            .param("index", FULLTEXT_INDEX)
            .param("search", search)
            .param("limit", limit as i64);
        self.fetch(q, organization).await.map_err(search_error)
    }

    async fn organizations_in_industry(&self, industry: &str) -> ToolboxResult<Vec<Organization>> {
        let q = query(queries::ORGANIZATIONS_IN_INDUSTRY).param("industry", industry);
        self.fetch(q, organization).await
    }

    async fn articles_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> ToolboxResult<Vec<Article>> {
        let q = query(queries::ARTICLES_BETWEEN)
            .param("start", start.to_string())
            .param("end", end.to_string())
            .param("limit", limit as i64);
        self.fetch(q, article).await
    }

    async fn article_detail(&self, id: &str) -> ToolboxResult<Option<ArticleDetail>> {
        let q = query(&self.article_detail_cypher).param("id", id);
        Ok(self.fetch(q, article_detail).await?.into_iter().next())
    }

    async fn organizations_mentioned_in(&self, article_ids: &[String]) -> ToolboxResult<Vec<Organization>> {
        let q = query(queries::ORGANIZATIONS_MENTIONED_IN).param("ids", article_ids.to_vec());
        self.fetch(q, organization).await
    }

    async fn people_at_organization(&self, id: &str) -> ToolboxResult<Vec<PersonRole>> {
        let q = query(queries::PEOPLE_AT_ORGANIZATION).param("id", id);
        self.fetch(q, person_role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_search_is_invalid_argument() {
        let err = search_error(ToolboxError::QueryFailure(
            "Failed to invoke procedure `db.index.fulltext.queryNodes`: Caused by: \
             org.apache.lucene.queryparser.classic.ParseException: Cannot parse 'AT&T ('"
                .to_string(),
        ));
        assert!(matches!(err, ToolboxError::InvalidArgument { ref name, .. } if name == "search"));
    }

    #[test]
    fn test_other_search_failures_pass_through() {
        let err = search_error(ToolboxError::QueryFailure(
            "There is no such fulltext schema index: entity".to_string(),
        ));
        assert!(matches!(err, ToolboxError::QueryFailure(_)));

        let err = search_error(ToolboxError::StoreUnavailable("connection reset".to_string()));
        assert!(matches!(err, ToolboxError::StoreUnavailable(_)));
    }
}
