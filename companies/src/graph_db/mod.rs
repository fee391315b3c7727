pub mod memory;
pub mod neo4j_client;
pub mod queries;

pub use memory::InMemoryStore;
pub use neo4j_client::Neo4jStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::ToolboxResult;
use crate::models::{ArticleDetail, Article, Organization, PersonRole};

/// Name of the full-text index covering organization names and summaries.
pub const FULLTEXT_INDEX: &str = "entity";

/// How the chunks of an article are put back in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOrder {
    /// Ascending by an explicit chunk property; chunks missing it sort last.
    Sequence(String),
    /// Ascending by store-internal node id, i.e. creation order.
    NodeId,
}

impl ChunkOrder {
    pub fn from_property(property: Option<&str>) -> Self {
        match property {
            Some(p) => ChunkOrder::Sequence(p.to_string()),
            None => ChunkOrder::NodeId,
        }
    }
}

/// Read-only access to the companies graph.
///
/// Every organization listing returns top-level organizations only, i.e.
/// organizations without an incoming `HAS_SUBSIDARY` relationship.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Round-trip to the store.
    async fn ping(&self) -> ToolboxResult<()>;

    async fn industries(&self) -> ToolboxResult<Vec<String>>;

    /// Full-text search over the `entity` index, best match first.
    async fn search_organizations(&self, search: &str, limit: usize) -> ToolboxResult<Vec<Organization>>;

    async fn organizations_in_industry(&self, industry: &str) -> ToolboxResult<Vec<Organization>>;

    /// Articles dated in `[start, end)`, oldest first.
    async fn articles_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> ToolboxResult<Vec<Article>>;

    async fn article_detail(&self, id: &str) -> ToolboxResult<Option<ArticleDetail>>;

    async fn organizations_mentioned_in(&self, article_ids: &[String]) -> ToolboxResult<Vec<Organization>>;

    async fn people_at_organization(&self, id: &str) -> ToolboxResult<Vec<PersonRole>>;
}
