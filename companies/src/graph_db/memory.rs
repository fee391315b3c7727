//! In-process graph with the same read semantics as the Neo4j adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashSet;

use super::{ChunkOrder, GraphStore};
use crate::errors::ToolboxResult;
use crate::models::{Article, ArticleDetail, Organization, PersonRole, Role};

#[derive(Debug, Clone)]
struct StoredArticle {
    id: String,
    title: Option<String>,
    author: Option<String>,
    date: NaiveDate,
    sentiment: Option<f64>,
    site: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredChunk {
    article_id: String,
    sequence: Option<i64>,
    text: String,
}

#[derive(Debug, Clone)]
pub struct InMemoryStore {
    chunk_order: ChunkOrder,
    industries: Vec<String>,
    organizations: Vec<Organization>,
    categories: Vec<(String, String)>,
    subsidiaries: Vec<(String, String)>,
    articles: Vec<StoredArticle>,
    /// Insertion position stands in for the store-internal node id.
    chunks: Vec<StoredChunk>,
    mentions: Vec<(String, String)>,
    people: Vec<(String, String, String)>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            chunk_order: ChunkOrder::NodeId,
            industries: Vec::new(),
            organizations: Vec::new(),
            categories: Vec::new(),
            subsidiaries: Vec::new(),
            articles: Vec::new(),
            chunks: Vec::new(),
            mentions: Vec::new(),
            people: Vec::new(),
        }
    }

    pub fn with_chunk_order(mut self, order: ChunkOrder) -> Self {
        self.chunk_order = order;
        self
    }

    pub fn add_industry(&mut self, name: &str) -> &mut Self {
        self.industries.push(name.to_string());
        self
    }

    pub fn add_organization(&mut self, id: &str, name: &str, summary: &str) -> &mut Self {
        self.organizations.push(Organization {
            id: id.to_string(),
            name: Some(name.to_string()),
            summary: Some(summary.to_string()),
        });
        self
    }

    /// `HAS_CATEGORY` from the organization to the industry.
    pub fn categorize(&mut self, organization_id: &str, industry: &str) -> &mut Self {
        self.categories.push((organization_id.to_string(), industry.to_string()));
        self
    }

    /// `HAS_SUBSIDARY` from parent to child.
    pub fn add_subsidiary(&mut self, parent_id: &str, child_id: &str) -> &mut Self {
        self.subsidiaries.push((parent_id.to_string(), child_id.to_string()));
        self
    }

    pub fn add_article(
        &mut self,
        id: &str,
        title: &str,
        author: &str,
        date: NaiveDate,
        sentiment: f64,
    ) -> &mut Self {
        self.articles.push(StoredArticle {
            id: id.to_string(),
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            date,
            sentiment: Some(sentiment),
            site: None,
            summary: None,
        });
        self
    }

    /// Sets site name and summary on an article added earlier.
    pub fn describe_article(&mut self, id: &str, site: &str, summary: &str) -> &mut Self {
        if let Some(article) = self.articles.iter_mut().find(|a| a.id == id) {
            article.site = Some(site.to_string());
            article.summary = Some(summary.to_string());
        }
        self
    }

    pub fn add_chunk(&mut self, article_id: &str, text: &str) -> &mut Self {
        self.chunks.push(StoredChunk {
            article_id: article_id.to_string(),
            sequence: None,
            text: text.to_string(),
        });
        self
    }

    pub fn add_chunk_at(&mut self, article_id: &str, sequence: i64, text: &str) -> &mut Self {
        self.chunks.push(StoredChunk {
            article_id: article_id.to_string(),
            sequence: Some(sequence),
            text: text.to_string(),
        });
        self
    }

    /// `MENTIONS` from the article to the organization.
    pub fn mention(&mut self, article_id: &str, organization_id: &str) -> &mut Self {
        self.mentions.push((article_id.to_string(), organization_id.to_string()));
        self
    }

    /// Role relationship of the given type between organization and person.
    pub fn add_person(&mut self, organization_id: &str, name: &str, edge_type: &str) -> &mut Self {
        self.people.push((
            organization_id.to_string(),
            name.to_string(),
            edge_type.to_string(),
        ));
        self
    }

    fn is_top_level(&self, organization_id: &str) -> bool {
        !self.subsidiaries.iter().any(|(_, child)| child == organization_id)
    }

    fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    /// Distinct top-level organizations, ordered by name then id.
    fn top_level<'a>(&self, ids: impl Iterator<Item = &'a String>) -> Vec<Organization> {
        let mut seen: HashSet<&String> = HashSet::new();
        let mut orgs: Vec<Organization> = ids
            .filter(|id| seen.insert(*id))
            .filter(|id| self.is_top_level(id))
            .filter_map(|id| self.organization(id).cloned())
            .collect();
        orgs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        orgs
    }

    /// Term-frequency relevance over name and summary; names weigh double.
    fn relevance(org: &Organization, terms: &[String]) -> usize {
        let name = org.name.as_deref().unwrap_or_default().to_lowercase();
        let summary = org.summary.as_deref().unwrap_or_default().to_lowercase();
        terms
            .iter()
            .map(|t| 2 * name.matches(t.as_str()).count() + summary.matches(t.as_str()).count())
            .sum()
    }

    fn to_article(stored: &StoredArticle) -> Article {
        Article {
            id: stored.id.clone(),
            title: stored.title.clone(),
            author: stored.author.clone(),
            date: Some(stored.date.to_string()),
            sentiment: stored.sentiment,
        }
    }
}

#[async_trait]
impl GraphStore for InMemoryStore {
    async fn ping(&self) -> ToolboxResult<()> {
        Ok(())
    }

    async fn industries(&self) -> ToolboxResult<Vec<String>> {
        let mut names = self.industries.clone();
        names.sort();
        Ok(names)
    }

    async fn search_organizations(&self, search: &str, limit: usize) -> ToolboxResult<Vec<Organization>> {
        let terms: Vec<String> = search
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        let mut scored: Vec<(usize, &Organization)> = self
            .organizations
            .iter()
            .filter(|o| self.is_top_level(&o.id))
            .map(|o| (Self::relevance(o, &terms), o))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, o)| o.clone())
            .collect())
    }

    async fn organizations_in_industry(&self, industry: &str) -> ToolboxResult<Vec<Organization>> {
        Ok(self.top_level(
            self.categories
                .iter()
                .filter(|(_, category)| category == industry)
                .map(|(org, _)| org),
        ))
    }

    async fn articles_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        limit: usize,
    ) -> ToolboxResult<Vec<Article>> {
        let mut articles: Vec<&StoredArticle> = self
            .articles
            .iter()
            .filter(|a| start <= a.date && a.date < end)
            .collect();
        articles.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        Ok(articles.into_iter().take(limit).map(Self::to_article).collect())
    }

    async fn article_detail(&self, id: &str) -> ToolboxResult<Option<ArticleDetail>> {
        let Some(stored) = self.articles.iter().find(|a| a.id == id) else {
            return Ok(None);
        };

        let mut chunks: Vec<(usize, &StoredChunk)> = self
            .chunks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.article_id == id)
            .collect();
        if let ChunkOrder::Sequence(_) = self.chunk_order {
            // Stable sort keeps creation order among equal keys; missing keys last.
            chunks.sort_by_key(|(_, c)| (c.sequence.is_none(), c.sequence));
        }

        Ok(Some(ArticleDetail {
            article: Self::to_article(stored),
            site: stored.site.clone(),
            summary: stored.summary.clone(),
            content: chunks.into_iter().map(|(_, c)| c.text.clone()).collect(),
        }))
    }

    async fn organizations_mentioned_in(&self, article_ids: &[String]) -> ToolboxResult<Vec<Organization>> {
        Ok(self.top_level(
            self.mentions
                .iter()
                .filter(|(article, _)| article_ids.contains(article))
                .map(|(_, org)| org),
        ))
    }

    async fn people_at_organization(&self, id: &str) -> ToolboxResult<Vec<PersonRole>> {
        let mut people: Vec<(&String, &String)> = self
            .people
            .iter()
            .filter(|(org, _, _)| org == id)
            .map(|(_, name, edge)| (edge, name))
            .collect();
        people.sort();

        Ok(people
            .into_iter()
            .map(|(edge, name)| PersonRole {
                name: Some(name.clone()),
                role: Role::from_edge_type(edge),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store
            .add_organization("E1", "Neuralink", "Brain implants and neural interfaces")
            .add_organization("E2", "Neuralink Labs", "Implant research subsidiary")
            .add_organization("E3", "Synchron", "Neural implant for paralysis")
            .add_organization("E4", "Acme Foods", "Snacks")
            .add_subsidiary("E1", "E2");
        store
    }

    #[tokio::test]
    async fn test_search_ranks_and_skips_subsidiaries() {
        let found = store().search_organizations("neural implant", 25).await.unwrap();
        let ids: Vec<&str> = found.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E3"]);
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let found = store().search_organizations("implant", 1).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_chunks_follow_sequence_when_configured() {
        let mut store = InMemoryStore::new().with_chunk_order(ChunkOrder::Sequence("seq".into()));
        store
            .add_article("A1", "T", "Au", date("2023-01-02"), 0.1)
            .add_chunk_at("A1", 2, "second")
            .add_chunk("A1", "unsequenced")
            .add_chunk_at("A1", 1, "first");

        let detail = store.article_detail("A1").await.unwrap().unwrap();
        assert_eq!(detail.content, vec!["first", "second", "unsequenced"]);
    }

    #[tokio::test]
    async fn test_chunks_follow_creation_order_by_default() {
        let mut store = InMemoryStore::new();
        store
            .add_article("A1", "T", "Au", date("2023-01-02"), 0.1)
            .add_chunk_at("A1", 2, "created first")
            .add_chunk_at("A1", 1, "created second");

        let detail = store.article_detail("A1").await.unwrap().unwrap();
        assert_eq!(detail.content, vec!["created first", "created second"]);
    }
}
