//! Graph entities as the façade reads them back from the store.

use super::Role;

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    /// ISO calendar date as rendered by the store.
    pub date: Option<String>,
    pub sentiment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDetail {
    pub article: Article,
    pub site: Option<String>,
    pub summary: Option<String>,
    /// Chunk texts in chunk order.
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonRole {
    pub name: Option<String>,
    pub role: Role,
}
