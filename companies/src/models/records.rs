//! Response records. Field names here are the wire contract consumed by the
//! agent tooling and must not change.

use serde::Serialize;

use super::{Article, ArticleDetail, Organization, PersonRole, Role};

/// Every operation answers `{ "output": [...] }`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Output<T> {
    pub output: Vec<T>,
}

impl<T> Output<T> {
    pub fn new(output: Vec<T>) -> Self {
        Self { output }
    }

    pub fn empty() -> Self {
        Self { output: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompanyRecord {
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
}

impl From<Organization> for CompanyRecord {
    fn from(org: Organization) -> Self {
        Self {
            company: org.name,
            id: org.id,
            summary: org.summary,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleRecord {
    #[serde(rename = "Article")]
    pub article: Option<String>,
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Sentiment")]
    pub sentiment: Option<f64>,
    #[serde(rename = "Author")]
    pub author: Option<String>,
}

impl From<Article> for ArticleRecord {
    fn from(article: Article) -> Self {
        Self {
            article: article.title,
            id: article.id,
            date: article.date,
            sentiment: article.sentiment,
            author: article.author,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArticleDetailRecord {
    #[serde(flatten)]
    pub article: ArticleRecord,
    #[serde(rename = "Site")]
    pub site: Option<String>,
    #[serde(rename = "Summary")]
    pub summary: Option<String>,
    #[serde(rename = "Content")]
    pub content: Vec<String>,
}

impl From<ArticleDetail> for ArticleDetailRecord {
    fn from(detail: ArticleDetail) -> Self {
        Self {
            article: detail.article.into(),
            site: detail.site,
            summary: detail.summary,
            content: detail.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PersonRecord {
    #[serde(rename = "Person")]
    pub person: Option<String>,
    #[serde(rename = "Role")]
    pub role: Role,
}

impl From<PersonRole> for PersonRecord {
    fn from(p: PersonRole) -> Self {
        Self {
            person: p.name,
            role: p.role,
        }
    }
}
