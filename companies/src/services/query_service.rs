use serde::Serialize;
use std::sync::Arc;

use super::operations::Operation;
use super::params::{month_window, QueryParams};
use crate::errors::{ToolboxError, ToolboxResult};
use crate::graph_db::GraphStore;
use crate::models::{ArticleDetailRecord, ArticleRecord, CompanyRecord, Output, PersonRecord};

/// Row cap on `search_companies` and `articles_in_month`.
pub const ROW_CAP: usize = 25;

/// Maps operations onto graph reads and shapes the rows into response
/// records. Holds no per-request state; clones share the same store.
#[derive(Clone)]
pub struct QueryFacade {
    store: Arc<dyn GraphStore>,
}

impl QueryFacade {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }

    pub async fn list_industries(&self) -> ToolboxResult<Output<String>> {
        let industries = self.store.industries().await?;
        tracing::debug!(rows = industries.len(), "list_industries");
        Ok(Output::new(industries))
    }

    pub async fn search_companies(&self, params: &QueryParams) -> ToolboxResult<Output<CompanyRecord>> {
        let search = params.require("search")?;
        let mut orgs = self.store.search_organizations(search, ROW_CAP).await?;
        orgs.truncate(ROW_CAP);
        tracing::debug!(search, rows = orgs.len(), "search_companies");
        Ok(Output::new(orgs.into_iter().map(CompanyRecord::from).collect()))
    }

    pub async fn companies_in_industry(&self, params: &QueryParams) -> ToolboxResult<Output<CompanyRecord>> {
        let industry = params.require("industry")?;
        let orgs = self.store.organizations_in_industry(industry).await?;
        tracing::debug!(industry, rows = orgs.len(), "companies_in_industry");
        Ok(Output::new(orgs.into_iter().map(CompanyRecord::from).collect()))
    }

    pub async fn articles_in_month(&self, params: &QueryParams) -> ToolboxResult<Output<ArticleRecord>> {
        let (start, end) = month_window("date", params.require("date")?)?;
        let mut articles = self.store.articles_between(start, end, ROW_CAP).await?;
        articles.truncate(ROW_CAP);
        tracing::debug!(%start, %end, rows = articles.len(), "articles_in_month");
        Ok(Output::new(articles.into_iter().map(ArticleRecord::from).collect()))
    }

    pub async fn article_detail(&self, params: &QueryParams) -> ToolboxResult<Output<ArticleDetailRecord>> {
        let id = params.require("id")?;
        let detail = self.store.article_detail(id).await?;
        tracing::debug!(id, found = detail.is_some(), "article_detail");
        Ok(Output::new(detail.into_iter().map(ArticleDetailRecord::from).collect()))
    }

    /// `ids=` with nothing in it is an empty answer, not a missing parameter.
    pub async fn companies_in_articles(&self, params: &QueryParams) -> ToolboxResult<Output<CompanyRecord>> {
        let ids = params.ids("ids")?;
        if ids.is_empty() {
            return Ok(Output::empty());
        }

        let orgs = self.store.organizations_mentioned_in(&ids).await?;
        tracing::debug!(articles = ids.len(), rows = orgs.len(), "companies_in_articles");
        Ok(Output::new(orgs.into_iter().map(CompanyRecord::from).collect()))
    }

    pub async fn people_at_company(&self, params: &QueryParams) -> ToolboxResult<Output<PersonRecord>> {
        let id = params.require("id")?;
        let people = self.store.people_at_organization(id).await?;
        tracing::debug!(id, rows = people.len(), "people_at_company");
        Ok(Output::new(people.into_iter().map(PersonRecord::from).collect()))
    }

    /// Dispatch by operation, returning the serialized envelope.
    pub async fn invoke(&self, operation: Operation, params: &QueryParams) -> ToolboxResult<serde_json::Value> {
        match operation {
            Operation::ListIndustries => to_json(self.list_industries().await?),
            Operation::SearchCompanies => to_json(self.search_companies(params).await?),
            Operation::CompaniesInIndustry => to_json(self.companies_in_industry(params).await?),
            Operation::ArticlesInMonth => to_json(self.articles_in_month(params).await?),
            Operation::ArticleDetail => to_json(self.article_detail(params).await?),
            Operation::CompaniesInArticles => to_json(self.companies_in_articles(params).await?),
            Operation::PeopleAtCompany => to_json(self.people_at_company(params).await?),
        }
    }
}

fn to_json<T: Serialize>(output: Output<T>) -> ToolboxResult<serde_json::Value> {
    serde_json::to_value(output)
        .map_err(|e| ToolboxError::QueryFailure(format!("failed to encode output: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph_db::{ChunkOrder, InMemoryStore};
    use crate::models::Role;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn facade() -> QueryFacade {
        let mut store = InMemoryStore::new().with_chunk_order(ChunkOrder::Sequence("seq".into()));
        store
            .add_industry("Medical Devices")
            .add_industry("Biotechnology")
            .add_organization("E1", "NeuroCorp", "Neurological implants")
            .add_organization("E2", "NeuroCorp Europe", "European arm of NeuroCorp")
            .add_organization("E3", "BrainWave", "Neurological monitoring wearables")
            .add_subsidiary("E1", "E2")
            .categorize("E1", "Medical Devices")
            .categorize("E2", "Medical Devices")
            .categorize("E3", "Medical Devices")
            .add_article("A1", "Implants approved", "Kim", date("2023-01-01"), 0.9)
            .add_article("A2", "Wearables slump", "Lee", date("2023-01-31"), 0.2)
            .add_article("A3", "February news", "Kim", date("2023-02-01"), 0.5)
            .add_article("A4", "December news", "Lee", date("2022-12-31"), 0.5)
            .describe_article("A1", "news.example", "Regulators approve implants")
            .add_chunk_at("A1", 1, "Regulators")
            .add_chunk_at("A1", 2, "approved")
            .add_chunk_at("A1", 3, "implants.")
            .mention("A1", "E1")
            .mention("A1", "E2")
            .mention("A2", "E3")
            .mention("A2", "E1")
            .add_person("E1", "Alice", "HAS_CEO")
            .add_person("E1", "Bob", "HAS_BOARD_MEMBER")
            .add_person("E1", "Carol", "HAS_ADVISOR");
        QueryFacade::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_list_industries() {
        let out = facade().list_industries().await.unwrap();
        assert_eq!(out.output, vec!["Biotechnology", "Medical Devices"]);
    }

    #[tokio::test]
    async fn test_companies_in_industry_excludes_subsidiaries() {
        let params = QueryParams::new().with("industry", "Medical Devices");
        let out = facade().companies_in_industry(&params).await.unwrap();
        let ids: Vec<_> = out.output.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["E3", "E1"]);
    }

    #[tokio::test]
    async fn test_unknown_industry_is_empty_not_error() {
        let params = QueryParams::new().with("industry", "Shipbuilding");
        assert!(facade().companies_in_industry(&params).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_articles_in_month_window() {
        let params = QueryParams::new().with("date", "2023-01-01");
        let out = facade().articles_in_month(&params).await.unwrap();
        let ids: Vec<_> = out.output.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2"]);
        assert_eq!(out.output[0].date.as_deref(), Some("2023-01-01"));
    }

    #[tokio::test]
    async fn test_articles_in_month_rejects_bad_date() {
        let params = QueryParams::new().with("date", "2023/01/01");
        let err = facade().articles_in_month(&params).await.unwrap_err();
        assert!(matches!(err, ToolboxError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_article_detail_content_in_order() {
        let params = QueryParams::new().with("id", "A1");
        let out = facade().article_detail(&params).await.unwrap();
        assert_eq!(out.len(), 1);
        let record = &out.output[0];
        assert_eq!(record.content, vec!["Regulators", "approved", "implants."]);
        assert_eq!(record.site.as_deref(), Some("news.example"));
        assert_eq!(record.article.author.as_deref(), Some("Kim"));
    }

    #[tokio::test]
    async fn test_article_without_chunks_has_empty_content() {
        let params = QueryParams::new().with("id", "A2");
        let out = facade().article_detail(&params).await.unwrap();
        assert_eq!(out.len(), 1);
        assert!(out.output[0].content.is_empty());
    }

    #[tokio::test]
    async fn test_companies_in_articles() {
        let params = QueryParams::new().with("ids", "A1,A2");
        let out = facade().companies_in_articles(&params).await.unwrap();
        let ids: Vec<_> = out.output.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["E3", "E1"]);
    }

    #[tokio::test]
    async fn test_companies_in_articles_empty_list() {
        let params = QueryParams::new().with("ids", "");
        assert!(facade().companies_in_articles(&params).await.unwrap().is_empty());

        let params = QueryParams::new().with("ids", "nope,missing");
        assert!(facade().companies_in_articles(&params).await.unwrap().is_empty());

        let err = facade().companies_in_articles(&QueryParams::new()).await.unwrap_err();
        assert!(matches!(err, ToolboxError::MissingParameter(p) if p == "ids"));
    }

    #[tokio::test]
    async fn test_people_at_company_roles() {
        let params = QueryParams::new().with("id", "E1");
        let out = facade().people_at_company(&params).await.unwrap();
        let people: Vec<_> = out
            .output
            .iter()
            .map(|p| (p.person.as_deref().unwrap(), p.role.clone()))
            .collect();
        assert_eq!(
            people,
            vec![
                ("Carol", Role::Other("ADVISOR".to_string())),
                ("Bob", Role::BoardMember),
                ("Alice", Role::Ceo),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_ids_round_trip_into_people_lookup() {
        let facade = facade();
        let found = facade
            .search_companies(&QueryParams::new().with("search", "neurological"))
            .await
            .unwrap();
        assert!(!found.is_empty());
        assert!(found.output.iter().all(|c| c.id != "E2"));

        let id = found.output.iter().find(|c| c.id == "E1").unwrap().id.clone();
        let people = facade
            .people_at_company(&QueryParams::new().with("id", &id))
            .await
            .unwrap();
        assert_eq!(people.len(), 3);
    }

    #[tokio::test]
    async fn test_invoke_dispatches_by_operation() {
        let value = facade()
            .invoke(Operation::SearchCompanies, &QueryParams::new().with("search", "wearables"))
            .await
            .unwrap();
        assert_eq!(value["output"][0]["Id"], "E3");
        assert_eq!(value["output"][0]["Company"], "BrainWave");
    }
}
