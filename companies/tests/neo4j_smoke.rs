//! Runs against a live companies graph:
//! `NEO4J_URI=neo4j+s://demo.neo4jlabs.com cargo test -p companies-toolbox -- --ignored`

use std::sync::Arc;

use companies_toolbox::graph_db::{GraphStore, Neo4jStore};
use companies_toolbox::services::{QueryFacade, QueryParams, ROW_CAP};
use toolbox_config::AppConfig;

async fn connect() -> QueryFacade {
    let config = AppConfig::from_env().expect("config");
    let store = Neo4jStore::connect(&config.neo4j).await.expect("Neo4j reachable");
    let store: Arc<dyn GraphStore> = Arc::new(store);
    QueryFacade::new(store)
}

#[tokio::test]
#[ignore]
async fn test_live_search_and_people() {
    let facade = connect().await;

    let industries = facade.list_industries().await.unwrap();
    assert!(!industries.is_empty());

    let found = facade
        .search_companies(&QueryParams::new().with("search", "neo4j"))
        .await
        .unwrap();
    assert!(found.len() <= ROW_CAP);

    if let Some(company) = found.output.first() {
        facade
            .people_at_company(&QueryParams::new().with("id", &company.id))
            .await
            .unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn test_live_articles_round_trip() {
    let facade = connect().await;

    let articles = facade
        .articles_in_month(&QueryParams::new().with("date", "2022-01-01"))
        .await
        .unwrap();
    assert!(articles.len() <= ROW_CAP);

    if let Some(article) = articles.output.first() {
        let detail = facade
            .article_detail(&QueryParams::new().with("id", &article.id))
            .await
            .unwrap();
        assert_eq!(detail.len(), 1);

        let ids = articles
            .output
            .iter()
            .map(|a| a.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        facade
            .companies_in_articles(&QueryParams::new().with("ids", &ids))
            .await
            .unwrap();
    }
}
