use actix_web::{web, HttpResponse};

use crate::errors::ToolboxResult;
use crate::services::{QueryFacade, QueryParams};

pub async fn industries(facade: web::Data<QueryFacade>) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.list_industries().await?))
}

pub async fn companies(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.search_companies(&params).await?))
}

pub async fn companies_in_industry(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.companies_in_industry(&params).await?))
}

pub async fn articles_in_month(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.articles_in_month(&params).await?))
}

pub async fn article(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.article_detail(&params).await?))
}

pub async fn companies_in_articles(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.companies_in_articles(&params).await?))
}

pub async fn people_at_company(
    facade: web::Data<QueryFacade>,
    params: web::Query<QueryParams>,
) -> ToolboxResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(facade.people_at_company(&params).await?))
}
