//! The closed set of operations the toolbox answers, with the metadata an
//! agent needs to discover and call them.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListIndustries,
    SearchCompanies,
    CompaniesInIndustry,
    ArticlesInMonth,
    ArticleDetail,
    CompaniesInArticles,
    PeopleAtCompany,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub parameters: &'static [ParameterSpec],
}

#[derive(Debug, Clone, Serialize)]
pub struct Toolset {
    pub tools: Vec<ToolDescription>,
}

const SEARCH: ParameterSpec = ParameterSpec {
    name: "search",
    kind: "string",
    description: "Full-text search terms matched against company names and summaries",
    required: true,
};

const INDUSTRY: ParameterSpec = ParameterSpec {
    name: "industry",
    kind: "string",
    description: "Exact industry name, as returned by list_industries",
    required: true,
};

const DATE: ParameterSpec = ParameterSpec {
    name: "date",
    kind: "string",
    description: "Start of the one-month window, formatted yyyy-mm-dd",
    required: true,
};

const ARTICLE_ID: ParameterSpec = ParameterSpec {
    name: "id",
    kind: "string",
    description: "Article id",
    required: true,
};

const ARTICLE_IDS: ParameterSpec = ParameterSpec {
    name: "ids",
    kind: "string",
    description: "Comma-separated list of article ids",
    required: true,
};

const COMPANY_ID: ParameterSpec = ParameterSpec {
    name: "id",
    kind: "string",
    description: "Company id, as returned by the company listings",
    required: true,
};

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::ListIndustries,
        Operation::SearchCompanies,
        Operation::CompaniesInIndustry,
        Operation::ArticlesInMonth,
        Operation::ArticleDetail,
        Operation::CompaniesInArticles,
        Operation::PeopleAtCompany,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::ListIndustries => "list_industries",
            Operation::SearchCompanies => "search_companies",
            Operation::CompaniesInIndustry => "companies_in_industry",
            Operation::ArticlesInMonth => "articles_in_month",
            Operation::ArticleDetail => "article_detail",
            Operation::CompaniesInArticles => "companies_in_articles",
            Operation::PeopleAtCompany => "people_at_company",
        }
    }

    /// GET route serving this operation.
    pub fn path(self) -> &'static str {
        match self {
            Operation::ListIndustries => "/industries",
            Operation::SearchCompanies => "/companies",
            Operation::CompaniesInIndustry => "/companies_in_industry",
            Operation::ArticlesInMonth => "/articles_in_month",
            Operation::ArticleDetail => "/article",
            Operation::CompaniesInArticles => "/companies_in_articles",
            Operation::PeopleAtCompany => "/people_at_company",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::ListIndustries => "List of industry names",
            Operation::SearchCompanies => {
                "Companies (id, name, summary) found by full-text search, at most 25"
            }
            Operation::CompaniesInIndustry => {
                "Companies (id, name, summary) in the industry with the given name"
            }
            Operation::ArticlesInMonth => {
                "Articles (id, author, title, date, sentiment) dated within one month from the given date, at most 25"
            }
            Operation::ArticleDetail => {
                "Single article details (id, author, title, date, sentiment, site, summary, content) by article id"
            }
            Operation::CompaniesInArticles => {
                "Companies (id, name, summary) mentioned in the articles with the given ids"
            }
            Operation::PeopleAtCompany => "People (name, role) associated with a company by company id",
        }
    }

    pub fn parameters(self) -> &'static [ParameterSpec] {
        match self {
            Operation::ListIndustries => &[],
            Operation::SearchCompanies => &[SEARCH],
            Operation::CompaniesInIndustry => &[INDUSTRY],
            Operation::ArticlesInMonth => &[DATE],
            Operation::ArticleDetail => &[ARTICLE_ID],
            Operation::CompaniesInArticles => &[ARTICLE_IDS],
            Operation::PeopleAtCompany => &[COMPANY_ID],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    pub fn describe(self) -> ToolDescription {
        ToolDescription {
            name: self.name(),
            description: self.description(),
            path: self.path(),
            parameters: self.parameters(),
        }
    }
}

pub fn toolset() -> Toolset {
    Toolset {
        tools: Operation::ALL.into_iter().map(Operation::describe).collect(),
    }
}
