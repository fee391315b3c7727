//! Cypher text for every read the toolbox issues. All user input travels as
//! query parameters; the only spliced fragment is the chunk ordering key,
//! which is validated as an identifier when configuration is loaded.

use super::ChunkOrder;

pub const PING: &str = "RETURN 1 AS ok";

pub const INDUSTRIES: &str = r#"
MATCH (i:IndustryCategory)
RETURN i.name AS industry
ORDER BY industry
"#;

pub const SEARCH_ORGANIZATIONS: &str = r#"
CALL db.index.fulltext.queryNodes($index, $search)
YIELD node AS c, score
WHERE c:Organization AND NOT EXISTS { (c)<-[:HAS_SUBSIDARY]-() }
WITH c, score
ORDER BY score DESC
LIMIT $limit
RETURN c.id AS id, c.name AS name, c.summary AS summary
"#;

pub const ORGANIZATIONS_IN_INDUSTRY: &str = r#"
MATCH (:IndustryCategory {name: $industry})<-[:HAS_CATEGORY]-(c:Organization)
WHERE NOT EXISTS { (c)<-[:HAS_SUBSIDARY]-() }
RETURN DISTINCT c.id AS id, c.name AS name, c.summary AS summary
ORDER BY name, id
"#;

pub const ARTICLES_BETWEEN: &str = r#"
MATCH (a:Article)
WHERE date($start) <= date(a.date) < date($end)
WITH a
ORDER BY date(a.date), a.id
LIMIT $limit
RETURN a.id AS id, a.author AS author, a.title AS title,
       toString(a.date) AS published, a.sentiment AS sentiment
"#;

pub const ORGANIZATIONS_MENTIONED_IN: &str = r#"
MATCH (a:Article)-[:MENTIONS]->(c:Organization)
WHERE a.id IN $ids AND NOT EXISTS { (c)<-[:HAS_SUBSIDARY]-() }
RETURN DISTINCT c.id AS id, c.name AS name, c.summary AS summary
ORDER BY name, id
"#;

pub const PEOPLE_AT_ORGANIZATION: &str = r#"
MATCH (c:Organization {id: $id})-[role]-(p:Person)
RETURN type(role) AS edge_type, p.name AS name
ORDER BY edge_type, name
"#;

/// Article with its chunk texts collected in chunk order. The optional match
/// keeps articles without chunks, which then carry an empty `content`.
/// Chunks sharing a sequence value, or lacking one, fall back to node id
/// order; chunks without text still take a slot as `""`.
pub fn article_detail(order: &ChunkOrder) -> String {
    let order_key = match order {
        ChunkOrder::Sequence(property) => format!("c.{} ASC, id(c) ASC", property),
        ChunkOrder::NodeId => "id(c) ASC".to_string(),
    };
    format!(
        r#"
MATCH (a:Article {{id: $id}})
OPTIONAL MATCH (a)-[:HAS_CHUNK]->(c:Chunk)
WITH a, c
ORDER BY {order_key}
WITH a, collect(CASE WHEN c IS NULL THEN NULL ELSE coalesce(c.text, '') END) AS content
RETURN a.id AS id, a.author AS author, a.title AS title,
       toString(a.date) AS published, a.sentiment AS sentiment,
       a.siteName AS site, a.summary AS summary, content
LIMIT 1
"#
    )
}
