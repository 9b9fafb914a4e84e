//! Encode [`ContentQuery`] values as Payload's bracketed query string.
//!
//! Payload parses `where[field][operator]=value` with nested `and`/`or`
//! arrays (`where[and][0][slug][equals]=x`). Pairs are returned unescaped;
//! reqwest percent-encodes them.

use serde_json::Value;

use crate::domain::ports::{ContentQuery, Where};

pub(super) fn query_pairs(query: &ContentQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    if let Some(clause) = &query.where_clause {
        push_where(&mut pairs, "where".to_owned(), clause);
    }
    if let Some(limit) = query.limit {
        pairs.push(("limit".to_owned(), limit.to_string()));
    }
    if let Some(page) = query.page {
        pairs.push(("page".to_owned(), page.to_string()));
    }
    if let Some(sort) = &query.sort {
        pairs.push(("sort".to_owned(), sort.clone()));
    }
    if query.draft {
        pairs.push(("draft".to_owned(), "true".to_owned()));
    }
    if let Some(depth) = query.depth {
        pairs.push(("depth".to_owned(), depth.to_string()));
    }
    for field in &query.select {
        pairs.push((format!("select[{field}]"), "true".to_owned()));
    }
    pairs
}

fn push_where(pairs: &mut Vec<(String, String)>, prefix: String, clause: &Where) {
    match clause {
        Where::Equals { field, value } => {
            pairs.push((format!("{prefix}[{field}][equals]"), scalar(value)));
        }
        Where::NotEquals { field, value } => {
            pairs.push((format!("{prefix}[{field}][not_equals]"), scalar(value)));
        }
        Where::In { field, values } => {
            for (index, value) in values.iter().enumerate() {
                pairs.push((format!("{prefix}[{field}][in][{index}]"), scalar(value)));
            }
        }
        Where::Exists { field, exists } => {
            pairs.push((format!("{prefix}[{field}][exists]"), exists.to_string()));
        }
        Where::Like { field, value } => {
            pairs.push((format!("{prefix}[{field}][like]"), value.clone()));
        }
        Where::LessThanEqual { field, value } => {
            pairs.push((format!("{prefix}[{field}][less_than_equal]"), scalar(value)));
        }
        Where::And(clauses) => push_group(pairs, &prefix, "and", clauses),
        Where::Or(clauses) => push_group(pairs, &prefix, "or", clauses),
    }
}

fn push_group(pairs: &mut Vec<(String, String)>, prefix: &str, operator: &str, clauses: &[Where]) {
    for (index, clause) in clauses.iter().enumerate() {
        push_where(pairs, format!("{prefix}[{operator}][{index}]"), clause);
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "null".to_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Collection;
    use rstest::rstest;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[rstest]
    fn encodes_nested_conjunction() {
        let query = ContentQuery::new(Collection::Posts)
            .filter(Where::all([
                Where::equals("slug", "hello"),
                Where::equals("_status", "published"),
            ]))
            .limit(1)
            .depth(2);
        assert_eq!(
            query_pairs(&query),
            vec![
                pair("where[and][0][slug][equals]", "hello"),
                pair("where[and][1][_status][equals]", "published"),
                pair("limit", "1"),
                pair("depth", "2"),
            ]
        );
    }

    #[rstest]
    fn encodes_in_lists_and_non_string_scalars() {
        let query = ContentQuery::new(Collection::Media).filter(Where::any([
            Where::is_in("id", [1, 2]),
            Where::exists("alt", false),
        ]));
        assert_eq!(
            query_pairs(&query),
            vec![
                pair("where[or][0][id][in][0]", "1"),
                pair("where[or][0][id][in][1]", "2"),
                pair("where[or][1][alt][exists]", "false"),
            ]
        );
    }

    #[rstest]
    fn encodes_paging_sort_draft_and_select() {
        let query = ContentQuery::new(Collection::Posts)
            .page(3)
            .sort("-publishedAt")
            .draft(true)
            .select(["slug"]);
        assert_eq!(
            query_pairs(&query),
            vec![
                pair("page", "3"),
                pair("sort", "-publishedAt"),
                pair("draft", "true"),
                pair("select[slug]", "true"),
            ]
        );
    }
}
