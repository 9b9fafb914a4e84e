//! Storage-agnostic CMS query objects.
//!
//! [`ContentQuery`] mirrors the CMS `find` contract (collection, where,
//! limit, sort, page, draft, depth, select) and [`ContentPage`] its paginated
//! response. Adapters decide how to put them on the wire.

use serde_json::Value;

/// CMS collections this service reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Posts,
    Media,
    Users,
}

impl Collection {
    /// Collection slug as used in CMS URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Media => "media",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter tree understood by the CMS.
#[derive(Debug, Clone, PartialEq)]
pub enum Where {
    Equals { field: String, value: Value },
    NotEquals { field: String, value: Value },
    In { field: String, values: Vec<Value> },
    Exists { field: String, exists: bool },
    Like { field: String, value: String },
    LessThanEqual { field: String, value: Value },
    And(Vec<Where>),
    Or(Vec<Where>),
}

impl Where {
    pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_in<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(field: impl Into<String>, exists: bool) -> Self {
        Self::Exists {
            field: field.into(),
            exists,
        }
    }

    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Like {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn less_than_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::LessThanEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Conjunction of `clauses`, flattened when only one clause remains.
    ///
    /// Returns `None` for an empty list.
    pub fn all(clauses: impl IntoIterator<Item = Where>) -> Option<Self> {
        let mut clauses: Vec<Where> = clauses.into_iter().collect();
        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Self::And(clauses)),
        }
    }

    /// Disjunction of `clauses`, flattened when only one clause remains.
    pub fn any(clauses: impl IntoIterator<Item = Where>) -> Option<Self> {
        let mut clauses: Vec<Where> = clauses.into_iter().collect();
        match clauses.len() {
            0 => None,
            1 => clauses.pop(),
            _ => Some(Self::Or(clauses)),
        }
    }
}

/// A `find` request against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentQuery {
    pub collection: Collection,
    pub where_clause: Option<Where>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    /// Field name, prefixed with `-` for descending order.
    pub sort: Option<String>,
    /// Read the latest draft revision instead of the published one.
    pub draft: bool,
    /// Relationship population depth.
    pub depth: Option<u32>,
    /// Restrict returned fields; empty means all fields.
    pub select: Vec<String>,
}

impl ContentQuery {
    /// Unfiltered query with CMS defaults.
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            where_clause: None,
            limit: None,
            page: None,
            sort: None,
            draft: false,
            depth: None,
            select: Vec::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, where_clause: Option<Where>) -> Self {
        self.where_clause = where_clause;
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    #[must_use]
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    #[must_use]
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }
}

/// One page of `find` results.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage<T> {
    pub docs: Vec<T>,
    pub total_docs: u64,
    pub total_pages: Option<u32>,
    pub page: Option<u32>,
    pub has_next_page: Option<bool>,
    pub has_prev_page: Option<bool>,
}

impl<T> ContentPage<T> {
    /// Page holding exactly `docs` with no further pages.
    pub fn single(docs: Vec<T>) -> Self {
        let total_docs = docs.len() as u64;
        Self {
            docs,
            total_docs,
            total_pages: Some(1),
            page: Some(1),
            has_next_page: Some(false),
            has_prev_page: Some(false),
        }
    }

    /// Convert every document, stopping at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<ContentPage<U>, E> {
        let Self {
            docs,
            total_docs,
            total_pages,
            page,
            has_next_page,
            has_prev_page,
        } = self;
        let docs = docs.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(ContentPage {
            docs,
            total_docs,
            total_pages,
            page,
            has_next_page,
            has_prev_page,
        })
    }

    /// `true` when the CMS reported another page after this one.
    pub fn has_more(&self) -> bool {
        self.has_next_page.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn all_flattens_single_clause() {
        let only = Where::equals("slug", "a");
        assert_eq!(Where::all([only.clone()]), Some(only));
        assert_eq!(Where::all(Vec::new()), None);
    }

    #[rstest]
    fn any_keeps_clause_order() {
        let clause = Where::any([Where::equals("a", 1), Where::exists("b", true)]);
        assert_eq!(
            clause,
            Some(Where::Or(vec![
                Where::Equals {
                    field: "a".into(),
                    value: json!(1)
                },
                Where::Exists {
                    field: "b".into(),
                    exists: true
                },
            ]))
        );
    }

    #[rstest]
    fn try_map_preserves_pagination() {
        let page = ContentPage {
            docs: vec![1, 2],
            total_docs: 10,
            total_pages: Some(5),
            page: Some(2),
            has_next_page: Some(true),
            has_prev_page: Some(true),
        };
        let mapped: ContentPage<String> = page
            .try_map(|n| Ok::<_, ()>(n.to_string()))
            .expect("mapping succeeds");
        assert_eq!(mapped.docs, ["1", "2"]);
        assert_eq!(mapped.total_docs, 10);
        assert!(mapped.has_more());
    }

    #[rstest]
    fn try_map_stops_at_first_failure() {
        let page = ContentPage::single(vec![1, 2, 3]);
        let result = page.try_map(|n| if n == 2 { Err(n) } else { Ok(n) });
        assert_eq!(result, Err(2));
    }
}
