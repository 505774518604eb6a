//! PostgREST query composition.

use std::fmt::Display;

/// Sort direction for [`TableQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// A filtered, ordered, limited read (or filtered delete) against one table.
///
/// # Examples
///
/// ```
/// use runscope_database::{Direction, TableQuery};
///
/// let query = TableQuery::table("nutri_search_step_logs")
///     .eq("run_id", "r-1")
///     .order("step_number", Direction::Ascending)
///     .limit(10);
///
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("select".to_string(), "*".to_string()),
///         ("run_id".to_string(), "eq.r-1".to_string()),
///         ("order".to_string(), "step_number.asc".to_string()),
///         ("limit".to_string(), "10".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, Direction)>,
    limit: Option<usize>,
}

impl TableQuery {
    /// Start a query selecting every column of `table`.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict the selected columns (comma separated).
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((column.into(), format!("eq.{}", value)));
        self
    }

    /// Keep rows where `column` differs from `value`.
    pub fn neq(mut self, column: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((column.into(), format!("neq.{}", value)));
        self
    }

    /// Keep rows where `column` is one of `values`.
    pub fn in_list<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = values
            .into_iter()
            .map(|value| quote_list_value(value.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push((column.into(), format!("in.({})", list)));
        self
    }

    /// Sort by `column`.
    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    /// Return at most `limit` rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Target table.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Whether at least one row filter is present.
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Query-string pairs for a read.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.columns.clone())];
        pairs.extend(self.filter_pairs());
        if let Some((column, direction)) = &self.order {
            pairs.push((
                "order".to_string(),
                format!("{}.{}", column, direction.as_str()),
            ));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }

    /// Query-string pairs for a delete (filters only).
    pub fn filter_pairs(&self) -> Vec<(String, String)> {
        self.filters.clone()
    }
}

/// Values containing reserved characters must be double-quoted inside `in.(...)`.
fn quote_list_value(value: &str) -> String {
    let reserved = value
        .chars()
        .any(|c| matches!(c, ',' | '.' | '(' | ')' | '"' | ':' | '\\') || c.is_whitespace());
    if reserved {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
