//! Parameterized SQL for the user search query
//!
//! Filter values never reach the statement text. Every value goes through
//! [`Statement::bind`], which appends the value and renders its `$n`
//! placeholder in one step, keeping the two lists positionally aligned.

use crate::domain::user::SearchFilter;

/// Column list returned by every user query
pub const USER_COLUMNS: &str = "id, email, name, age, created_at, updated_at";

/// A value bound to a numbered placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i32),
    BigInt(i64),
}

/// SQL text plus the values for its placeholders, in placeholder order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub sql: String,
    pub params: Vec<BindValue>,
}

#[derive(Debug, Default)]
struct Statement {
    predicates: Vec<String>,
    params: Vec<BindValue>,
}

impl Statement {
    /// Bind `value` to the next placeholder and return that placeholder
    fn bind(&mut self, value: BindValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// Append a predicate built around a freshly bound placeholder
    fn filter(&mut self, value: BindValue, render: impl FnOnce(&str) -> String) {
        let placeholder = self.bind(value);
        self.predicates.push(render(&placeholder));
    }

    fn where_clause(&self) -> String {
        std::iter::once("1=1")
            .chain(self.predicates.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// Build the filtered, paginated listing query
pub fn build_search_query(filter: &SearchFilter) -> SearchQuery {
    let mut statement = Statement::default();

    if let Some(term) = filter.search_term() {
        let pattern = format!("%{}%", escape_like(term));
        statement.filter(BindValue::Text(pattern), |p| {
            format!("(name ILIKE {p} OR email ILIKE {p})")
        });
    }

    if let Some(min_age) = filter.min_age {
        statement.filter(BindValue::Int(min_age), |p| format!("age >= {p}"));
    }

    if let Some(max_age) = filter.max_age {
        statement.filter(BindValue::Int(max_age), |p| format!("age <= {p}"));
    }

    let where_clause = statement.where_clause();
    let limit = statement.bind(BindValue::BigInt(i64::from(filter.limit)));
    let offset = statement.bind(BindValue::BigInt(
        i64::try_from(filter.offset()).unwrap_or(i64::MAX),
    ));

    let sql = format!(
        "SELECT {USER_COLUMNS} FROM users WHERE {where_clause} \
         ORDER BY created_at DESC, id DESC LIMIT {limit} OFFSET {offset}"
    );

    SearchQuery {
        sql,
        params: statement.params,
    }
}

/// Escape LIKE metacharacters so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
