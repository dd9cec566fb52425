//! Column operators for the Sea-ORM backend.
//!
//! Each operator has the `(column, value) -> Condition` shape expected by
//! [`ColumnFilter`](super::ColumnFilter) and [`FilterSet::builder`](super::FilterSet::builder):
//!
//! ```rust,ignore
//! FilterSet::builder()
//!     .column("name", operators::eq)
//!     .filter("size_min", ColumnFilter::new("size", operators::gte))
//!     .filter("name_like", ColumnFilter::new("name", operators::contains))
//! ```

use sea_orm::{ColumnTrait, Condition, Value, sea_query::LikeExpr};

pub fn eq<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.eq(value))
}

pub fn ne<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.ne(value))
}

pub fn gt<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.gt(value))
}

pub fn gte<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.gte(value))
}

pub fn lt<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.lt(value))
}

pub fn lte<C: ColumnTrait>(column: C, value: Value) -> Condition {
    Condition::all().add(column.lte(value))
}

/// Escape `\\`, `%` and `_` so they match literally under `ESCAPE '\\'`
fn escape_like_wildcards(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// `LIKE '%value%'` for strings, equality for anything else.
///
/// Wildcards in the value are escaped, so `%` and `_` only match themselves.
pub fn contains<C: ColumnTrait>(column: C, value: Value) -> Condition {
    match value {
        Value::String(Some(text)) => {
            let pattern = format!("%{}%", escape_like_wildcards(&text));
            Condition::all().add(column.like(LikeExpr::new(pattern).escape('\\')))
        }
        other => eq(column, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::widget;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    fn sql(condition: Condition) -> String {
        widget::Entity::find()
            .filter(condition)
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn test_comparisons() {
        assert!(sql(eq(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" = 3"#));
        assert!(sql(ne(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" <> 3"#));
        assert!(sql(gt(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" > 3"#));
        assert!(sql(gte(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" >= 3"#));
        assert!(sql(lt(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" < 3"#));
        assert!(sql(lte(widget::Column::Size, 3_i64.into())).ends_with(r#"WHERE "widgets"."size" <= 3"#));
    }

    #[test]
    fn test_contains_on_strings_is_like() {
        let query = sql(contains(widget::Column::Name, "oo".into()));
        assert!(query.contains(r#""widgets"."name" LIKE '%oo%'"#), "{query}");
        assert!(query.contains("ESCAPE"), "{query}");
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like_wildcards("100%"), r"100\%");
        assert_eq!(escape_like_wildcards("_a"), r"\_a");
        assert_eq!(escape_like_wildcards(r"a\b"), r"a\\b");
        assert_eq!(escape_like_wildcards("plain"), "plain");
    }

    #[test]
    fn test_contains_on_other_values_is_equality() {
        let query = sql(contains(widget::Column::Size, 5_i64.into()));
        assert!(query.ends_with(r#"WHERE "widgets"."size" = 5"#), "{query}");
    }
}
