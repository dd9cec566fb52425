//! In-memory predicate, query and view used by unit tests.

use crate::args::RequestArgs;
use crate::fields::{Field, FieldDefinition, Schema};
use crate::predicate::{FilterableQuery, Predicate, SortDirection, SortableQuery};
use crate::view::ListView;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    True,
    False,
    Cmp {
        column: String,
        op: &'static str,
        value: Value,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn cmp(column: &str, op: &'static str, value: impl Into<Value>) -> Self {
        Self::Cmp {
            column: column.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &Value) -> bool {
        match self {
            Self::True => true,
            Self::False => false,
            Self::Cmp { column, op, value } => {
                let actual = &row[column.as_str()];
                let ordering = compare(actual, value);
                match *op {
                    "=" => ordering == Some(Ordering::Equal),
                    ">=" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                    "<=" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                    other => panic!("unsupported operator {other}"),
                }
            }
            Self::And(a, b) => a.matches(row) && b.matches(row),
            Self::Or(a, b) => a.matches(row) || b.matches(row),
        }
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

impl Predicate for Expr {
    fn always() -> Self {
        Self::True
    }

    fn never() -> Self {
        Self::False
    }

    fn and(self, other: Self) -> Self {
        Self::And(Box::new(self), Box::new(other))
    }

    fn or(self, other: Self) -> Self {
        Self::Or(Box::new(self), Box::new(other))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockQuery {
    pub predicates: Vec<Expr>,
    pub order: Vec<(String, SortDirection)>,
}

impl MockQuery {
    /// Run the query over `rows`, returning the `id` of every selected row
    pub fn ids(&self, rows: &[Value]) -> Vec<i64> {
        let mut selected: Vec<&Value> = rows
            .iter()
            .filter(|row| self.predicates.iter().all(|p| p.matches(row)))
            .collect();
        selected.sort_by(|a, b| {
            for (column, direction) in &self.order {
                let ordering = compare(&a[column.as_str()], &b[column.as_str()])
                    .unwrap_or(Ordering::Equal);
                let ordering = match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });
        selected
            .into_iter()
            .filter_map(|row| row["id"].as_i64())
            .collect()
    }
}

impl FilterableQuery for MockQuery {
    type Predicate = Expr;

    fn narrow(mut self, predicate: Expr) -> Self {
        self.predicates.push(predicate);
        self
    }
}

impl SortableQuery<String> for MockQuery {
    fn order_by(mut self, column: String, direction: SortDirection) -> Self {
        self.order.push((column, direction));
        self
    }
}

#[derive(Debug)]
pub struct MockModel {
    pub table: &'static str,
}

pub struct MockView {
    args: RequestArgs,
    schema: Schema<Value>,
    model: MockModel,
}

const COLUMNS: &[&str] = &["id", "name", "size"];

impl MockView {
    /// View over the `widgets` resource with the given query string
    pub fn new(query: &str) -> Self {
        Self {
            args: RequestArgs::from_query(query),
            schema: Schema::new()
                .field("id", Field::integer())
                .field("name", Field::string())
                .field("size", Field::integer())
                .field("owner", Field::string().required()),
            model: MockModel { table: "widgets" },
        }
    }
}

impl ListView for MockView {
    type Model = MockModel;
    type Column = String;
    type Value = Value;
    type Predicate = Expr;
    type Query = MockQuery;

    fn args(&self) -> &RequestArgs {
        &self.args
    }

    fn model(&self) -> &MockModel {
        &self.model
    }

    fn column(&self, name: &str) -> Option<String> {
        COLUMNS.contains(&name).then(|| name.to_string())
    }

    fn field(&self, name: &str) -> Option<&dyn FieldDefinition<Value>> {
        self.schema.get(name)
    }

    fn primary_key(&self) -> Vec<String> {
        vec!["id".to_string()]
    }
}

pub fn eq(column: String, value: Value) -> Expr {
    Expr::Cmp {
        column,
        op: "=",
        value,
    }
}

pub fn gte(column: String, value: Value) -> Expr {
    Expr::Cmp {
        column,
        op: ">=",
        value,
    }
}

/// The three widgets of the fixture: `(id, name, size)`
pub fn widgets() -> Vec<Value> {
    vec![
        serde_json::json!({"id": 1, "name": "Foo", "size": 1}),
        serde_json::json!({"id": 9, "name": "Foo", "size": 5}),
        serde_json::json!({"id": 3, "name": "Baz", "size": 3}),
    ]
}

/// Sea-ORM entity with the same shape as the fixture rows
pub mod widget {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "widgets")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i32,
        pub name: String,
        pub size: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
