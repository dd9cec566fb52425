//! Sea-ORM backend: conditions as predicates, `Select` as the query and an
//! entity-backed [`ListView`].
//!
//! ```rust,ignore
//! static SCHEMA: LazyLock<Arc<Schema<Value>>> =
//!     LazyLock::new(|| Arc::new(entity_schema::<widget::Entity>()));
//!
//! async fn list_widgets(
//!     State(db): State<DatabaseConnection>,
//!     args: RequestArgs,
//! ) -> Result<Json<Vec<widget::Model>>, ApiError> {
//!     let view = EntityView::<widget::Entity>::new(Arc::clone(&SCHEMA), args);
//!     let items = routes::list(&db, &view, &FILTERING, &SORTING).await?;
//!     Ok(Json(items))
//! }
//! ```

use crate::args::RequestArgs;
use crate::fields::{Field, FieldDefinition, Schema};
use crate::predicate::{FilterableQuery, Predicate, SortDirection, SortableQuery};
use crate::view::ListView;
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, ColumnType, Condition, EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn,
    QueryFilter, QueryOrder, Select, Value,
};
use std::fmt;
use std::sync::Arc;

impl Predicate for Condition {
    fn always() -> Self {
        Condition::all().add(Expr::cust("1 = 1"))
    }

    fn never() -> Self {
        Condition::all().add(Expr::cust("1 = 0"))
    }

    fn and(self, other: Self) -> Self {
        Condition::all().add(self).add(other)
    }

    fn or(self, other: Self) -> Self {
        Condition::any().add(self).add(other)
    }

    fn any_of<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut predicates = predicates.into_iter().peekable();
        if predicates.peek().is_none() {
            return Self::never();
        }
        predicates.fold(Condition::any(), |any, predicate| any.add(predicate))
    }
}

impl<E: EntityTrait> FilterableQuery for Select<E> {
    type Predicate = Condition;

    fn narrow(self, predicate: Condition) -> Self {
        QueryFilter::filter(self, predicate)
    }
}

impl<E: EntityTrait> SortableQuery<E::Column> for Select<E> {
    fn order_by(self, column: E::Column, direction: SortDirection) -> Self {
        let order = match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        QueryOrder::order_by(self, column, order)
    }
}

/// Field definitions for every column of `E`, typed after the column type.
///
/// Integer columns decode to `i32` or `i64`, floating and decimal columns to
/// `f64`, booleans and UUIDs to their own types; anything else is kept as a
/// string.
#[must_use]
pub fn entity_schema<E: EntityTrait>() -> Schema<Value> {
    E::Column::iter().fold(Schema::new(), |schema, column| {
        let name = column.as_str().to_owned();
        match column.def().get_column_type() {
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned => schema.field(name, Field::<i32>::new()),
            ColumnType::BigInteger | ColumnType::Unsigned | ColumnType::BigUnsigned => {
                schema.field(name, Field::integer())
            }
            ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) => {
                schema.field(name, Field::float())
            }
            ColumnType::Boolean => schema.field(name, Field::boolean()),
            ColumnType::Uuid => schema.field(name, Field::uuid()),
            _ => schema.field(name, Field::string()),
        }
    })
}

/// [`ListView`] over a Sea-ORM entity for one request.
pub struct EntityView<E: EntityTrait> {
    entity: E,
    schema: Arc<Schema<Value>>,
    args: RequestArgs,
}

impl<E: EntityTrait> EntityView<E> {
    #[must_use]
    pub fn new(schema: Arc<Schema<Value>>, args: RequestArgs) -> Self {
        Self {
            entity: E::default(),
            schema,
            args,
        }
    }
}

impl<E: EntityTrait> fmt::Debug for EntityView<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityView")
            .field("table", &self.entity.table_name())
            .field("schema", &self.schema)
            .field("args", &self.args)
            .finish()
    }
}

impl<E: EntityTrait> ListView for EntityView<E> {
    type Model = E;
    type Column = E::Column;
    type Value = Value;
    type Predicate = Condition;
    type Query = Select<E>;

    fn args(&self) -> &RequestArgs {
        &self.args
    }

    fn model(&self) -> &E {
        &self.entity
    }

    fn column(&self, name: &str) -> Option<E::Column> {
        name.parse().ok()
    }

    fn field(&self, name: &str) -> Option<&dyn FieldDefinition<Value>> {
        self.schema.get(name)
    }

    fn primary_key(&self) -> Vec<E::Column> {
        E::PrimaryKey::iter()
            .map(PrimaryKeyToColumn::into_column)
            .collect()
    }
}
