use crudfilter::{
    ApiError, ColumnFilter, EntityView, Field, FilterSet, FixedSorting, PrimaryKeySorting,
    RequestArgs, Schema, Sort, Sorting, entity_schema, model_filter, operators, routes,
};
use axum::{Json, extract::State};
use sea_orm::{Condition, DatabaseConnection, Value, entity::prelude::*};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
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

pub type WidgetView = EntityView<Entity>;

static SCHEMA: LazyLock<Arc<Schema<Value>>> =
    LazyLock::new(|| Arc::new(entity_schema::<Entity>()));

/// `big=true` selects widgets of size 3 and up, `big=false` the others
fn is_big(_: &Entity, value: Value) -> Condition {
    match value {
        Value::Bool(Some(true)) => Condition::all().add(Column::Size.gte(3)),
        _ => Condition::all().add(Column::Size.lt(3)),
    }
}

static FILTERING: LazyLock<FilterSet<WidgetView>> = LazyLock::new(|| {
    FilterSet::<WidgetView>::builder()
        .column("name", operators::eq)
        .filter("size_min", ColumnFilter::new("size", operators::gte))
        .filter("size_max", ColumnFilter::new("size", operators::lte))
        .filter("name_like", ColumnFilter::new("name", operators::contains).no_separator())
        .filter("big", model_filter(Field::boolean(), is_big))
        .build()
        .expect("valid widget filters")
});

static REQUIRED_FILTERING: LazyLock<FilterSet<WidgetView>> = LazyLock::new(|| {
    FilterSet::<WidgetView>::builder()
        .filter("name", ColumnFilter::inferred(operators::eq).required())
        .build()
        .expect("valid required widget filters")
});

static SORTING: LazyLock<Sorting> = LazyLock::new(|| Sorting::new(["name", "size"]));

async fn list_with(
    db: &DatabaseConnection,
    args: RequestArgs,
    filtering: &FilterSet<WidgetView>,
    sorting: &impl Sort<WidgetView>,
) -> Result<Json<Vec<Model>>, ApiError> {
    let view = WidgetView::new(Arc::clone(&SCHEMA), args);
    let widgets = routes::list(db, &view, filtering, sorting).await?;
    Ok(Json(widgets))
}

pub async fn list_widgets(
    State(db): State<DatabaseConnection>,
    args: RequestArgs,
) -> Result<Json<Vec<Model>>, ApiError> {
    list_with(&db, args, &FILTERING, &*SORTING).await
}

pub async fn list_required_widgets(
    State(db): State<DatabaseConnection>,
    args: RequestArgs,
) -> Result<Json<Vec<Model>>, ApiError> {
    list_with(&db, args, &REQUIRED_FILTERING, &*SORTING).await
}

pub async fn list_fixed_widgets(
    State(db): State<DatabaseConnection>,
    args: RequestArgs,
) -> Result<Json<Vec<Model>>, ApiError> {
    list_with(&db, args, &FILTERING, &FixedSorting::new("name,size")).await
}

pub async fn list_primary_key_widgets(
    State(db): State<DatabaseConnection>,
    args: RequestArgs,
) -> Result<Json<Vec<Model>>, ApiError> {
    list_with(&db, args, &FILTERING, &PrimaryKeySorting).await
}
