use axum::{Router, body::Body, http::Request, http::StatusCode};
use sea_orm::{ActiveValue::Set, Database, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::prelude::*;
use tower::ServiceExt;

pub mod widget_entity;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    // Run migrations
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// The three widgets `(id, name, size)`: `(1, Foo, 1)`, `(9, Foo, 5)`, `(3, Baz, 3)`
pub async fn seed_widgets(db: &DatabaseConnection) -> Result<(), DbErr> {
    let widgets = [(1, "Foo", 1), (9, "Foo", 5), (3, "Baz", 3)].map(|(id, name, size)| {
        widget_entity::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            size: Set(size),
        }
    });
    widget_entity::Entity::insert_many(widgets).exec(db).await?;
    Ok(())
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    use widget_entity::{
        list_fixed_widgets, list_primary_key_widgets, list_required_widgets, list_widgets,
    };

    Router::new()
        .route("/widgets", axum::routing::get(list_widgets))
        .route("/required_widgets", axum::routing::get(list_required_widgets))
        .route("/fixed_widgets", axum::routing::get(list_fixed_widgets))
        .route(
            "/primary_key_widgets",
            axum::routing::get(list_primary_key_widgets),
        )
        .with_state(db)
}

pub async fn setup_widget_app() -> Router {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let db = setup_test_db()
        .await
        .expect("Failed to setup test database");
    seed_widgets(&db).await.expect("Failed to seed widgets");
    setup_test_app(db)
}

/// GET `uri`, returning the status and the decoded JSON body
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

/// GET `uri` and return the ids of the listed widgets, in response order
pub async fn get_ids(app: &Router, uri: &str) -> Vec<i64> {
    let (status, body) = get_json(app, uri).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {body}");
    body.as_array()
        .expect("list response")
        .iter()
        .map(|widget| widget["id"].as_i64().expect("integer id"))
        .collect()
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateWidgetTable)]
    }
}

pub struct CreateWidgetTable;

impl MigrationName for CreateWidgetTable {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_widget_table"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateWidgetTable {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Widgets::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Widgets::Id)
                    .integer()
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Widgets::Name).string().not_null())
            .col(ColumnDef::new(Widgets::Size).integer().not_null())
            .to_owned();

        manager.create_table(table).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Widgets::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Widgets {
    Table,
    Id,
    Name,
    Size,
}
