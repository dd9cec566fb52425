use crate::entity::EntityView;
use crate::errors::ApiError;
use crate::filtering::FilterSet;
use crate::sorting::Sort;
use sea_orm::{ConnectionTrait, EntityTrait, Select};

/// Execute an already narrowed and ordered query.
///
/// # Errors
/// - Returns a sanitized 500 `ApiError` if the database query fails.
pub async fn list_all<E, C>(db: &C, query: Select<E>) -> Result<Vec<E::Model>, ApiError>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    query.all(db).await.map_err(ApiError::database)
}

/// Filter, sort and fetch every matching row of `E`.
///
/// # Example
/// ```rust,ignore
/// async fn list_widgets(
///     State(db): State<DatabaseConnection>,
///     args: RequestArgs,
/// ) -> Result<Json<Vec<widget::Model>>, ApiError> {
///     let view = EntityView::new(Arc::clone(&SCHEMA), args);
///     Ok(Json(routes::list(&db, &view, &FILTERING, &SORTING).await?))
/// }
/// ```
///
/// # Errors
/// - `400` with `invalid_filter` / `invalid_sort` entries for rejected parameters.
/// - `500` if the filters are misconfigured or the database query fails.
pub async fn list<E, C, S>(
    db: &C,
    view: &EntityView<E>,
    filtering: &FilterSet<EntityView<E>>,
    sorting: &S,
) -> Result<Vec<E::Model>, ApiError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    S: Sort<EntityView<E>>,
{
    let query = filtering.filter_query(E::find(), view)?;
    let query = sorting.sort_query(query, view)?;
    list_all(db, query).await
}
