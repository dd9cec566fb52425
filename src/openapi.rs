//! Registration of list-endpoint query parameters on `utoipa` operations.

use utoipa::openapi::path::{Operation, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{RefOr, Required};

/// Append one string-typed `in: query` parameter to `operation`.
///
/// A parameter that is already declared under the same name is replaced so
/// that hooks can be called more than once for the same operation.
pub fn add_query_parameter(
    operation: &mut Operation,
    name: &str,
    required: bool,
    description: Option<&str>,
) {
    let parameter = ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(if required {
            Required::True
        } else {
            Required::False
        })
        .description(description)
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new().schema_type(Type::String).build(),
        ))))
        .build();

    let parameters = operation.parameters.get_or_insert_with(Vec::new);
    parameters.retain(|existing| existing.name != name);
    parameters.push(parameter);
}
