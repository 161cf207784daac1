//! OpenAPI documentation for the HTTP API.
//!
//! Served by Swagger UI at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::users::{MessageResponse, UserPayload, UserResponse};

/// OpenAPI document covering the user operations and health probes.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Usuarios API",
        description = "CRUD over the usuarios table plus orchestration probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserPayload, UserResponse, MessageResponse, Error, ErrorCode)),
    tags(
        (name = "usuarios", description = "User records"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/usuarios")]
    #[case("/usuarios/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_route(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn user_schemas_use_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;

        let response = schemas.get("UserResponse").expect("UserResponse schema");
        for field in ["id", "nome", "idade", "email"] {
            assert_object_schema_has_field(response, field);
        }
        let message = schemas.get("MessageResponse").expect("MessageResponse schema");
        assert_object_schema_has_field(message, "mensagem");
    }
}
