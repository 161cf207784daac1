//! Handlers for the `/usuarios` resource.
//!
//! ```text
//! POST   /usuarios        {"nome":"Maria","idade":25,"email":"m@x.com"}
//! GET    /usuarios
//! PUT    /usuarios/{id}   {"nome":"Ana","idade":30,"email":"a@x.com"}
//! DELETE /usuarios/{id}
//! ```
//!
//! Bodies are validated into a [`UserDraft`] before any port is called, so a
//! missing field never reaches the database.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Error, User, UserDraft, UserField, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, json_config, missing_field_error, path_config};

pub const USER_CREATED: &str = "Usuário criado com sucesso!";
pub const USER_UPDATED: &str = "Usuário atualizado com sucesso!";
pub const USER_DELETED: &str = "Usuário deletado com sucesso!";

/// Request body for create and full replacement.
///
/// Every field is optional at the serde level so that absent keys and
/// explicit `null`s are reported as `missing_field` instead of a generic
/// parse failure. The body itself must be a JSON object; arrays and scalars
/// fail extraction.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(try_from = "Map<String, Value>")]
pub struct UserPayload {
    #[schema(example = "Maria")]
    pub nome: Option<String>,
    #[schema(example = 25)]
    pub idade: Option<i32>,
    #[schema(example = "m@x.com")]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct PayloadFields {
    nome: Option<String>,
    idade: Option<i32>,
    email: Option<String>,
}

impl TryFrom<Map<String, Value>> for UserPayload {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let PayloadFields { nome, idade, email } = serde_json::from_value(Value::Object(object))?;
        Ok(Self { nome, idade, email })
    }
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.nome, value.idade, value.email)
    }
}

/// One stored row. `idade` and `email` are `null` for legacy rows.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Maria")]
    pub nome: String,
    #[schema(example = 25)]
    pub idade: Option<i32>,
    #[schema(example = "m@x.com")]
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().get(),
            nome: user.name().to_owned(),
            idade: user.age(),
            email: user.email().map(str::to_owned),
        }
    }
}

/// Confirmation body for successful mutations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Usuário criado com sucesso!")]
    pub mensagem: String,
}

impl MessageResponse {
    fn new(mensagem: &str) -> Self {
        Self {
            mensagem: mensagem.to_owned(),
        }
    }
}

fn wire_name(field: UserField) -> FieldName {
    match field {
        UserField::Name => FieldName::new("nome"),
        UserField::Age => FieldName::new("idade"),
        UserField::Email => FieldName::new("email"),
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::MissingField(field) => missing_field_error(wire_name(field)),
    }
}

fn parse_draft(payload: web::Json<UserPayload>) -> ApiResult<UserDraft> {
    UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)
}

/// Create a user. The response does not include the new id.
#[utoipa::path(
    post,
    path = "/usuarios",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = MessageResponse),
        (status = 400, description = "Missing field or malformed JSON", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "createUser"
)]
#[post("/usuarios")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload)?;
    state.users_command.create_user(draft).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new(USER_CREATED)))
}

/// List every stored user ordered by id.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use usuarios::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/usuarios",
    responses(
        (status = 200, description = "Stored users", body = [UserResponse]),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "listUsers"
)]
#[get("/usuarios")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Replace every mutable field of a user.
#[utoipa::path(
    put,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User replaced", body = MessageResponse),
        (status = 400, description = "Missing field or malformed JSON", body = Error),
        (status = 404, description = "No user with this id", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "updateUser"
)]
#[put("/usuarios/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    let draft = parse_draft(payload)?;
    state.users_command.update_user(id, draft).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(USER_UPDATED)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/usuarios/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "No user with this id", body = Error),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["usuarios"],
    operation_id = "deleteUser"
)]
#[delete("/usuarios/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(USER_DELETED)))
}

/// Register the user handlers together with the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(create_user)
        .service(list_users)
        .service(update_user)
        .service(delete_user);
}

#[cfg(test)]
mod tests;
