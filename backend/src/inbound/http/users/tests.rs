//! Tests for the `/usuarios` handlers.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{MissingUserPolicy, UserRegistryService};
use crate::inbound::http::error::route_not_found;
use crate::test_support::InMemoryUserRepository;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app(
    repository: Arc<InMemoryUserRepository>,
    policy: MissingUserPolicy,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = Arc::new(UserRegistryService::new(repository, policy));
    App::new()
        .app_data(web::Data::new(HttpState::new(service.clone(), service)))
        .configure(configure)
        .default_service(web::to(route_not_found))
}

fn legacy_row() -> User {
    User::new(UserId::new(7), "Legado", None, None)
}

async fn send(
    repository: Arc<InMemoryUserRepository>,
    policy: MissingUserPolicy,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(repository, policy)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON body");
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn create_returns_confirmation_without_id() {
    let repository = Arc::new(InMemoryUserRepository::default());

    let (status, body) = send(
        repository.clone(),
        MissingUserPolicy::default(),
        actix_test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({"nome": "Maria", "idade": 25, "email": "m@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"mensagem": "Usuário criado com sucesso!"}));
    assert_eq!(repository.len(), 1);
}

#[rstest]
#[case(json!({"idade": 25, "email": "m@x.com"}), "nome")]
#[case(json!({"nome": "Maria", "email": "m@x.com"}), "idade")]
#[case(json!({"nome": "Maria", "idade": 25}), "email")]
#[case(json!({"nome": null, "idade": 25, "email": "m@x.com"}), "nome")]
#[case(json!({"nome": "Maria", "idade": 25, "email": null}), "email")]
#[actix_web::test]
async fn missing_or_null_fields_are_rejected_before_storage(
    #[case] payload: Value,
    #[case] field: &str,
) {
    let repository = Arc::new(InMemoryUserRepository::default());

    let (status, body) = send(
        repository.clone(),
        MissingUserPolicy::default(),
        actix_test::TestRequest::post()
            .uri("/usuarios")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"], json!({"field": field, "code": "missing_field"}));
    assert!(repository.is_empty());
}

#[rstest]
#[case(actix_test::TestRequest::post().uri("/usuarios").insert_header(("content-type", "application/json")).set_payload("{nome"))]
#[case(actix_test::TestRequest::post().uri("/usuarios").set_json(json!({"nome": "Maria", "idade": "25", "email": "m@x.com"})))]
#[case(actix_test::TestRequest::post().uri("/usuarios").set_json(json!(["Maria", 25, "m@x.com"])))]
#[case(actix_test::TestRequest::post().uri("/usuarios").set_json(json!("Maria")))]
#[case(actix_test::TestRequest::put().uri("/usuarios/1").set_json(json!(["Ana", 30, "a@x.com"])))]
#[actix_web::test]
async fn malformed_bodies_are_invalid_json(#[case] request: actix_test::TestRequest) {
    let repository = Arc::new(InMemoryUserRepository::default());

    let (status, body) = send(repository.clone(), MissingUserPolicy::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({"code": "invalid_json"}));
    assert!(repository.is_empty());
}

#[rstest]
#[case(json!(["Maria", 25, "m@x.com"]))]
#[case(json!(25))]
#[case(Value::Null)]
fn payload_only_deserialises_from_objects(#[case] body: Value) {
    assert!(serde_json::from_value::<UserPayload>(body).is_err());
}

#[rstest]
fn payload_object_maps_null_to_absent() {
    let payload: UserPayload =
        serde_json::from_value(json!({"nome": "Maria", "idade": null})).expect("object parses");

    assert_eq!(payload.nome.as_deref(), Some("Maria"));
    assert_eq!(payload.idade, None);
    assert_eq!(payload.email, None);
}

#[rstest]
#[actix_web::test]
async fn list_returns_legacy_nulls() {
    let repository = Arc::new(InMemoryUserRepository::default().with_row(legacy_row()));

    let (status, body) = send(
        repository,
        MissingUserPolicy::default(),
        actix_test::TestRequest::get().uri("/usuarios"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 7, "nome": "Legado", "idade": null, "email": null}])
    );
}

#[rstest]
#[actix_web::test]
async fn update_replaces_every_field() {
    let repository = Arc::new(InMemoryUserRepository::default().with_row(legacy_row()));

    let (status, body) = send(
        repository.clone(),
        MissingUserPolicy::default(),
        actix_test::TestRequest::put()
            .uri("/usuarios/7")
            .set_json(json!({"nome": "Ana", "idade": 30, "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"mensagem": "Usuário atualizado com sucesso!"}));
    let stored = repository.list().await.expect("list succeeds");
    assert_eq!(
        stored,
        vec![User::new(UserId::new(7), "Ana", Some(30), Some("a@x.com".into()))]
    );
}

#[rstest]
#[case(MissingUserPolicy::NotFound, StatusCode::NOT_FOUND)]
#[case(MissingUserPolicy::Ignore, StatusCode::OK)]
#[actix_web::test]
async fn delete_of_unknown_id_follows_policy(
    #[case] policy: MissingUserPolicy,
    #[case] expected: StatusCode,
) {
    let (status, _) = send(
        Arc::new(InMemoryUserRepository::default()),
        policy,
        actix_test::TestRequest::delete().uri("/usuarios/42"),
    )
    .await;

    assert_eq!(status, expected);
}

#[rstest]
#[case(actix_test::TestRequest::delete().uri("/usuarios/abc"))]
#[case(actix_test::TestRequest::delete().uri("/usuarios/99999999999"))]
#[case(actix_test::TestRequest::get().uri("/nowhere"))]
#[actix_web::test]
async fn unparseable_ids_and_unknown_routes_are_json_not_found(
    #[case] request: actix_test::TestRequest,
) {
    let (status, body) = send(
        Arc::new(InMemoryUserRepository::default()),
        MissingUserPolicy::default(),
        request,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn unavailable_database_is_service_unavailable() {
    let repository = Arc::new(InMemoryUserRepository::default());
    repository.fail_with(UserPersistenceError::connection("connection refused"));

    let (status, body) = send(
        repository,
        MissingUserPolicy::default(),
        actix_test::TestRequest::get().uri("/usuarios"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[rstest]
#[actix_web::test]
async fn query_failures_are_redacted() {
    let repository = Arc::new(InMemoryUserRepository::default());
    repository.fail_with(UserPersistenceError::query("relation \"usuarios\" does not exist"));

    let (status, body) = send(
        repository,
        MissingUserPolicy::default(),
        actix_test::TestRequest::post()
            .uri("/usuarios")
            .set_json(json!({"nome": "Maria", "idade": 25, "email": "m@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn update_forwards_path_id_and_draft_to_command_port() {
    use crate::domain::ports::{MockUsersCommand, MockUsersQuery};
    use mockall::predicate::eq;

    let mut command = MockUsersCommand::new();
    command
        .expect_update_user()
        .with(
            eq(UserId::new(12)),
            eq(UserDraft::try_from_parts(Some("Ana".into()), Some(30), Some("a@x.com".into()))
                .expect("valid draft")),
        )
        .times(1)
        .returning(|_, _| Ok(()));
    let state = HttpState::new(Arc::new(MockUsersQuery::new()), Arc::new(command));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let request = actix_test::TestRequest::put()
        .uri("/usuarios/12")
        .set_json(json!({"nome": "Ana", "idade": 30, "email": "a@x.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn query_port_errors_surface_with_their_status() {
    use crate::domain::ports::{MockUsersCommand, MockUsersQuery};

    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .times(1)
        .returning(|| Err(Error::service_unavailable("database unavailable")));
    let state = HttpState::new(Arc::new(query), Arc::new(MockUsersCommand::new()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let request = actix_test::TestRequest::get().uri("/usuarios").to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
