use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use byt_admin::infrastructure::ApiClient;
use byt_admin::infrastructure::errors::ApiError;
use byt_admin::infrastructure::services::{UserAdminApiAdapter, UserAdminService};
use byt_model::prelude::{Password, RoleCode, UserId, UserPayload};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Backend {
    requests: Arc<Mutex<Vec<(String, Option<Value>)>>>,
    broken_listing: bool,
    unvalidated_listing: bool,
}

impl Backend {
    fn record(&self, what: String, body: Option<Value>) {
        self.requests.lock().unwrap().push((what, body));
    }

    fn requests(&self) -> Vec<(String, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }
}

// Saved by a client that never checked its inputs.
fn unvalidated() -> Value {
    json!({
        "id": 3,
        "nombre": "Sin rol",
        "correo": null,
        "contraseña": "x",
        "rol": ""
    })
}

fn ana() -> Value {
    json!({
        "id": 5,
        "nombre": "Ana",
        "correo": "a@x.com",
        "contraseña": "p",
        "rol": "1"
    })
}

async fn list(State(backend): State<Backend>) -> Json<Value> {
    backend.record("GET /usuarios/".into(), None);
    if backend.broken_listing {
        Json(json!({ "error": "base de datos no disponible" }))
    } else if backend.unvalidated_listing {
        Json(json!([ana(), unvalidated(), { "id": 6, "nombre": "Luis", "rol": 2 }]))
    } else {
        Json(json!([ana(), { "id": 6, "nombre": "Luis", "rol": 2 }]))
    }
}

async fn item(State(backend): State<Backend>, Path(id): Path<u64>) -> impl IntoResponse {
    backend.record(format!("GET /usuarios/{id}"), None);
    if id == 5 {
        (StatusCode::OK, Json(ana()))
    } else if id == 3 {
        (StatusCode::OK, Json(unvalidated()))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Usuario no encontrado" })),
        )
    }
}

async fn create(State(backend): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    backend.record("POST /usuarios/crear".into(), Some(body));
    Json(json!({ "success": "OK" }))
}

async fn edit(
    State(backend): State<Backend>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    backend.record(format!("POST /usuarios/{id}/editar"), Some(body));
    Json(json!({ "success": "Usuario actualizado" }))
}

async fn remove(State(backend): State<Backend>, Path(id): Path<u64>) -> Json<Value> {
    backend.record(format!("DELETE /usuarios/{id}/eliminar"), None);
    Json(json!({ "success": "Usuario eliminado" }))
}

async fn spawn_backend(backend: Backend) -> SocketAddr {
    let router = Router::new()
        .route("/usuarios/", get(list))
        .route("/usuarios/crear", post(create))
        .route("/usuarios/{id}", get(item))
        .route("/usuarios/{id}/editar", post(edit))
        .route("/usuarios/{id}/eliminar", delete(remove))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn adapter(addr: SocketAddr) -> UserAdminApiAdapter {
    let client = ApiClient::new(format!("http://{addr}/"), Duration::from_secs(5), false)
        .unwrap();
    UserAdminApiAdapter::new(Arc::new(client))
}

fn payload() -> UserPayload {
    UserPayload {
        name: "Luis".into(),
        email: "l@x.com".into(),
        password: Password::new("s3cret"),
        role: RoleCode(2),
    }
}

#[tokio::test]
async fn get_user_decodes_spanish_fields() {
    let backend = Backend::default();
    let service = adapter(spawn_backend(backend.clone()).await);

    let user = service.get_user(UserId(5)).await.unwrap();
    assert_eq!(user.id, UserId(5));
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(user.password.expose(), "p");
    assert_eq!(user.role, Some(RoleCode::ADMIN));
    assert_eq!(backend.requests()[0].0, "GET /usuarios/5");
}

#[tokio::test]
async fn missing_user_is_a_404_status_error() {
    let service = adapter(spawn_backend(Backend::default()).await);

    let err = service.get_user(UserId(9)).await.unwrap_err();
    assert!(err.is_not_found(), "{err}");
    assert!(err.to_string().contains("/usuarios/9"));
}

#[tokio::test]
async fn listing_tolerates_partial_records() {
    let service = adapter(spawn_backend(Backend::default()).await);

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].name, "Luis");
    assert!(users[1].email.is_empty());
    assert_eq!(users[1].role, Some(RoleCode(2)));
}

#[tokio::test]
async fn unvalidated_record_does_not_hide_the_rest_of_the_listing() {
    let backend = Backend {
        unvalidated_listing: true,
        ..Backend::default()
    };
    let service = adapter(spawn_backend(backend).await);

    let users = service.list_users().await.unwrap();
    let ids: Vec<UserId> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![UserId(5), UserId(3), UserId(6)]);
    assert_eq!(users[1].role, None);
    assert!(users[1].email.is_empty());
    assert_eq!(users[2].role, Some(RoleCode(2)));
}

#[tokio::test]
async fn unvalidated_record_can_still_be_searched() {
    let service = adapter(spawn_backend(Backend::default()).await);

    let user = service.get_user(UserId(3)).await.unwrap();
    assert_eq!(user.name, "Sin rol");
    assert!(user.email.is_empty());
    assert_eq!(user.password.expose(), "x");
    assert_eq!(user.role, None);
}

#[tokio::test]
async fn non_array_listing_is_an_unexpected_shape() {
    let backend = Backend {
        broken_listing: true,
        ..Backend::default()
    };
    let service = adapter(spawn_backend(backend).await);

    let err = service.list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::UnexpectedShape { .. }), "{err:?}");
}

#[tokio::test]
async fn mutations_hit_their_endpoints_with_wire_bodies() {
    let backend = Backend::default();
    let service = adapter(spawn_backend(backend.clone()).await);

    let created = service.create_user(&payload()).await.unwrap();
    assert_eq!(created.success, "OK");
    let updated = service.update_user(UserId(5), &payload()).await.unwrap();
    assert_eq!(updated.success, "Usuario actualizado");
    let deleted = service.delete_user(UserId(5)).await.unwrap();
    assert_eq!(deleted.success, "Usuario eliminado");

    let wire = json!({
        "nombre": "Luis",
        "correo": "l@x.com",
        "contraseña": "s3cret",
        "rol": 2
    });
    assert_eq!(
        backend.requests(),
        vec![
            ("POST /usuarios/crear".to_string(), Some(wire.clone())),
            ("POST /usuarios/5/editar".to_string(), Some(wire)),
            ("DELETE /usuarios/5/eliminar".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = adapter(addr).list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
    assert!(err.status().is_none());
}
