//! Client against live servers over real HTTP.
//!
//! # Design
//! Starts the todo server (memory store) on a random port and exercises every
//! `TodoClient` operation with ureq, so request building and response parsing
//! are validated end to end. A tiny Axum app stands in for the remote
//! document endpoint of the strict fetcher.

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;
use todo_client::{
    build_fetch, parse_fetch, ApiError, CreateTodo, FetchError, HttpMethod, HttpRequest,
    HttpResponse, RemoteTodo, TodoClient, UpdateTodo,
};
use todo_server::AppState;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Patch, Some(body)) => agent
            .patch(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Patch, None) => agent.patch(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Serve `app` on a background thread and return its address.
fn spawn(app: Router) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener, app, std::future::pending()).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let addr = spawn(todo_server::app(AppState::in_memory()));
    let client = TodoClient::new(&format!("http://{addr}"));

    // Step 1: banner.
    let info = client
        .parse_service_info(execute(client.build_service_info()))
        .unwrap();
    assert_eq!(info.message, "Todo API is running!");

    // Step 2: list is empty.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()))
        .unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 3: create without body is rejected.
    let req = client
        .build_create_todo(&CreateTodo {
            body: String::new(),
            completed: None,
        })
        .unwrap();
    let err = client.parse_create_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Todo body is required"));

    // Step 4: create a todo.
    let req = client
        .build_create_todo(&CreateTodo {
            body: "buy milk".to_string(),
            completed: None,
        })
        .unwrap();
    let created = client.parse_create_todo(execute(req)).unwrap();
    assert_eq!(created.body, "buy milk");
    assert!(!created.completed);
    let id = created.id.clone();

    // Step 5: list contains it.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()))
        .unwrap();
    assert_eq!(todos, vec![created]);

    // Step 6: mark completed.
    let req = client
        .build_update_todo(
            &id,
            &UpdateTodo {
                completed: Some(true),
                ..UpdateTodo::default()
            },
        )
        .unwrap();
    let updated = client.parse_update_todo(execute(req)).unwrap();
    assert_eq!(updated.body, "buy milk");
    assert!(updated.completed);

    // Step 7: malformed id.
    let req = client
        .build_update_todo("not-a-valid-id", &UpdateTodo::default())
        .unwrap();
    let err = client.parse_update_todo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid todo ID"));

    // Step 7b: an id containing a slash stays one path segment.
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo("a/b")))
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Invalid todo ID"));

    // Step 8: delete.
    let message = client
        .parse_delete_todo(execute(client.build_delete_todo(&id)))
        .unwrap();
    assert_eq!(message, "Todo deleted successfully");

    // Step 9: delete again is NotFound.
    let err = client
        .parse_delete_todo(execute(client.build_delete_todo(&id)))
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: list is empty again.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()))
        .unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn strict_fetch_against_local_endpoint() {
    let app = Router::new()
        .route(
            "/todos/1",
            get(|| async {
                r#"{"userId":1,"id":1,"title":"delectus aut autem","completed":false}"#
            }),
        )
        .route(
            "/todos/2",
            get(|| async { r#"{"userId":1,"id":2,"title":"x","completed":true,"tags":[]}"# }),
        );
    let addr = spawn(app);

    let todo = parse_fetch(execute(build_fetch(&format!("http://{addr}/todos/1")))).unwrap();
    assert_eq!(
        todo,
        RemoteTodo {
            user_id: 1,
            id: 1,
            title: "delectus aut autem".to_string(),
            completed: false,
        }
    );

    let err = parse_fetch(execute(build_fetch(&format!("http://{addr}/todos/2")))).unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));

    let err = parse_fetch(execute(build_fetch(&format!("http://{addr}/todos/3")))).unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}
