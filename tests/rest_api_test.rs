use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pacs_server_monitor::common::config::{MonitorConfig, StorageType};
use pacs_server_monitor::common::liveness::{LivenessRecord, Reachability};
use pacs_server_monitor::common::query::{ServerQuery, StatusFilter};
use pacs_server_monitor::common::server::ServerDescriptor;
use pacs_server_monitor::rest::panels::{get_panels, render_panel};
use pacs_server_monitor::rest::refresh::refresh_server;
use pacs_server_monitor::rest::servers::{add_server, delete_server, get_servers, update_server};
use pacs_server_monitor::rest::status::get_status;
use pacs_server_monitor::rest::transfer::{ExportRequest, ImportRequest, export_to_file, import_servers};
use pacs_server_monitor::server::context::MonitorContext;
use pacs_server_monitor::server::loader::load_server_store;
use pacs_server_monitor::server::rest_server::build_router;
use pacs_server_monitor::traits::server_store::ServerStore;

fn context() -> MonitorContext {
    context_with(MonitorConfig::default())
}

fn context_with(base: MonitorConfig) -> MonitorContext {
    let config = MonitorConfig {
        store_type: StorageType::Memory,
        ping_program: "/nonexistent/ping".to_string(),
        ..base
    };
    let store = load_server_store(&config);
    MonitorContext::new(config, store)
}

#[tokio::test]
async fn add_list_update_delete() {
    let ctx = context();
    let server = ServerDescriptor::new("PACS-01", "10.0.0.5").with_tags(&["pacs"]);

    let (status, _) = add_server(State(ctx.clone()), Json(server.clone())).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let err = add_server(State(ctx.clone()), Json(server.clone())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);

    let renamed = ServerDescriptor {
        name: "PACS-main".to_string(),
        ..server.clone()
    };
    update_server(State(ctx.clone()), Path("10.0.0.5".to_string()), Json(renamed))
        .await
        .unwrap();
    let mismatch = update_server(State(ctx.clone()), Path("10.0.0.6".to_string()), Json(server.clone()))
        .await
        .unwrap_err();
    assert_eq!(mismatch.status, StatusCode::BAD_REQUEST);

    let Json(page) = get_servers(State(ctx.clone()), Query(ServerQuery::default()))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0].server.name, "PACS-main");
    assert_eq!(page.rows[0].liveness.reachable, Reachability::Unknown);

    let status = delete_server(State(ctx.clone()), Path("10.0.0.5".to_string()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);
    let missing = delete_server(State(ctx.clone()), Path("10.0.0.5".to_string()))
        .await
        .unwrap_err();
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_blank_address() {
    let ctx = context();
    let err = add_server(State(ctx), Json(ServerDescriptor::new("x", "  ")))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn refresh_single_server_never_leaves_unknown() {
    let ctx = context();
    add_server(State(ctx.clone()), Json(ServerDescriptor::new("A", "127.0.0.1").with_port(1, "reserved")))
        .await
        .unwrap();

    let (status, Json(body)) = refresh_server(State(ctx.clone()), Path("127.0.0.1".to_string()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    // the ping program does not exist, which reads as unreachable
    assert_eq!(body["liveness"]["reachable"], "unreachable");
    assert_eq!(body["liveness"]["port_states"]["1"], "closed");
    assert_eq!(ctx.generation(), 1);

    let unknown = refresh_server(State(ctx.clone()), Path("10.9.9.9".to_string()))
        .await
        .unwrap_err();
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let Json(status) = get_status(State(ctx.clone())).await;
    assert_eq!(status["generation"], 1);
    assert_eq!(status["refreshing"], false);
    assert_eq!(status["records"]["127.0.0.1"]["reachable"], "unreachable");
}

#[tokio::test]
async fn status_filter_and_panels_use_cache() {
    let ctx = context();
    let Json(summary) = import_servers(
        State(ctx.clone()),
        Json(ImportRequest::Inline {
            servers: vec![
                ServerDescriptor::new("up", "10.0.0.1").with_tags(&["pacs"]),
                ServerDescriptor::new("down", "10.0.0.2").with_tags(&["pacs"]),
                ServerDescriptor::new("new", "10.0.0.3"),
            ],
        }),
    )
    .await
    .unwrap();
    assert_eq!(summary.added, 3);

    ctx.cache.set_record("10.0.0.1", LivenessRecord::from_probe(true, &Default::default()));
    ctx.cache.set_record("10.0.0.2", LivenessRecord::from_probe(false, &Default::default()));

    let offline = ServerQuery {
        status: Some(StatusFilter::Offline),
        ..Default::default()
    };
    let Json(page) = get_servers(State(ctx.clone()), Query(offline)).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.rows[0].server.name, "down");

    let Json(panels) = get_panels(State(ctx.clone())).await;
    assert_eq!(panels["panels"][0], "server_status");

    let Json(summary) = render_panel(State(ctx.clone()), Path("summary".to_string()))
        .await
        .unwrap();
    assert_eq!(summary["status"]["online"], 1);
    assert_eq!(summary["status"]["unknown"], 1);
    assert_eq!(summary["tags"]["pacs"], 2);

    let missing = render_panel(State(ctx.clone()), Path("login".to_string()))
        .await
        .unwrap_err();
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_builds_with_all_routes() {
    let _router = build_router(context());
}

#[tokio::test]
async fn transfer_paths_stay_inside_transfer_dir() {
    let dir = tempfile::tempdir().unwrap();
    let transfer_dir = dir.path().join("transfer");
    let ctx = context_with(MonitorConfig {
        transfer_dir: transfer_dir.to_string_lossy().into_owned(),
        ..MonitorConfig::default()
    });
    ctx.store
        .save_server(&ServerDescriptor::new("PACS-01", "10.0.0.5"))
        .await
        .unwrap();

    for escaping in ["../outside.json", "/tmp/outside.json", "backups/../../outside.json"] {
        let err = export_to_file(
            State(ctx.clone()),
            Json(ExportRequest {
                path: escaping.into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = import_servers(
            State(ctx.clone()),
            Json(ImportRequest::File {
                path: escaping.into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
    assert!(!dir.path().join("outside.json").exists());

    let Json(body) = export_to_file(
        State(ctx.clone()),
        Json(ExportRequest {
            path: "backups/servers.json".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(body["exported"], 1);
    assert!(transfer_dir.join("backups").join("servers.json").exists());

    let Json(summary) = import_servers(
        State(ctx.clone()),
        Json(ImportRequest::File {
            path: "backups/servers.json".into(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(summary.replaced, 1);
}
