//! End-to-end catalogue test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every `Clockify`
//! operation over real HTTP through `UreqTransport`.

use clockify_core::{Clockify, ClockifyConfig, ClockifyError, HttpMethod, ApiBase};
use mock_server::{generate_users, Seed};

const KEY: &str = "integration-key";
const WS: &str = "5e5b8b0a9c1f2a0007d1e2f3";

/// Serve `seed` on a random port and return the base address.
fn start_server(seed: Seed) -> String {
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
            mock_server::run(listener, seed).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn api_for(base: &str, key: &str) -> Clockify {
    Clockify::new(ClockifyConfig::new(key).with_endpoints(&format!("{base}/api"), &format!("{base}/api/v1")))
}

#[test]
fn catalogue_lifecycle() {
    let base = start_server(Seed::new(KEY).with_users(WS, generate_users(120)));
    let api = api_for(&base, KEY);

    // Step 1: users span three pages of 50.
    let users = api.list_users(WS).unwrap();
    assert_eq!(users.len(), 120);
    assert_eq!(users[0].email, "user0@example.com");
    assert_eq!(users[119].email, "user119@example.com");

    // Step 2: email lookup.
    let alice = api.find_user_by_email(WS, "user7@example.com").unwrap();
    assert_eq!(alice.email, "user7@example.com");
    let err = api.find_user_by_email(WS, "nobody@example.com").unwrap_err();
    assert!(matches!(err, ClockifyError::UserNotFound { .. }));

    // Step 3: clients, exact-name lookup despite substring matches.
    api.create_client(WS, "Acme Holdings").unwrap();
    let acme = api.create_client(WS, "Acme").unwrap();
    let found = api.find_client_by_name(WS, "Acme").unwrap();
    assert_eq!(found.id, acme.id);
    let err = api.find_client_by_name(WS, "Acm").unwrap_err();
    assert!(matches!(err, ClockifyError::ClientNotFound { .. }));

    // Step 4: create a project with two members.
    let bob = &users[1];
    let project = api
        .create_project(WS, "Website", Some(acme.id.as_str()), [alice.id.clone(), bob.id.clone()])
        .unwrap();
    assert_eq!(project.client_id.as_deref(), Some(acme.id.as_str()));
    assert!(project.billable);
    assert!(!project.public);
    assert_eq!(project.member_ids(), vec![alice.id.clone(), bob.id.clone()]);
    let id = project.id.clone();

    // Step 5: add a member twice; the set does not grow the second time.
    let carol = &users[2];
    api.add_project_member(WS, &id, &carol.id).unwrap();
    let after_second = api.add_project_member(WS, &id, &carol.id).unwrap();
    assert_eq!(
        after_second.member_ids(),
        vec![alice.id.clone(), bob.id.clone(), carol.id.clone()]
    );
    assert_eq!(api.list_project_members(WS, &id).unwrap().len(), 3);

    // Step 6: rename keeps everything else.
    let renamed = api.update_project_name(WS, &id, "Website v2").unwrap();
    assert_eq!(renamed.name, "Website v2");
    assert_eq!(renamed.color, project.color);
    assert!(renamed.billable);

    // Step 7: archive and restore through the v1 update.
    assert!(api.archive_project(WS, &id).unwrap().archived);
    assert!(api.get_project(WS, &id).unwrap().archived);
    assert!(!api.restore_project(WS, &id).unwrap().archived);

    // Step 8: archive and restore through the unversioned endpoints.
    let closed = api.close_project(WS, &id).unwrap();
    assert_eq!(closed["archived"], true);
    api.reopen_project(WS, &id).unwrap();
    assert!(!api.get_project(WS, &id).unwrap().archived);

    // Step 9: generic dispatch.
    let raw = api
        .execute(
            HttpMethod::Get,
            ApiBase::Versioned,
            &format!("/workspaces/{WS}/projects/{id}"),
            &[],
            None,
        )
        .unwrap();
    assert_eq!(raw["name"], "Website v2");

    // Step 10: unknown project is a 404 with the body intact.
    let err = api.get_project(WS, "000000000000000000000000").unwrap_err();
    match err {
        ClockifyError::HttpRequest { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Project"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn wrong_api_key_is_rejected() {
    let base = start_server(Seed::new(KEY));
    let api = api_for(&base, "not-the-key");

    let err = api.list_users(WS).unwrap_err();
    assert_eq!(err.status(), Some(401));
}

#[test]
fn unreachable_server_is_transport_error() {
    // Bind and drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let api = api_for(&format!("http://127.0.0.1:{port}"), KEY);

    let err = api.get_project(WS, "p1").unwrap_err();
    assert!(matches!(err, ClockifyError::Transport(_)));
}
