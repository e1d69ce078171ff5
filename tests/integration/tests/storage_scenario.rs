//! End-to-end storage scenarios against the in-memory backend.

use biostore_channel::{ChannelServer, MethodResponse};
use biostore_core::config::Config;
use biostore_integration_tests::memory_plugin;
use biostore_secrets::BackendError;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

#[tokio::test]
async fn test_write_read_delete_lifecycle() {
    let (plugin, backend) = memory_plugin(&Config::default());

    let write = plugin
        .call("write", Some(json!({"name": "token", "content": "hunter2"})))
        .await;
    assert_eq!(write, MethodResponse::success(json!(true)));
    assert_eq!(backend.len(), 1);

    let read = plugin.call("read", Some(json!({"name": "token"}))).await;
    assert_eq!(read, MethodResponse::success(json!("hunter2")));

    let delete = plugin.call("delete", Some(json!({"name": "token"}))).await;
    assert_eq!(delete, MethodResponse::success(json!(true)));

    let read = plugin.call("read", Some(json!({"name": "token"}))).await;
    assert_eq!(read, MethodResponse::success(Value::Null));

    let delete = plugin.call("delete", Some(json!({"name": "token"}))).await;
    assert_eq!(delete, MethodResponse::success(json!(false)));
}

#[tokio::test]
async fn test_overwrite_replaces_secret() {
    let (plugin, backend) = memory_plugin(&Config::default());

    for content in ["first", "second"] {
        let response = plugin
            .call("write", Some(json!({"name": "token", "content": content})))
            .await;
        assert!(response.is_success());
    }

    assert_eq!(backend.len(), 1);
    let read = plugin.call("read", Some(json!({"name": "token"}))).await;
    assert_eq!(read, MethodResponse::success(json!("second")));
}

#[tokio::test]
async fn test_init_and_probe() {
    let (plugin, _) = memory_plugin(&Config::default());

    let probe = plugin.call("canAuthenticate", None).await;
    assert_eq!(probe, MethodResponse::success(json!("ErrorHwUnavailable")));

    let init = plugin
        .call("init", Some(json!({"options": {"authenticationRequired": false}})))
        .await;
    assert_eq!(init, MethodResponse::success(json!(true)));

    let init = plugin
        .call("init", Some(json!({"options": {"authenticationRequired": true}})))
        .await;
    assert_eq!(init.error_code(), Some("BadArguments"));
}

#[tokio::test]
async fn test_backend_failure_becomes_security_access_error() {
    let (plugin, backend) = memory_plugin(&Config::default());
    backend.fail_with(BackendError::new("keyring", 2, "collection is locked"));

    let response = plugin.call("read", Some(json!({"name": "token"}))).await;
    match response {
        MethodResponse::Error {
            code,
            message,
            details,
        } => {
            assert_eq!(code, "SecurityAccessError");
            assert_eq!(
                message,
                "Failed to lookup secret: collection is locked (2) (keyring)"
            );
            let details = details.unwrap();
            assert_eq!(details["domain"], "keyring");
            assert_eq!(details["code"], 2);
        }
        other => panic!("expected error, got {other:?}"),
    }

    backend.clear_failure();
    let response = plugin.call("read", Some(json!({"name": "token"}))).await;
    assert_eq!(response, MethodResponse::success(Value::Null));
}

#[tokio::test]
async fn test_scenario_over_channel_server() {
    let (plugin, _) = memory_plugin(&Config::default());
    let server = ChannelServer::new(plugin);

    let (mut client, server_io) = tokio::io::duplex(64 * 1024);
    let (reader, writer) = tokio::io::split(server_io);

    let serve = tokio::spawn(async move { server.serve(reader, writer).await });

    // Each storage call awaits its reply before the next, so backend order is fixed.
    let calls = [
        json!({"id": 1, "method": "write", "args": {"name": "a", "content": "s1"}}),
        json!({"id": 2, "method": "read", "args": {"name": "a"}}),
        json!({"id": 3, "method": "delete", "args": {"name": "a"}}),
        json!({"id": 4, "method": "read", "args": {"name": "a"}}),
    ];

    let mut received = String::new();
    for call in &calls {
        client
            .write_all(format!("{call}\n").as_bytes())
            .await
            .unwrap();
        loop {
            let mut buf = [0u8; 1024];
            let n = client.read(&mut buf).await.unwrap();
            received.push_str(std::str::from_utf8(&buf[..n]).unwrap());
            if received.ends_with('\n') {
                break;
            }
        }
    }
    client.shutdown().await.unwrap();

    let replies: Vec<Value> = received
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 4);
    assert_eq!(replies[0], json!({"id": 1, "status": "success", "result": true}));
    assert_eq!(replies[1], json!({"id": 2, "status": "success", "result": "s1"}));
    assert_eq!(replies[2], json!({"id": 3, "status": "success", "result": true}));
    assert_eq!(replies[3], json!({"id": 4, "status": "success", "result": null}));

    drop(client);
    let stats = serve.await.unwrap().unwrap();
    assert_eq!(stats.received, 4);
    assert_eq!(stats.replied, 4);
}
