//! Contract checks run against every bridge implementation.

use kitsu_publisher_bridge::{BridgeHandle, BridgeSlot, HostBridge, MockBridge, NativeBridge};
use serde_json::{json, Value};
use std::sync::Arc;

async fn host_bridge() -> (tempfile::TempDir, BridgeHandle) {
    let dir = tempfile::tempdir().unwrap();
    let bridge = HostBridge::open(dir.path()).await.unwrap();
    (dir, BridgeHandle::new(bridge))
}

fn mock_bridge() -> BridgeHandle {
    BridgeHandle::new(MockBridge::new())
}

async fn check_setting_roundtrip(bridge: &dyn NativeBridge) {
    let values = [
        json!(null),
        json!(false),
        json!(0),
        json!("text"),
        json!([1, "two", {"three": 3}]),
        json!({"nested": {"deep": [true, null]}}),
    ];
    for (i, value) in values.into_iter().enumerate() {
        let key = format!("key_{i}");
        assert!(bridge.save_setting(&key, value.clone()).await.unwrap());
        assert_eq!(bridge.get_setting(&key).await.unwrap(), Some(value));
    }
}

async fn check_unknown_setting(bridge: &dyn NativeBridge) {
    assert_eq!(bridge.get_setting("no_such_key").await.unwrap(), None);
    assert_eq!(bridge.get_setting("").await.unwrap(), None);
}

async fn check_session_lifecycle(bridge: &dyn NativeBridge) {
    assert_eq!(bridge.get_session().await.unwrap(), None);

    let tokens = json!({"access_token": "a", "refresh_token": "r", "expires_in": 3600});
    assert!(bridge
        .save_session(tokens.clone(), "http://localhost:8000")
        .await
        .unwrap());
    assert_eq!(bridge.get_session().await.unwrap(), Some(tokens.clone()));
    // Reading does not consume.
    assert_eq!(bridge.get_session().await.unwrap(), Some(tokens));

    let newer = json!(["opaque", 1]);
    assert!(bridge
        .save_session(newer.clone(), "https://kitsu.example.com")
        .await
        .unwrap());
    assert_eq!(bridge.get_session().await.unwrap(), Some(newer));

    assert!(bridge.clear_session().await.unwrap());
    assert_eq!(bridge.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn host_bridge_honors_contract() {
    let (_dir, bridge) = host_bridge().await;
    check_setting_roundtrip(&*bridge).await;
    check_unknown_setting(&*bridge).await;
    check_session_lifecycle(&*bridge).await;
    assert_eq!(bridge.select_folder().await.unwrap(), None);
}

#[tokio::test]
async fn mock_bridge_honors_contract() {
    let bridge = mock_bridge();
    check_setting_roundtrip(&*bridge).await;
    check_unknown_setting(&*bridge).await;
    check_session_lifecycle(&*bridge).await;
    assert_eq!(bridge.select_folder().await.unwrap(), None);
}

#[tokio::test]
async fn session_and_settings_are_independent() {
    let (_dir, bridge) = host_bridge().await;
    bridge.save_session(json!("tok"), "h").await.unwrap();
    bridge.save_setting("theme", json!("dark")).await.unwrap();

    bridge.clear_session().await.unwrap();
    assert_eq!(bridge.get_setting("theme").await.unwrap(), Some(json!("dark")));
    assert_eq!(bridge.get_setting("session").await.unwrap(), Some(Value::Null));
}

#[tokio::test]
async fn calls_fail_until_host_installs_bridge() {
    let slot = Arc::new(BridgeSlot::new());
    assert!(slot.get().is_err());

    let frontend = {
        let slot = Arc::clone(&slot);
        tokio::spawn(async move {
            let bridge = slot.ready().await.unwrap();
            bridge.save_setting("ready", json!(true)).await.unwrap()
        })
    };

    let (_dir, handle) = host_bridge().await;
    slot.install(handle).unwrap();

    assert!(frontend.await.unwrap());
    let bridge = slot.get().unwrap();
    assert_eq!(bridge.get_setting("ready").await.unwrap(), Some(json!(true)));
}
