use super::*;
use serde::Deserialize;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Entry {
    value: String,
}

#[tokio::test]
async fn test_get_missing_key_returns_none() {
    let storage = InMemoryStorage::new();

    assert_eq!(storage.get("config").await.unwrap(), None);
}

#[tokio::test]
async fn test_put_then_get_returns_latest_value() {
    let storage = InMemoryStorage::new();

    storage.put("config", b"one".to_vec()).await.unwrap();
    storage.put("config", b"two".to_vec()).await.unwrap();

    assert_eq!(storage.get("config").await.unwrap(), Some(b"two".to_vec()));
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let storage = InMemoryStorage::new();
    storage.put("map/teams/owners", b"x".to_vec()).await.unwrap();

    storage.delete("map/teams/owners").await.unwrap();
    storage.delete("map/teams/owners").await.unwrap();

    assert_eq!(storage.get("map/teams/owners").await.unwrap(), None);
}

#[tokio::test]
async fn test_list_returns_direct_children_only() {
    let storage = InMemoryStorage::new();
    storage.put("config", b"{}".to_vec()).await.unwrap();
    storage.put("map/teams/owners", b"{}".to_vec()).await.unwrap();
    storage.put("map/teams/default", b"{}".to_vec()).await.unwrap();
    storage.put("map/teams/nested/child", b"{}".to_vec()).await.unwrap();
    storage.put("map/users/octocat", b"{}".to_vec()).await.unwrap();

    let keys = storage.list("map/teams/").await.unwrap();

    assert_eq!(keys, vec!["default".to_string(), "owners".to_string()]);
}

#[tokio::test]
async fn test_json_helpers_round_trip() {
    let storage = InMemoryStorage::new();
    let entry = Entry {
        value: "root".to_string(),
    };

    put_json(&storage, "map/teams/owners", &entry).await.unwrap();
    let loaded: Option<Entry> = get_json(&storage, "map/teams/owners").await.unwrap();

    assert_eq!(loaded, Some(entry));
}

#[tokio::test]
async fn test_get_json_reports_corrupt_entries() {
    let storage = InMemoryStorage::new();
    storage.put("config", b"not json".to_vec()).await.unwrap();

    let result: AuthResult<Option<Entry>> = get_json(&storage, "config").await;

    assert!(matches!(result, Err(AuthError::Storage(_))));
}
