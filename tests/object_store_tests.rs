use bytes::Bytes;
use deck_share::object_store::{LocalStore, ObjectStore, ObjectStoreError};

#[tokio::test]
async fn test_local_store_put_get() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let data = Bytes::from("deck bytes");
    store
        .put("2nd Year/R1_My_Talk_.pptx", data.clone())
        .await
        .unwrap();

    let retrieved = store.get("2nd Year/R1_My_Talk_.pptx").await.unwrap();
    assert_eq!(retrieved, data);
}

#[tokio::test]
async fn test_local_store_creates_year_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("4th Year/R7_Deep_Dive.ppt", Bytes::from("data"))
        .await
        .unwrap();

    assert!(dir.path().join("4th Year").is_dir());
    assert!(dir.path().join("4th Year/R7_Deep_Dive.ppt").is_file());
}

#[tokio::test]
async fn test_local_store_exists() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    assert!(!store.exists("1st Year/missing.pptx").await.unwrap());

    store
        .put("1st Year/present.pptx", Bytes::from("data"))
        .await
        .unwrap();
    assert!(store.exists("1st Year/present.pptx").await.unwrap());
}

#[tokio::test]
async fn test_local_store_delete() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("3rd Year/to-delete.pptx", Bytes::from("data"))
        .await
        .unwrap();
    assert!(store.exists("3rd Year/to-delete.pptx").await.unwrap());

    store.delete("3rd Year/to-delete.pptx").await.unwrap();
    assert!(!store.exists("3rd Year/to-delete.pptx").await.unwrap());
}

#[tokio::test]
async fn test_local_store_delete_nonexistent() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    // Deleting a nonexistent path should not error
    store.delete("2nd Year/nonexistent.pptx").await.unwrap();
}

#[tokio::test]
async fn test_local_store_get_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let result = store.get("1st Year/missing.pptx").await;
    assert!(matches!(result, Err(ObjectStoreError::NotFound(_))));
}

#[tokio::test]
async fn test_local_store_list_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("3rd Year/R1_A.pptx", Bytes::from("a"))
        .await
        .unwrap();
    store
        .put("3rd Year/R2_B.pptx", Bytes::from("b"))
        .await
        .unwrap();
    store
        .put("1st Year/R3_C.pptx", Bytes::from("c"))
        .await
        .unwrap();

    let listed = store.list("3rd Year/").await.unwrap();
    assert_eq!(listed, vec!["3rd Year/R1_A.pptx", "3rd Year/R2_B.pptx"]);
}

#[tokio::test]
async fn test_local_store_list_empty_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let listed = store.list("2nd Year/").await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_local_store_rejects_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    let result = store.get("../outside.txt").await;
    assert!(matches!(result, Err(ObjectStoreError::InvalidPath(_))));

    let result = store.put("/etc/absolute", Bytes::from("x")).await;
    assert!(matches!(result, Err(ObjectStoreError::InvalidPath(_))));
}

#[tokio::test]
async fn test_local_store_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path()).unwrap();

    store
        .put("1st Year/key.pptx", Bytes::from("first"))
        .await
        .unwrap();
    store
        .put("1st Year/key.pptx", Bytes::from("second"))
        .await
        .unwrap();

    let data = store.get("1st Year/key.pptx").await.unwrap();
    assert_eq!(data, Bytes::from("second"));
}
