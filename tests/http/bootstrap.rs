use std::io::Write;

use guestbook::api::{http, Api};
use guestbook::{Config, SignatureStore};
use serde_json::Value;
use tempfile::NamedTempFile;

#[tokio::test]
async fn serves_seeded_store_until_shutdown() {
    let mut seed = NamedTempFile::new().unwrap();
    writeln!(seed, r#"[{{"id": 10, "name": "Grace Hopper"}}]"#).unwrap();

    let config = Config {
        seed_file: Some(seed.path().to_path_buf()),
        ..Config::default()
    };
    let store = SignatureStore::new();
    store.set_all(config.read_seed().unwrap().unwrap());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(http::serve_with_shutdown(
        Api::new(store),
        listener,
        async move {
            let _ = stop_rx.await;
        },
    ));

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("{base}/signatures/10"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["signature"]["name"], "Grace Hopper");

    drop(client);
    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
}
