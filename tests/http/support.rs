//! Test server helpers.

use guestbook::api::{http, Api};
use guestbook::{Signature, SignatureStore};

/// Bind to port 0 and return the base URL.
pub async fn start_server(store: SignatureStore) -> String {
    let app = http::router(Api::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn start_seeded(signatures: Vec<Signature>) -> (String, SignatureStore) {
    let store = SignatureStore::from(signatures);
    let base = start_server(store.clone()).await;
    (base, store)
}
