//! In-process stub servers for exercising the HTTP providers.

use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral local port and return its base URL
pub(crate) async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind stub server");
    let addr = listener.local_addr().expect("stub server has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("stub server crashed");
    });

    format!("http://{}", addr)
}

/// A base URL nothing listens on
pub(crate) async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    format!("http://{}", addr)
}
