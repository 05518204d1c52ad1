// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Accept connections on `listener` until `shutdown` resolves.
///
/// `shutdown` yields a label for the log line. The listener is dropped on the
/// way out; connections already handed to their own tasks are not awaited.
pub async fn start_server_loop<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F)
where
    F: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown(signal);
                break;
            }
        }
    }

    drop(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::listener::bind_listener;
    use std::fs;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn roundtrip(addr: std::net::SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        String::from_utf8_lossy(&raw).to_ascii_lowercase()
    }

    #[tokio::test]
    async fn test_serves_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("MTL")).unwrap();
        fs::write(dir.path().join("MTL/demand.json"), br#"{"points":[]}"#).unwrap();

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::for_root(dir.path()));

        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(start_server_loop(listener, state, async move {
            let _ = rx.await;
            "test"
        }));

        let ok = roundtrip(
            addr,
            "GET /MTL/demand HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(ok.starts_with("http/1.1 200 ok"), "got: {ok}");
        assert!(ok.contains("content-type: application/json"));
        assert!(ok.contains("access-control-allow-origin: *"));
        assert!(ok.ends_with(r#"{"points":[]}"#));

        let missing = roundtrip(
            addr,
            "GET /MTL/thumbnail HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(missing.starts_with("http/1.1 404 not found"), "got: {missing}");
        assert!(missing.contains("access-control-allow-origin: *"));
        assert!(missing.contains("not found: /mtl/thumbnail"));

        let preflight = roundtrip(
            addr,
            "OPTIONS /MTL/demand.json HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(preflight.starts_with("http/1.1 204 no content"), "got: {preflight}");
        assert!(preflight.contains("access-control-allow-methods: get, options"));

        tx.send(()).unwrap();
        server.await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
