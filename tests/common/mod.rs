use std::convert::Infallible;
use std::net::{SocketAddr, TcpListener as StdListener};
use std::sync::OnceLock;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Response, Server};
use tokio::net::TcpListener;
use tokio::runtime::{Builder, Handle, Runtime};
use url::form_urlencoded;

/// Multi-threaded runtime hosting the flood and the local targets. It lives
/// in a static so it outlives every per-test actix system.
pub fn flood_runtime() -> Handle {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME
        .get_or_init(|| {
            Builder::new_multi_thread()
                .worker_threads(4)
                .thread_name("test-flood")
                .enable_all()
                .build()
                .expect("flood runtime")
        })
        .handle()
        .clone()
}

/// Target answering every GET immediately with `200 ok`.
pub fn fast_target() -> SocketAddr {
    let handle = flood_runtime();
    let _guard = handle.enter();

    let make_svc = make_service_fn(|_conn| async {
        Ok::<_, Infallible>(service_fn(|_req| async {
            Ok::<_, Infallible>(Response::new(Body::from("ok")))
        }))
    });
    let server = Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(make_svc);
    let addr = server.local_addr();
    handle.spawn(server);
    addr
}

/// Target that accepts connections and never writes a byte back.
pub fn hung_target() -> SocketAddr {
    let std_listener = StdListener::bind("127.0.0.1:0").unwrap();
    std_listener.set_nonblocking(true).unwrap();
    let addr = std_listener.local_addr().unwrap();

    flood_runtime().spawn(async move {
        let listener = TcpListener::from_std(std_listener).unwrap();
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Address with nothing listening on it.
pub fn refused_target() -> SocketAddr {
    let listener = StdListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn trigger_uri(path: &str, pairs: &[(&str, &str)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (k, v) in pairs {
        query.append_pair(k, v);
    }
    format!("{}?{}", path, query.finish())
}
