// Shared helpers for network tests

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;

/// Reserve a loopback port that nothing is listening on
pub fn free_port() -> u16 {
    let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    probe.local_addr().unwrap().port()
}

/// Connect, retrying while the background listener is still binding
#[allow(dead_code)]
pub async fn connect_with_retry(addr: SocketAddr) -> TcpStream {
    for _ in 0..200 {
        if let Ok(stream) = TcpStream::connect(addr).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("listener on {} never came up", addr);
}
