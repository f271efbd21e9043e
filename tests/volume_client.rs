mod common;

use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use volume_link::error::Error;
use volume_link::scale::{byte_to_volume, MAX_STATE_VOLUME};
use volume_link::{Endpoint, VolumeClient, VolumeScale};

async fn peer() -> (TcpListener, Endpoint) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, Endpoint::new(true, "127.0.0.1", port))
}

#[tokio::test]
async fn test_get_volume_round_trip() {
    let (listener, endpoint) = peer().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1];
        stream.read_exact(&mut request).await.unwrap();
        stream.write_all(&[0xFF]).await.unwrap();

        // The client closes its side once it has the reply
        let mut rest = Vec::new();
        let closed = tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut rest))
            .await
            .map(|r| r.unwrap())
            .ok();
        (request[0], closed, rest)
    });

    let client = VolumeClient::new(endpoint);
    let volume = client.get_volume(Duration::from_secs(1)).await;

    assert_eq!(volume, Some(byte_to_volume(255)));
    assert_eq!(volume, Some(MAX_STATE_VOLUME));
    let (request, closed, rest) = server.await.unwrap();
    assert_eq!(request, 0x00);
    assert_eq!(closed, Some(0), "client left the connection open");
    assert!(rest.is_empty());
}

#[tokio::test]
async fn test_get_volume_uses_custom_scale() {
    let (listener, endpoint) = peer().await;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1];
        stream.read_exact(&mut request).await.unwrap();
        stream.write_all(&[0x7F]).await.unwrap();
    });

    let client = VolumeClient::with_scale(endpoint, VolumeScale::new(100).unwrap());
    assert_eq!(client.get_volume(Duration::from_secs(1)).await, Some(50));
}

#[tokio::test]
async fn test_get_volume_times_out_on_silent_peer() {
    let (listener, endpoint) = peer().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let client = VolumeClient::new(endpoint);
    let start = Instant::now();
    let volume = client.get_volume(Duration::from_millis(50)).await;
    let elapsed = start.elapsed();

    assert_eq!(volume, None);
    assert!(elapsed >= Duration::from_millis(40), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(500), "returned after {:?}", elapsed);
}

#[tokio::test]
async fn test_get_volume_closes_connection_after_timeout() {
    let (listener, endpoint) = peer().await;

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut received))
            .await
            .map(|r| r.unwrap())
            .ok()
            .map(|_| received)
    });

    let client = VolumeClient::new(endpoint);
    assert_eq!(client.get_volume(Duration::from_millis(50)).await, None);

    // Only the request marker arrives before the client hangs up
    assert_eq!(server.await.unwrap(), Some(vec![0x00]));
}

#[tokio::test]
async fn test_try_get_volume_reports_timeout() {
    let (listener, endpoint) = peer().await;

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let client = VolumeClient::new(endpoint);
    let result = client.try_get_volume(Duration::from_millis(50)).await;
    assert!(matches!(result, Err(Error::Timeout(_))));
}

#[tokio::test]
async fn test_get_volume_peer_closes_without_reply() {
    let (listener, endpoint) = peer().await;

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1];
        let _ = stream.read_exact(&mut request).await;
    });

    let client = VolumeClient::new(endpoint);
    let result = client.try_get_volume(Duration::from_secs(1)).await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_get_volume_connection_refused() {
    let endpoint = Endpoint::new(true, "127.0.0.1", common::free_port());
    let client = VolumeClient::new(endpoint);

    assert_eq!(client.get_volume(Duration::from_secs(1)).await, None);
}

#[tokio::test]
async fn test_disabled_client_opens_no_connection() {
    let (listener, mut endpoint) = peer().await;
    endpoint.enabled = false;

    let client = VolumeClient::new(endpoint);
    assert!(!client.is_enabled());
    assert_eq!(client.get_volume(Duration::from_secs(1)).await, None);
    assert!(client.try_get_volume(Duration::from_secs(1)).await.is_err());
    client.set_volume(1000, Duration::from_secs(1));

    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "disabled client reached the peer");
}

#[test]
fn test_disabled_client_needs_no_runtime() {
    let client = VolumeClient::new(Endpoint::disabled());
    client.set_volume(1000, Duration::from_secs(1));
}

#[tokio::test]
async fn test_set_volume_sends_marker_and_byte() {
    let (listener, endpoint) = peer().await;

    let client = VolumeClient::new(endpoint);
    client.set_volume(byte_to_volume(200), Duration::from_secs(1));

    let (mut stream, _) = tokio::time::timeout(Duration::from_secs(2), listener.accept())
        .await
        .unwrap()
        .unwrap();
    // The push is exactly two bytes, then the client closes
    let mut received = Vec::new();
    tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut received))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received, vec![0x01, 200]);
}

#[tokio::test]
async fn test_set_volume_saturates_above_max() {
    let (listener, endpoint) = peer().await;

    let client = VolumeClient::new(endpoint);
    client.set_volume(MAX_STATE_VOLUME + 5000, Duration::from_secs(1));

    let (mut stream, _) = tokio::time::timeout(Duration::from_secs(2), listener.accept())
        .await
        .unwrap()
        .unwrap();
    let mut buf = [0u8; 2];
    stream.read_exact(&mut buf).await.unwrap();
    assert_eq!(buf, [0x01, 0xFF]);
}

#[tokio::test]
async fn test_set_volume_returns_immediately_when_unreachable() {
    // TEST-NET-1, never routed
    let client = VolumeClient::new(Endpoint::new(true, "192.0.2.1", 9));

    let start = Instant::now();
    client.set_volume(1000, Duration::from_secs(5));
    let elapsed = start.elapsed();

    // Only a task spawn happens on the caller's side; 5ms leaves room for a loaded machine
    assert!(elapsed < Duration::from_millis(5), "set_volume blocked for {:?}", elapsed);
}
