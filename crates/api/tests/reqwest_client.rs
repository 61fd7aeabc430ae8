#![cfg(feature = "reqwest")]

use feedkit_api::client::error::ErrorKind as TransportErrorKind;
use feedkit_api::error::ErrorKind;
use feedkit_api::{ClientHandle, HttpClient, RemoteFeedLoader, ReqwestClient};
use feedkit_core::LoaderExt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Serve exactly one canned HTTP response, then close the connection.
async fn serve_once(response: &'static [u8]) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        socket.write_all(response).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    url_for(address)
}

fn url_for(address: SocketAddr) -> Url {
    Url::parse(&format!("http://{address}/v1/feed")).unwrap()
}

fn client() -> ReqwestClient {
    ReqwestClient::new(Some(Duration::from_secs(5))).unwrap()
}

#[tokio::test]
async fn test_delivers_body_and_status() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello").await;
    let (sender, receiver) = oneshot::channel();
    let _task = client().get(&url, Box::new(move |result| {
        _ = sender.send(result);
    }));
    let (body, response) = receiver.await.unwrap().unwrap();
    assert_eq!(&body[..], b"hello");
    assert_eq!(response.status, 200);
    assert_eq!(response.url, url);
}

#[tokio::test]
async fn test_non_success_status_is_not_a_transport_error() {
    let url = serve_once(b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found").await;
    let (sender, receiver) = oneshot::channel();
    let _task = client().get(&url, Box::new(move |result| {
        _ = sender.send(result);
    }));
    let (body, response) = receiver.await.unwrap().unwrap();
    assert_eq!(&body[..], b"not found");
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn test_refused_connection_is_a_connect_error() {
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (sender, receiver) = oneshot::channel();
    let _task = client().get(&url_for(address), Box::new(move |result| {
        _ = sender.send(result);
    }));
    let err = receiver.await.unwrap().unwrap_err();
    assert_eq!(*err, TransportErrorKind::Connect);
}

#[tokio::test]
async fn test_cancel_aborts_request_without_completion() {
    // Bound but never accepting: the request hangs until aborted.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = url_for(listener.local_addr().unwrap());
    let (sender, receiver) = oneshot::channel();
    let task = client().get(&url, Box::new(move |result| {
        _ = sender.send(result);
    }));
    task.cancel();
    // The aborted future drops the completion, and with it the sender.
    assert!(receiver.await.is_err());
    drop(listener);
}

#[tokio::test]
async fn test_remote_feed_loader_end_to_end() {
    let url = serve_once(b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 12\r\nConnection: close\r\n\r\n{\"items\":[]}").await;
    let loader = RemoteFeedLoader::feed(Arc::new(client()) as ClientHandle);
    assert_eq!(loader.fetch(&url).await.unwrap().unwrap(), vec![]);
}

#[tokio::test]
async fn test_remote_feed_loader_reports_connectivity() {
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let loader = RemoteFeedLoader::feed(Arc::new(client()) as ClientHandle);
    let err = loader.fetch(&url_for(address)).await.unwrap().unwrap_err();
    assert_eq!(*err, ErrorKind::Connectivity);
}
