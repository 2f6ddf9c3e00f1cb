//! Canned local HTTP server for download tests
//!
//! Serves a fixed list of byte-for-byte responses on a loopback socket,
//! one per accepted connection, then exits.

#![allow(dead_code)] // not every test crate uses every helper

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Spawn a server that answers each accepted connection with the next
/// canned response. Returns the base URL and the server thread handle;
/// joining the handle yields the number of requests served.
pub fn spawn_http_server(responses: Vec<Vec<u8>>) -> (String, thread::JoinHandle<usize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind localhost");
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut served = 0;
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                break;
            };
            read_request(&mut stream);
            if stream.write_all(&response).is_ok() {
                let _ = stream.flush();
                served += 1;
            }
        }
        served
    });

    (format!("http://{}", addr), handle)
}

/// Build an HTTP/1.1 response with a Content-Length header
pub fn response_with_body(status: &str, body: &[u8]) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}

/// Build an HTTP/1.1 response that omits Content-Length and signals the
/// body end by closing the connection
pub fn response_without_length(body: &[u8]) -> Vec<u8> {
    let mut response = b"HTTP/1.1 200 OK\r\nConnection: close\r\n\r\n".to_vec();
    response.extend_from_slice(body);
    response
}

fn read_request(stream: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 1024];
    loop {
        match stream.read(&mut tmp) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&tmp[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}
