#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use lottery_core::draw::{DrawRequest, DrawResult};
use lottery_core::error::DrawError;
use lottery_core::service::RandomService;

/// Service whose draws block until the test releases an answer.
pub struct GatedService {
    answers: Mutex<Receiver<Result<Vec<u32>, DrawError>>>,
}

impl GatedService {
    pub fn new() -> (Self, Sender<Result<Vec<u32>, DrawError>>) {
        let (sender, receiver) = std::sync::mpsc::channel();
        (
            Self {
                answers: Mutex::new(receiver),
            },
            sender,
        )
    }
}

impl RandomService for GatedService {
    fn request_draw(&self, request: &DrawRequest) -> Result<DrawResult, DrawError> {
        let answer = self
            .answers
            .lock()
            .expect("gate lock")
            .recv()
            .expect("test released an answer");
        let numbers = answer?;
        Ok(DrawResult::from_numbers(request, numbers)?)
    }
}

/// Serve exactly one HTTP response on a loopback port.
///
/// The handle yields the raw request the server received.
pub fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let url = format!("http://{}/json-rpc/1/invoke", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().ok();
        request
    });
    (url, handle)
}

/// Accept one connection and never answer it.
pub fn serve_silence(hold_for: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let url = format!("http://{}/invoke", listener.local_addr().unwrap());
    std::thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            std::thread::sleep(hold_for);
            drop(stream);
        }
    });
    url
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let read = stream.read(&mut chunk).expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
        if let Some(header_end) = find_header_end(&buffer) {
            let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}
