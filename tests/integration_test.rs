//! Tests de integración para el servidor de eco
//! tests/integration_test.rs
//!
//! Cada test arranca el servidor real en un puerto efímero (puerto 0) y
//! habla con él por un socket TCP, como haría la herramienta de proxy
//! que este servidor existe para probar.

use post_server::config::Config;
use post_server::server::Server;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Crea un directorio temporal único para usarlo como raíz de archivos
fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("post_server_it_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Arranca el servidor en un puerto efímero y retorna su dirección
fn start_server(root: &PathBuf) -> SocketAddr {
    let mut config = Config::default();
    config.port = 0;
    config.root_dir = root.to_string_lossy().into_owned();

    let mut server = Server::new(config);
    server.bind().expect("bind");
    let addr = server.local_addr().expect("local addr");

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");

    // Configurar timeouts
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream
        .set_write_timeout(Some(Duration::from_secs(5)))
        .unwrap();

    stream.write_all(raw).expect("write");
    stream.flush().expect("flush");
    stream.shutdown(std::net::Shutdown::Write).expect("shutdown");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).expect("read");

    response
}

/// Helper: separa la response en (head, body)
fn split_response(response: &[u8]) -> (String, &[u8]) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response sin separador de headers");
    let head = String::from_utf8_lossy(&response[..pos]).into_owned();
    (head, &response[pos + 4..])
}

#[test]
fn test_post_echo_hello() {
    let root = temp_root("echo_hello");
    let addr = start_server(&root);

    let response = send_raw(addr, b"POST / HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello");
    let (head, body) = split_response(&response);

    assert!(head.contains("200 OK"), "Expected 200 OK, got: {}", head);
    assert!(head.contains("Content-Type: text/html"));
    assert_eq!(body, b"hello");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_post_without_content_length_returns_empty_body() {
    let root = temp_root("echo_empty");
    let addr = start_server(&root);

    let response = send_raw(addr, b"POST / HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("200 OK"));
    assert!(head.contains("Content-Type: text/html"));
    assert!(body.is_empty(), "Expected empty body, got {} bytes", body.len());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_post_large_body_roundtrip() {
    let root = temp_root("echo_large");
    let addr = start_server(&root);

    // 10.000 bytes arbitrarios (no todos UTF-8)
    let body: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
    let mut raw = format!("POST / HTTP/1.0\r\nContent-Length: {}\r\n\r\n", body.len())
        .into_bytes();
    raw.extend_from_slice(&body);

    let response = send_raw(addr, &raw);
    let (head, echoed) = split_response(&response);

    assert!(head.contains("200 OK"));
    assert_eq!(echoed.len(), 10_000, "Echo truncado");
    assert_eq!(echoed, &body[..]);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_post_echo_is_idempotent() {
    let root = temp_root("echo_twice");
    let addr = start_server(&root);

    for _ in 0..3 {
        let response = send_raw(addr, b"POST / HTTP/1.0\r\nContent-Length: 4\r\n\r\nabcd");
        let (head, body) = split_response(&response);
        assert!(head.contains("200 OK"));
        assert_eq!(body, b"abcd");
    }

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_post_malformed_content_length_returns_400() {
    let root = temp_root("echo_badlen");
    let addr = start_server(&root);

    let response = send_raw(addr, b"POST / HTTP/1.0\r\nContent-Length: abc\r\n\r\n");
    let (head, _) = split_response(&response);

    assert!(head.contains("400 Bad Request"), "Expected 400, got: {}", head);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_get_serves_file_from_root() {
    let root = temp_root("get_file");
    fs::write(root.join("pagina.html"), "<h1>estatico</h1>").unwrap();
    let addr = start_server(&root);

    let response = send_raw(addr, b"GET /pagina.html HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("200 OK"));
    assert!(head.contains("Content-Type: text/html"));
    assert_eq!(body, b"<h1>estatico</h1>");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_get_missing_file_returns_404() {
    let root = temp_root("get_missing");
    let addr = start_server(&root);

    let response = send_raw(addr, b"GET /no-existe.html HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("404"), "Expected 404, got: {}", head);
    let body = String::from_utf8_lossy(body);
    assert!(body.contains("File not found"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_get_directory_listing() {
    let root = temp_root("get_listing");
    fs::write(root.join("uno.txt"), "1").unwrap();
    fs::write(root.join("dos.txt"), "2").unwrap();
    let addr = start_server(&root);

    let response = send_raw(addr, b"GET / HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("200 OK"));
    let body = String::from_utf8_lossy(body);
    assert!(body.contains("Directory listing for /"));
    assert!(body.contains("uno.txt"));
    assert!(body.contains("dos.txt"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_head_returns_no_body() {
    let root = temp_root("head");
    fs::write(root.join("pagina.html"), "<h1>estatico</h1>").unwrap();
    let addr = start_server(&root);

    let response = send_raw(addr, b"HEAD /pagina.html HTTP/1.0\r\n\r\n");
    let (head, body) = split_response(&response);

    assert!(head.contains("200 OK"));
    assert!(head.contains("Content-Length: 17"));
    assert!(body.is_empty());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_unsupported_method_returns_501() {
    let root = temp_root("method");
    let addr = start_server(&root);

    let response = send_raw(addr, b"PUT /cosa HTTP/1.0\r\n\r\n");
    let (head, _) = split_response(&response);

    assert!(head.contains("501 Not Implemented"), "Expected 501, got: {}", head);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn test_multiple_concurrent_posts() {
    // Varias conexiones a la vez: cada una debe recibir su propio eco
    let root = temp_root("concurrent");
    let addr = start_server(&root);

    let mut handles = Vec::new();
    for i in 0..5 {
        handles.push(thread::spawn(move || {
            let payload = format!("mensaje-{}", i);
            let raw = format!(
                "POST / HTTP/1.0\r\nContent-Length: {}\r\n\r\n{}",
                payload.len(),
                payload
            );
            let response = send_raw(addr, raw.as_bytes());
            let (head, body) = split_response(&response);
            assert!(head.contains("200 OK"));
            assert_eq!(body, payload.as_bytes());
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let _ = fs::remove_dir_all(&root);
}
