//! # Handler de Eco
//! src/handlers/echo.rs
//!
//! El único comportamiento propio del servidor: una petición POST se
//! responde con status 200, `Content-Type: text/html` y un body idéntico
//! al recibido.
//!
//! El body ya fue leído a exactamente `Content-Length` bytes por el
//! parser; si el header estaba ausente, el body es vacío y el eco
//! también. Los bytes se devuelven tal cual, sin interpretarlos.

use crate::http::{Request, Response, StatusCode};

/// Handler para POST
///
/// Responde 200 con el body del request repetido byte a byte.
/// Sin efectos secundarios más allá de la escritura en la red.
pub fn handle(req: &Request) -> Response {
    Response::new(StatusCode::Ok)
        .with_header("Content-Type", "text/html")
        .with_body_bytes(req.body().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_request(raw: &[u8]) -> Request {
        let mut reader = raw;
        Request::read_from(&mut reader).unwrap()
    }

    #[test]
    fn test_echo_returns_body_verbatim() {
        let request = post_request(b"POST / HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello");
        let response = handle(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"hello");
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/html".to_string())
        );
    }

    #[test]
    fn test_echo_without_content_length_is_empty() {
        let request = post_request(b"POST / HTTP/1.0\r\n\r\n");
        let response = handle(&request);

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/html".to_string())
        );
    }

    #[test]
    fn test_echo_preserves_binary_bytes() {
        let mut raw = b"POST / HTTP/1.0\r\nContent-Length: 4\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0x00, 0xFF, 0x7F, 0x80]);

        let request = post_request(&raw);
        let response = handle(&request);

        assert_eq!(response.body(), &[0x00, 0xFF, 0x7F, 0x80]);
    }

    #[test]
    fn test_echo_large_body_is_not_truncated() {
        let body: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
        let mut raw = format!("POST / HTTP/1.0\r\nContent-Length: {}\r\n\r\n", body.len())
            .into_bytes();
        raw.extend_from_slice(&body);

        let request = post_request(&raw);
        let response = handle(&request);

        assert_eq!(response.body().len(), 10_000);
        assert_eq!(response.body(), &body[..]);
    }
}
