//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.x desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Lectura y parsing de requests HTTP/1.x
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! POST /path HTTP/1.0\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```

pub mod request;   // Lectura y parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
