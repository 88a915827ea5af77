//! # Lectura y Parsing de Requests HTTP/1.x
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.x desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /submit HTTP/1.0\r\n
//! Host: localhost:8000\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.x`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Exactamente `Content-Length` bytes (solo POST)
//!
//! A diferencia de un parser sobre un buffer fijo, aquí se lee directamente
//! del stream: primero la cabecera línea a línea y después exactamente
//! `Content-Length` bytes de body. El body son bytes crudos, nunca se
//! exige que sea UTF-8.

use std::collections::HashMap;
use std::io::{self, BufRead, Read};

/// Tamaño máximo de la cabecera de un request (request line + headers)
const MAX_HEAD_BYTES: usize = 8192;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso (archivos estáticos)
    GET,

    /// HEAD - Como GET pero solo retorna headers
    HEAD,

    /// POST - Enviar datos; el servidor los devuelve como eco
    POST,
}

impl Method {
    /// Parsea un método HTTP desde un string
    ///
    /// # Errores
    ///
    /// Retorna error si el método no es soportado. El servidor responde
    /// 501 en ese caso, igual que el handler base original.
    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

/// Representa un request HTTP/1.x parseado
#[derive(Debug)]
pub struct Request {
    /// Método HTTP (GET, HEAD, POST)
    method: Method,

    /// Path de la petición, sin query string ni fragmento (ej: "/dir/file.html")
    path: String,

    /// Headers HTTP. Los nombres se guardan en minúsculas
    headers: HashMap<String, String>,

    /// Versión HTTP ("HTTP/1.0" o "HTTP/1.1")
    version: String,

    /// Body del request para métodos POST (bytes crudos)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante la lectura o el parsing
#[derive(Debug)]
pub enum ParseError {
    /// El peer cerró la conexión sin enviar un request
    EmptyRequest,

    /// Formato inválido de la request line
    InvalidRequestLine,

    /// Método HTTP no soportado (el servidor responde 501)
    UnsupportedMethod(String),

    /// Versión HTTP incorrecta (debe ser HTTP/1.0 o HTTP/1.1)
    InvalidHttpVersion(String),

    /// Header malformado
    InvalidHeader(String),

    /// Content-Length presente pero no es un entero no negativo
    InvalidContentLength(String),

    /// La cabecera excede MAX_HEAD_BYTES
    HeadTooLarge,

    /// Fallo de I/O leyendo del stream
    Io(io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
            ParseError::InvalidContentLength(v) => write!(f, "Invalid Content-Length: {}", v),
            ParseError::HeadTooLarge => write!(f, "Request head too large"),
            ParseError::Io(e) => write!(f, "I/O error reading request: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl Request {
    /// Lee y parsea un request HTTP/1.x desde un stream
    ///
    /// Primero lee la cabecera (request line + headers) línea a línea,
    /// y después, solo para POST con `Content-Length`, exactamente esa
    /// cantidad de bytes de body. Si el header `Content-Length` está
    /// ausente el body queda vacío.
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request leído y parseado exitosamente
    /// * `Err(ParseError)` - Error de parsing o de I/O
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use post_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"POST /submit HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/submit");
    /// assert_eq!(request.body(), b"hello");
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let mut remaining = MAX_HEAD_BYTES;

        // 1. Request line (primera línea)
        let request_line = match Self::read_head_line(reader, &mut remaining)? {
            None => return Err(ParseError::EmptyRequest),
            Some(line) => {
                String::from_utf8(line).map_err(|_| ParseError::InvalidRequestLine)?
            }
        };

        if request_line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (method, path, version) = Self::parse_request_line(&request_line)?;

        // 2. Headers (resto de líneas hasta la línea vacía)
        let headers = Self::read_headers(reader, &mut remaining)?;

        // 3. Body: exactamente Content-Length bytes
        let body = Self::read_body(reader, method, &headers)?;

        Ok(Request {
            method,
            path,
            headers,
            version,
            body,
        })
    }

    /// Lee una línea de la cabecera, sin el `\r\n` final
    ///
    /// Retorna `None` en EOF. `remaining` limita el total de bytes leídos.
    fn read_head_line<R: BufRead>(
        reader: &mut R,
        remaining: &mut usize,
    ) -> Result<Option<Vec<u8>>, ParseError> {
        let mut line = Vec::new();
        let n = reader.read_until(b'\n', &mut line)?;

        if n == 0 {
            return Ok(None);
        }

        *remaining = remaining.checked_sub(n).ok_or(ParseError::HeadTooLarge)?;

        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }

        Ok(Some(line))
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `POST /path HTTP/1.0`
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        // Debe tener exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        // Parsear método
        let method = Method::from_str(parts[0])?;

        // El query string y el fragmento no participan en el dispatch
        let path = Self::strip_query(parts[1]);

        // Validar versión HTTP
        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, version))
    }

    /// Descarta el query string y el fragmento de un request target
    ///
    /// Ejemplo: "/dir/file.html?x=1#top" → "/dir/file.html"
    fn strip_query(target: &str) -> String {
        let target = match target.find('#') {
            Some(pos) => &target[..pos],
            None => target,
        };
        match target.find('?') {
            Some(pos) => target[..pos].to_string(),
            None => target.to_string(),
        }
    }

    /// Lee y parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". Los nombres se guardan
    /// en minúsculas para que la búsqueda sea case-insensitive.
    fn read_headers<R: BufRead>(
        reader: &mut R,
        remaining: &mut usize,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            let line = match Self::read_head_line(reader, remaining)? {
                // EOF antes de la línea vacía: tratamos la cabecera como terminada
                None => break,
                Some(line) => line,
            };

            // La línea vacía marca el fin de los headers
            if line.is_empty() {
                break;
            }

            let line = String::from_utf8(line)
                .map_err(|_| ParseError::InvalidHeader("<non-utf8>".to_string()))?;

            // Buscar el separador ':'
            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim().to_ascii_lowercase();
                let value = line[colon_pos + 1..].trim().to_string();
                headers.insert(name, value);
            } else {
                // Header sin ':' es inválido
                return Err(ParseError::InvalidHeader(line));
            }
        }

        Ok(headers)
    }

    /// Lee el cuerpo del request
    ///
    /// Solo los POST llevan body. Con `Content-Length` presente se leen
    /// exactamente esos bytes; ausente, el body queda vacío (el servidor
    /// responde igualmente 200 con eco vacío).
    fn read_body<R: BufRead>(
        reader: &mut R,
        method: Method,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>, ParseError> {
        if method != Method::POST {
            return Ok(Vec::new());
        }

        let header = match headers.get("content-length") {
            None => return Ok(Vec::new()),
            Some(value) => value,
        };

        let length: usize = header
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(header.clone()))?;

        let mut body = vec![0u8; length];
        reader.read_exact(&mut body)?;

        Ok(body)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el path del request (sin query string)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers (nombres en minúsculas)
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (búsqueda case-insensitive)
    ///
    /// # Ejemplo
    /// ```
    /// use post_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"POST / HTTP/1.0\r\nContent-Length: 2\r\n\r\nhi";
    /// let request = Request::read_from(&mut raw).unwrap();
    ///
    /// assert_eq!(request.header("Content-Length"), Some("2"));
    /// assert_eq!(request.header("content-length"), Some("2"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
