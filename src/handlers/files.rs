//! # Archivos Estáticos
//! src/handlers/files.rs
//!
//! Sirve peticiones GET/HEAD desde un directorio raíz, replicando el
//! comportamiento del handler base que el servidor original heredaba:
//!
//! - Un archivo se devuelve con `Content-Type` según su extensión
//! - Un directorio sin `/` final redirige con 301
//! - Un directorio con `/` final sirve `index.html`/`index.htm` si existe,
//!   o un listado HTML del directorio si no
//! - Lo que no existe responde 404 "File not found"
//!
//! Los componentes `..` del path se descartan al traducirlo, de modo que
//! la ruta resuelta nunca sale del directorio raíz.

use crate::http::{Method, Request, Response, StatusCode};
use std::fs;
use std::path::{Path, PathBuf};

/// Handler de archivos estáticos para GET/HEAD
pub struct StaticFiles {
    /// Directorio raíz desde el que se sirven los archivos
    root: PathBuf,
}

impl StaticFiles {
    /// Crea un handler que sirve archivos desde `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Atiende un request GET o HEAD
    ///
    /// Para HEAD se generan los mismos headers que para GET pero sin body.
    pub fn handle(&self, req: &Request) -> Response {
        // El path llega percent-encoded (ej: "/con%20espacio.txt")
        let decoded = match urlencoding::decode(req.path()) {
            Ok(path) => path.into_owned(),
            Err(_) => {
                return Response::error(
                    StatusCode::BadRequest,
                    "Invalid percent-encoding in path",
                );
            }
        };

        let fs_path = self.translate_path(&decoded);

        let metadata = match fs::metadata(&fs_path) {
            Ok(metadata) => metadata,
            Err(_) => return Response::error(StatusCode::NotFound, "File not found"),
        };

        if metadata.is_dir() {
            // Un directorio sin '/' final se redirige, como hacen los
            // navegadores con los links relativos del listado
            if !decoded.ends_with('/') {
                return Response::new(StatusCode::MovedPermanently)
                    .with_header("Location", &format!("{}/", req.path()));
            }

            for index in ["index.html", "index.htm"] {
                let candidate = fs_path.join(index);
                if candidate.is_file() {
                    return Self::serve_file(&candidate, req.method());
                }
            }

            return Self::list_directory(&fs_path, &decoded, req.method());
        }

        Self::serve_file(&fs_path, req.method())
    }

    /// Traduce un path de URL a una ruta dentro del directorio raíz
    ///
    /// Se descartan los componentes vacíos, `.` y `..`; la ruta resultante
    /// siempre queda bajo `root`.
    fn translate_path(&self, path: &str) -> PathBuf {
        let mut result = self.root.clone();
        for part in path.split('/') {
            if part.is_empty() || part == "." || part == ".." {
                continue;
            }
            result.push(part);
        }
        result
    }

    /// Sirve un archivo regular
    fn serve_file(path: &Path, method: Method) -> Response {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(_) => return Response::error(StatusCode::NotFound, "File not found"),
        };

        let mut response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", content_type_for(path));

        if method == Method::HEAD {
            response.add_header("Content-Length", &contents.len().to_string());
            response
        } else {
            response.with_body_bytes(contents)
        }
    }

    /// Genera un listado HTML del directorio
    fn list_directory(dir: &Path, request_path: &str, method: Method) -> Response {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => {
                return Response::error(StatusCode::NotFound, "No permission to list directory");
            }
        };

        let mut names: Vec<String> = Vec::new();
        for entry in entries.flatten() {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.path().is_dir() {
                name.push('/');
            }
            names.push(name);
        }
        names.sort_by_key(|name| name.to_lowercase());

        let title = format!("Directory listing for {}", html_escape(request_path));
        let mut body = String::new();
        body.push_str(&format!("<title>{}</title>\n", title));
        body.push_str(&format!("<h2>{}</h2>\n", title));
        body.push_str("<hr>\n<ul>\n");
        for name in &names {
            // El href va percent-encoded; el texto visible, escapado
            let (link, display) = match name.strip_suffix('/') {
                Some(stem) => (format!("{}/", urlencoding::encode(stem)), name.as_str()),
                None => (urlencoding::encode(name).into_owned(), name.as_str()),
            };
            body.push_str(&format!(
                "<li><a href=\"{}\">{}</a>\n",
                link,
                html_escape(display)
            ));
        }
        body.push_str("</ul>\n<hr>\n");

        let mut response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html");

        if method == Method::HEAD {
            response.add_header("Content-Length", &body.len().to_string());
            response
        } else {
            response.with_body(&body)
        }
    }
}

/// Content-Type según la extensión del archivo
///
/// Mapa fijo de extensiones comunes; todo lo demás es octet-stream.
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "html" | "htm" => "text/html",
        "txt" => "text/plain",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "gz" => "application/gzip",
        _ => "application/octet-stream",
    }
}

/// Escapa los caracteres especiales de HTML en texto visible
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
