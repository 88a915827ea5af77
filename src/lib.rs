//! # POST Echo Server
//! src/lib.rs
//!
//! Servidor HTTP/1.x mínimo cuyo único comportamiento propio es el "eco":
//! toda petición POST se responde con status 200, header
//! `Content-Type: text/html` y un body idéntico, byte a byte, al body
//! recibido. Se usa para ejercitar el modo proxy de otra herramienta
//! durante sus pruebas.
//!
//! Las peticiones GET/HEAD se atienden sirviendo archivos estáticos desde
//! un directorio raíz configurable; cualquier otro método recibe 501.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y construcción de responses HTTP/1.x
//! - `config`: Configuración vía CLI y variables de entorno
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `handlers`: El handler de eco y el de archivos estáticos
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use post_server::server::Server;
//! use post_server::config::Config;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod http;
pub mod config;
pub mod server;
pub mod handlers;
