//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread y pasa por dos estados: leer el request, escribir la response.
//!
//! El despacho es solo por método HTTP:
//! - POST → handler de eco
//! - GET/HEAD → archivos estáticos
//!
//! No hay tabla de rutas ni estado compartido entre requests.

use crate::config::Config;
use crate::handlers::{echo, StaticFiles};
use crate::http::{Method, ParseError, Request, Response, StatusCode};
use std::io::{self, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Servidor HTTP de eco concurrente
pub struct Server {
    config: Config,
    files: Arc<StaticFiles>,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let files = Arc::new(StaticFiles::new(config.root_dir.clone()));

        Self {
            config,
            files,
            listener: None,
        }
    }

    /// Crea el listener TCP sin empezar a aceptar conexiones
    ///
    /// Separado de `run()` para poder hacer bind en el puerto 0 y
    /// consultar después la dirección real con `local_addr()`.
    pub fn bind(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            let address = self.config.address();
            println!("[*] Iniciando servidor en {}", address);
            self.listener = Some(TcpListener::bind(&address)?);
        }
        Ok(())
    }

    /// Dirección en la que el listener quedó escuchando
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Acepta conexiones indefinidamente (bloquea el thread actual)
    pub fn run(&mut self) -> io::Result<()> {
        self.bind()?;
        let listener = self.listener.as_ref().unwrap();

        println!("[+] Servidor escuchando en {}", self.config.address());
        println!("[*] Modo concurrente: un thread por conexion\n");

        let read_timeout = if self.config.read_timeout_ms > 0 {
            Some(Duration::from_millis(self.config.read_timeout_ms))
        } else {
            None
        };

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let files = Arc::clone(&self.files);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    println!(" ✅ Nueva conexión desde: {} (spawning thread)", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection_static(stream, files, read_timeout) {
                            eprintln!("   ❌ Error en thread: {}", e);
                        }
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión: lee un request, escribe una response, cierra
    ///
    /// Cualquier fallo de I/O leyendo o escribiendo aborta el intercambio;
    /// no hay reintentos ni recuperación parcial.
    fn handle_connection_static(
        mut stream: TcpStream,
        files: Arc<StaticFiles>,
        read_timeout: Option<Duration>,
    ) -> io::Result<()> {
        let start = Instant::now();

        if read_timeout.is_some() {
            stream.set_read_timeout(read_timeout)?;
        }

        let mut reader = BufReader::new(stream.try_clone()?);

        let response = match Request::read_from(&mut reader) {
            Ok(request) => {
                println!("   ✅ {} {}", request.method().as_str(), request.path());

                match request.method() {
                    Method::POST => echo::handle(&request),
                    Method::GET | Method::HEAD => files.handle(&request),
                }
            }
            // El peer cerró sin enviar nada: no hay nada que responder
            Err(ParseError::EmptyRequest) => {
                println!("   ✅ Conexión cerrada sin datos");
                return Ok(());
            }
            // Fallo de I/O: la conexión muere, igual que el intercambio
            Err(ParseError::Io(e)) => return Err(e),
            Err(e @ ParseError::UnsupportedMethod(_)) => {
                println!("   ❌ {}", e);
                Response::error(StatusCode::NotImplemented, &e.to_string())
            }
            Err(e) => {
                println!("   ❌ Parse error: {}", e);
                Response::error(StatusCode::BadRequest, &e.to_string())
            }
        };

        let mut response = response;
        Self::add_common_headers(&mut response);

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let latency = start.elapsed();
        println!(
            "   ✅ {} ({:.2}ms)\n",
            response.status(),
            latency.as_secs_f64() * 1000.0
        );

        Ok(())
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(response: &mut Response) {
        response.add_header("Server", "PostEcho/0.1");
        response.add_header("Connection", "close");
    }
}
