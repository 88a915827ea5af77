//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor de eco con soporte
//! para argumentos CLI y variables de entorno.
//!
//! El arranque del servidor original vivía en estado global del proceso;
//! aquí se reformula como configuración explícita que se pasa a la
//! construcción del servidor (host, puerto, directorio raíz).
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./post_server --port 8000 --host 127.0.0.1 --root-dir ./public
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8000 HTTP_HOST=0.0.0.0 ./post_server
//! ```

use clap::Parser;
use std::path::Path;

/// Configuración del servidor de eco HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "post_server")]
#[command(about = "Servidor HTTP de eco para POST (pruebas de modo proxy)")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8000", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz servido a las peticiones GET/HEAD
    #[arg(long = "root-dir", default_value = ".", env = "HTTP_ROOT")]
    pub root_dir: String,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```no_run
    /// use post_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use post_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8000");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        // El directorio raíz debe existir para poder servir archivos
        if !Path::new(&self.root_dir).is_dir() {
            return Err(format!(
                "Root dir does not exist or is not a directory: {}",
                self.root_dir
            ));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║              POST Echo Server Configuration                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!("   Root dir:     {}", self.root_dir);

        if self.read_timeout_ms > 0 {
            println!("   Read timeout: {} ms", self.read_timeout_ms);
        } else {
            println!("   Read timeout: disabled");
        }

        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            root_dir: ".".to_string(),
            read_timeout_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.root_dir, ".");
        assert_eq!(config.read_timeout_ms, 0);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_root_dir() {
        let mut config = Config::default();
        config.root_dir = "./no-existe-este-directorio".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Root dir"));
    }

    #[test]
    fn test_validate_root_dir_is_file() {
        let mut config = Config::default();
        config.root_dir = "./Cargo.toml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_custom_values() {
        let mut config = Config::default();
        config.port = 3000;
        config.host = "0.0.0.0".to_string();
        config.read_timeout_ms = 5_000;

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.read_timeout_ms, 5_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // Should not panic
        config.print_summary();
    }

    #[test]
    fn test_config_print_summary_with_timeout() {
        let mut config = Config::default();
        config.port = 9000;
        config.read_timeout_ms = 2_500;
        // Should not panic
        config.print_summary();
    }
}
