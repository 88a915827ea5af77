//! # POST Echo Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor de eco.
//!
//! Ejecutar el binario arranca el listener y bloquea indefinidamente;
//! el proceso termina con una señal externa.

use post_server::config::Config;
use post_server::server::Server;

fn main() {
    println!("=================================");
    println!("  POST Echo Server");
    println!("  Pruebas de modo proxy HTTP");
    println!("=================================\n");

    // Crear configuración (CLI, env o por defecto)
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Crear el servidor
    let mut server = Server::new(config);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
