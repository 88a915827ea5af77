//! # Handlers del Servidor
//!
//! Este módulo contiene los dos comportamientos que el servidor
//! puede ejecutar, despachados únicamente por método HTTP:
//!
//! - **echo**: El eco de POST (el único comportamiento propio del servidor)
//! - **files**: Archivos estáticos para GET/HEAD (comportamiento heredado
//!   del handler base original, preservado para fidelidad de las pruebas)

pub mod echo;
pub mod files;

// Re-exportar tipos útiles
pub use files::StaticFiles;
