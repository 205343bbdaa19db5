//! Definiciones relacionadas a Steps.
//!
//! Un flujo es una secuencia ordenada de steps numerados desde 1. Este módulo
//! define:
//! - `Step`: un step inmutable (número + etiqueta).
//! - `StepCollection`: la colección ordenada e inmutable de un flujo, con
//!   búsquedas por número y filtros por rango.

mod collection;
mod definition;

pub use collection::{StepCollection, StepsBefore};
pub use definition::{Step, StepNumber};
