//! Motor de transiciones.
//!
//! El `Transitioner` interpreta la petición de transición de una request,
//! aplica los invariantes de orden de steps, coordina la validación del
//! formulario actual, muta el `FlowContext`, notifica a los listeners y
//! devuelve un `Status`. No guarda estado por flujo entre llamadas.

mod core;
mod options;

pub use self::core::Transitioner;
pub use options::TransitionerOptions;
