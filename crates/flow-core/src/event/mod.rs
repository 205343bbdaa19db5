//! Notificaciones del ciclo de vida de una transición.
//!
//! Cada momento (`pre_forwards`, `forwards`, ...) se anuncia hasta en tres
//! ámbitos y siempre en este orden: step (`<evento>.<flujo>.step_<n>`), flujo
//! (`<evento>.<flujo>`) y global (`<evento>`). Los listeners de las fases
//! "pre" pueden vetar la transición con `TransitionEvent::block_transition`.

mod dispatcher;
mod types;

pub use dispatcher::{EventDispatcher, Listener};
pub use types::{FlowEventKind, ListenerKey, TransitionEvent};
