//! FormFlow Rust Library
//!
//! Este crate actúa como la fachada de aplicación sobre `flow-core`:
//! - Expone `config` con la configuración global (`CONFIG`) cargada desde el entorno.
//! - Expone `errors` para manejar errores de núcleo y dominio.
//! - Expone `telemetry` para instalar el logging.
//! - Re-exporta los tipos del motor y construye `Transitioner`/`FlowBuilder`
//!   con la configuración aplicada.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;
pub mod telemetry;

pub use flow_core::{ContextStorage, EventDispatcher, FieldForm, Flow, FlowBuilder, FlowContext, FlowError,
                    FlowEventKind, FormFlow, InMemoryContextStorage, ListenerError, ListenerKey, RequestInput, Status,
                    StepForm, TransitionRequest, Transitioner};

use config::AppConfig;

/// Motor con las opciones de `config` y los listeners de `dispatcher`.
pub fn build_transitioner(config: &AppConfig, dispatcher: EventDispatcher) -> Transitioner {
    Transitioner::with_options(dispatcher, config.transitioner_options())
}

/// `FlowBuilder` con el campo de transición configurado.
pub fn flow_builder(config: &AppConfig, name: impl Into<String>) -> FlowBuilder {
    Flow::builder(name).transition_key(config.flow.transition_key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowConfig;

    #[test]
    fn builders_apply_config() {
        let cfg = AppConfig { flow: FlowConfig { transition_key: "_t".into(),
                                                 rollback_on_failure: true } };
        let engine = build_transitioner(&cfg, EventDispatcher::new());
        assert!(engine.options().rollback_on_failure);

        let flow = flow_builder(&cfg, "signup").step("only", FieldForm::new(["x"]))
                                               .build()
                                               .unwrap();
        assert_eq!(flow.transition_key(), "_t");
    }
}
