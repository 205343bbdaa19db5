//! Tipos de evento y claves de suscripción.
//!
//! `FlowEventKind` es el contrato observable del motor: cada variante
//! corresponde a un identificador estable (`pre_forwards`, `completed`, ...).
//! `ListenerKey` sustituye la concatenación de strings por una clave tipada
//! (evento, flujo opcional, step opcional) cuyo `Display` reproduce la forma
//! textual del identificador.
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::context::FlowContext;
use crate::flow::FormData;
use crate::step::StepNumber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Antes de avanzar; vetable.
    PreForwards,
    /// Tras avanzar, antes de persistir.
    Forwards,
    /// Antes de retroceder; vetable.
    PreBackwards,
    Backwards,
    /// Antes de completar; vetable.
    PreComplete,
    Completed,
    Reset,
}

impl FlowEventKind {
    pub const ALL: [FlowEventKind; 7] = [Self::PreForwards,
                                         Self::Forwards,
                                         Self::PreBackwards,
                                         Self::Backwards,
                                         Self::PreComplete,
                                         Self::Completed,
                                         Self::Reset];

    /// Identificador estable del evento.
    pub fn name(self) -> &'static str {
        match self {
            Self::PreForwards => "pre_forwards",
            Self::Forwards => "forwards",
            Self::PreBackwards => "pre_backwards",
            Self::Backwards => "backwards",
            Self::PreComplete => "pre_complete",
            Self::Completed => "completed",
            Self::Reset => "reset",
        }
    }

    /// Sólo las fases "pre" admiten veto.
    pub fn is_pre_phase(self) -> bool {
        matches!(self, Self::PreForwards | Self::PreBackwards | Self::PreComplete)
    }

    /// Avance y retroceso se anuncian también con ámbito de step.
    pub fn is_step_scoped(self) -> bool {
        matches!(self, Self::PreForwards | Self::Forwards | Self::PreBackwards | Self::Backwards)
    }
}

impl fmt::Display for FlowEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clave bajo la que se registra un listener.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    kind: FlowEventKind,
    flow: Option<String>,
    step: Option<StepNumber>,
}

impl ListenerKey {
    /// `<evento>`
    pub fn global(kind: FlowEventKind) -> Self {
        Self { kind,
               flow: None,
               step: None }
    }

    /// `<evento>.<flujo>`
    pub fn flow(kind: FlowEventKind, flow: impl Into<String>) -> Self {
        Self { kind,
               flow: Some(flow.into()),
               step: None }
    }

    /// `<evento>.<flujo>.step_<n>`
    pub fn step(kind: FlowEventKind, flow: impl Into<String>, step: StepNumber) -> Self {
        Self { kind,
               flow: Some(flow.into()),
               step: Some(step) }
    }

    pub fn kind(&self) -> FlowEventKind {
        self.kind
    }

    /// Claves a notificar para una ocurrencia, en el orden de despacho:
    /// step (si aplica), flujo y global.
    pub fn fan_out(kind: FlowEventKind, flow: &str, step: Option<StepNumber>) -> Vec<ListenerKey> {
        let mut keys = Vec::with_capacity(3);
        if let Some(number) = step.filter(|_| kind.is_step_scoped()) {
            keys.push(Self::step(kind, flow, number));
        }
        keys.push(Self::flow(kind, flow));
        keys.push(Self::global(kind));
        keys
    }
}

impl fmt::Display for ListenerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(flow) = &self.flow {
            write!(f, ".{flow}")?;
        }
        if let Some(step) = self.step {
            write!(f, ".step_{step}")?;
        }
        Ok(())
    }
}

/// Evento entregado a los listeners durante un despacho.
///
/// Presta el contexto del flujo de forma mutable; un listener sólo debe
/// modificarlo a través de las operaciones de `FlowContext`. Los datos
/// enviados del formulario de origen son de sólo lectura.
#[derive(Debug)]
pub struct TransitionEvent<'a> {
    kind: FlowEventKind,
    flow_name: &'a str,
    step_number: Option<StepNumber>,
    context: &'a mut FlowContext,
    form_data: Option<&'a FormData>,
    blocked: bool,
}

impl<'a> TransitionEvent<'a> {
    pub fn new(kind: FlowEventKind,
               flow_name: &'a str,
               step_number: Option<StepNumber>,
               context: &'a mut FlowContext)
               -> Self {
        Self { kind,
               flow_name,
               step_number,
               context,
               form_data: None,
               blocked: false }
    }

    pub fn with_form_data(mut self, form_data: Option<&'a FormData>) -> Self {
        self.form_data = form_data;
        self
    }

    pub fn kind(&self) -> FlowEventKind {
        self.kind
    }

    pub fn flow_name(&self) -> &str {
        self.flow_name
    }

    /// Step en el que estaba el flujo al iniciar la transición (sólo avance
    /// y retroceso).
    pub fn step_number(&self) -> Option<StepNumber> {
        self.step_number
    }

    pub fn context(&self) -> &FlowContext {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut FlowContext {
        &mut *self.context
    }

    /// Datos enviados al formulario del step de origen, si el formulario los
    /// expone (`StepForm::data`). `None` en `reset`.
    pub fn form_data(&self) -> Option<&FormData> {
        self.form_data
    }

    /// Veta la transición. Sin efecto fuera de las fases "pre".
    pub fn block_transition(&mut self) {
        if !self.kind.is_pre_phase() {
            warn!("ignoring block request on post-phase event {} of flow {}", self.kind, self.flow_name);
            return;
        }
        self.blocked = true;
    }

    pub fn is_transition_blocked(&self) -> bool {
        self.blocked
    }
}
