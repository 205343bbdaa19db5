//! Progreso persistido de una instancia de flujo.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::step::StepNumber;

/// Estado mutable de un flujo: step actual y steps completados.
///
/// Sólo el `Transitioner` lo muta durante una transición; la persistencia la
/// hace explícitamente el flujo (`FormFlow::save`), nunca este tipo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowContext {
    current_step_number: StepNumber,
    completed_steps: BTreeSet<StepNumber>,
}

impl FlowContext {
    pub fn new() -> Self {
        Self { current_step_number: 1,
               completed_steps: BTreeSet::new() }
    }

    pub fn current_step_number(&self) -> StepNumber {
        self.current_step_number
    }

    /// El llamador garantiza que `number` está en rango para el flujo.
    pub fn set_current_step_number(&mut self, number: StepNumber) {
        self.current_step_number = number;
    }

    pub fn mark_completed(&mut self, number: StepNumber) {
        self.completed_steps.insert(number);
    }

    pub fn mark_incompleted(&mut self, number: StepNumber) {
        self.completed_steps.remove(&number);
    }

    pub fn is_completed(&self, number: StepNumber) -> bool {
        self.completed_steps.contains(&number)
    }

    /// Steps completados en orden ascendente.
    pub fn completed_steps(&self) -> impl Iterator<Item = StepNumber> + '_ {
        self.completed_steps.iter().copied()
    }

    /// Vuelve al estado inicial (step 1, nada completado).
    pub fn reset(&mut self) {
        self.current_step_number = 1;
        self.completed_steps.clear();
    }

    pub fn is_initial(&self) -> bool {
        self.current_step_number == 1 && self.completed_steps.is_empty()
    }
}

impl Default for FlowContext {
    fn default() -> Self {
        Self::new()
    }
}
