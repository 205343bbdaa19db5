use serde::{Deserialize, Serialize};

/// Número de un step dentro de su flujo (base 1).
pub type StepNumber = u32;

/// Un step del flujo. Inmutable una vez construido.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    number: StepNumber,
    label: String,
}

impl Step {
    pub fn new(number: StepNumber, label: impl Into<String>) -> Self {
        Self { number,
               label: label.into() }
    }

    /// Posición estable del step dentro del flujo.
    pub fn number(&self) -> StepNumber {
        self.number
    }

    /// Nombre amigable (lo que se muestra al usuario).
    pub fn label(&self) -> &str {
        &self.label
    }
}
