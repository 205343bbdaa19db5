//! Entrada externa de una petición y su interpretación como transición.
//!
//! `RequestInput` es el conjunto de campos que llega con cada request; se
//! pasa explícitamente a cada operación del `Transitioner` y a los
//! formularios. `TransitionRequest` se deriva de él en cada llamada y nunca
//! se persiste.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{BACKWARDS_MARKER, BACKWARDS_SEPARATOR, COMPLETE_MARKER, FORWARDS_MARKER, RESET_MARKER};
use crate::step::StepNumber;

/// Campos de la request entrante (nombre → valor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInput {
    values: HashMap<String, String>,
}

impl RequestInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante encadenable de `insert`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Valor del campo o `""` si no viene.
    pub fn value_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RequestInput
    where K: Into<String>,
          V: Into<String>
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { values }
    }
}

/// Transición pedida por el cliente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionRequest {
    Forwards,
    Backwards { requested_step_number: StepNumber },
    Complete,
    Reset,
    /// Valor no reconocido; el motor responde `FAILURE` sin efectos.
    Unknown(String),
}

impl TransitionRequest {
    /// `"1"`, `"0:<n>"`, `"2"`, `"3"`, comparados tal cual (sin recortar
    /// espacios ni signos); cualquier otra cosa es `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            FORWARDS_MARKER => return Self::Forwards,
            COMPLETE_MARKER => return Self::Complete,
            RESET_MARKER => return Self::Reset,
            _ => {}
        }
        if let Some((BACKWARDS_MARKER, target)) = raw.split_once(BACKWARDS_SEPARATOR) {
            if !target.is_empty() && target.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(requested_step_number) = target.parse::<StepNumber>() {
                    return Self::Backwards { requested_step_number };
                }
            }
        }
        Self::Unknown(raw.to_string())
    }

    /// Lee y parsea el campo `transition_key`; `None` si no viene o está vacío.
    pub fn from_input(input: &RequestInput, transition_key: &str) -> Option<Self> {
        let raw = input.value_or_empty(transition_key);
        if raw.is_empty() {
            return None;
        }
        Some(Self::parse(raw))
    }

    /// Valor a enviar en el campo de transición para pedir esta transición.
    pub fn to_input_value(&self) -> String {
        match self {
            Self::Forwards => FORWARDS_MARKER.to_string(),
            Self::Backwards { requested_step_number } => {
                format!("{BACKWARDS_MARKER}{BACKWARDS_SEPARATOR}{requested_step_number}")
            }
            Self::Complete => COMPLETE_MARKER.to_string(),
            Self::Reset => RESET_MARKER.to_string(),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for TransitionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forwards => f.write_str("forwards"),
            Self::Backwards { requested_step_number } => write!(f, "backwards to step {requested_step_number}"),
            Self::Complete => f.write_str("complete"),
            Self::Reset => f.write_str("reset"),
            Self::Unknown(raw) => write!(f, "unknown ({raw:?})"),
        }
    }
}
