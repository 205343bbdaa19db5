//! Resultado compuesto de un intento de transición.
//!
//! Un `Status` combina flags independientes: éxito/fallo, validez del
//! formulario, bloqueo por listener, flujo completado y flujo reiniciado.
//! Sólo se construye mediante los constructores nombrados, que cubren
//! exactamente las combinaciones que el `Transitioner` puede producir.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Failure,
}

/// Validez del formulario del step actual tras enviarlo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormValidity {
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    outcome: Outcome,
    form: Option<FormValidity>,
    blocked: bool,
    completed: bool,
    reset: bool,
}

impl Status {
    const fn with(outcome: Outcome, form: Option<FormValidity>) -> Self {
        Self { outcome,
               form,
               blocked: false,
               completed: false,
               reset: false }
    }

    /// `FAILURE` sin más información (petición desconocida o steps previos
    /// sin completar).
    pub const fn failure() -> Self {
        Self::with(Outcome::Failure, None)
    }

    /// `FAILURE|INVALID_FORM`
    pub const fn invalid_form() -> Self {
        Self::with(Outcome::Failure, Some(FormValidity::Invalid))
    }

    /// `FAILURE|BLOCKED|<validez>`: un listener vetó la transición.
    pub const fn blocked(form: FormValidity) -> Self {
        let mut status = Self::with(Outcome::Failure, Some(form));
        status.blocked = true;
        status
    }

    /// `SUCCESS|VALID_FORM`
    pub const fn transitioned() -> Self {
        Self::with(Outcome::Success, Some(FormValidity::Valid))
    }

    /// `SUCCESS|VALID_FORM|COMPLETED`
    pub const fn completed() -> Self {
        let mut status = Self::transitioned();
        status.completed = true;
        status
    }

    /// `SUCCESS|RESET`
    pub const fn reset() -> Self {
        let mut status = Self::with(Outcome::Success, None);
        status.reset = true;
        status
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_successful(&self) -> bool {
        self.outcome == Outcome::Success
    }

    pub fn is_failure(&self) -> bool {
        self.outcome == Outcome::Failure
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }

    pub fn has_valid_form(&self) -> bool {
        self.form == Some(FormValidity::Valid)
    }

    pub fn has_invalid_form(&self) -> bool {
        self.form == Some(FormValidity::Invalid)
    }

    /// Nombres de los flags activos, en orden fijo.
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = vec![match self.outcome {
                                 Outcome::Success => "SUCCESS",
                                 Outcome::Failure => "FAILURE",
                             }];
        match self.form {
            Some(FormValidity::Valid) => flags.push("VALID_FORM"),
            Some(FormValidity::Invalid) => flags.push("INVALID_FORM"),
            None => {}
        }
        if self.blocked {
            flags.push("BLOCKED");
        }
        if self.completed {
            flags.push("COMPLETED");
        }
        if self.reset {
            flags.push("RESET");
        }
        flags
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flags().join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_and_failure_are_exclusive() {
        let all = [Status::failure(),
                   Status::invalid_form(),
                   Status::blocked(FormValidity::Valid),
                   Status::blocked(FormValidity::Invalid),
                   Status::transitioned(),
                   Status::completed(),
                   Status::reset()];
        for status in all {
            assert_ne!(status.is_successful(), status.is_failure(), "{status}");
            assert_eq!(status.outcome() == Outcome::Success, status.is_successful());
            assert!(!(status.has_valid_form() && status.has_invalid_form()));
        }
    }

    #[test]
    fn display_lists_flags_in_order() {
        assert_eq!(Status::failure().to_string(), "FAILURE");
        assert_eq!(Status::invalid_form().to_string(), "FAILURE|INVALID_FORM");
        assert_eq!(Status::blocked(FormValidity::Valid).to_string(), "FAILURE|VALID_FORM|BLOCKED");
        assert_eq!(Status::completed().to_string(), "SUCCESS|VALID_FORM|COMPLETED");
        assert_eq!(Status::reset().to_string(), "SUCCESS|RESET");
    }

    #[test]
    fn blocked_keeps_the_submitted_validity() {
        let status = Status::blocked(FormValidity::Invalid);
        assert!(status.is_failure());
        assert!(status.is_blocked());
        assert!(status.has_invalid_form());
        assert!(!status.is_completed());
    }

    #[test]
    fn serializes_as_plain_fields() {
        let json = serde_json::to_value(Status::reset()).unwrap();
        assert_eq!(json["outcome"], "Success");
        assert_eq!(json["reset"], true);
        assert!(json["form"].is_null());
    }
}
