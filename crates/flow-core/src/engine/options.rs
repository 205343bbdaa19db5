/// Opciones del `Transitioner`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionerOptions {
    /// Restaura el contexto previo si el evento posterior o `save()` fallan
    /// después de mutarlo. Desactivado: el contexto queda mutado en memoria.
    pub rollback_on_failure: bool,
}

impl TransitionerOptions {
    pub fn with_rollback(mut self, enabled: bool) -> Self {
        self.rollback_on_failure = enabled;
        self
    }
}
