use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::errors::ListenerError;

use super::{ListenerKey, TransitionEvent};

/// Listener síncrono. Un `Err` aborta la transición en curso.
pub type Listener = Box<dyn Fn(&mut TransitionEvent<'_>) -> Result<(), ListenerError>>;

/// Bus de notificaciones in-process.
///
/// Los listeners se ejecutan en el hilo del llamador, en orden de registro
/// dentro de cada clave, y el despacho recorre las claves de
/// `ListenerKey::fan_out` (step, flujo, global).
#[derive(Default)]
pub struct EventDispatcher {
    listeners: HashMap<ListenerKey, Vec<Listener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener<F>(&mut self, key: ListenerKey, listener: F)
        where F: Fn(&mut TransitionEvent<'_>) -> Result<(), ListenerError> + 'static
    {
        self.listeners.entry(key).or_default().push(Box::new(listener));
    }

    pub fn has_listeners(&self, key: &ListenerKey) -> bool {
        self.listeners.get(key).is_some_and(|ls| !ls.is_empty())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Despacha `event` a sus tres ámbitos. El primer error corta el despacho
    /// y se devuelve tal cual.
    pub fn dispatch(&self, event: &mut TransitionEvent<'_>) -> Result<(), ListenerError> {
        for key in ListenerKey::fan_out(event.kind(), event.flow_name(), event.step_number()) {
            let Some(listeners) = self.listeners.get(&key) else {
                continue;
            };
            debug!("dispatching {key} to {} listener(s)", listeners.len());
            for listener in listeners {
                listener(&mut *event)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.listeners.keys().map(ToString::to_string).collect();
        f.debug_struct("EventDispatcher").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::context::FlowContext;
    use crate::event::FlowEventKind;

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str)
                -> impl Fn(&mut TransitionEvent<'_>) -> Result<(), ListenerError> + 'static {
        let log = Rc::clone(log);
        move |_event| {
            log.borrow_mut().push(tag.to_string());
            Ok(())
        }
    }

    #[test]
    fn dispatch_runs_step_then_flow_then_global() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        // registro en orden inverso a propósito
        dispatcher.add_listener(ListenerKey::global(FlowEventKind::PreForwards), recorder(&log, "global"));
        dispatcher.add_listener(ListenerKey::flow(FlowEventKind::PreForwards, "signup"), recorder(&log, "flow"));
        dispatcher.add_listener(ListenerKey::step(FlowEventKind::PreForwards, "signup", 1), recorder(&log, "step"));
        // otro flujo y otro step: no deben dispararse
        dispatcher.add_listener(ListenerKey::flow(FlowEventKind::PreForwards, "other"), recorder(&log, "other"));
        dispatcher.add_listener(ListenerKey::step(FlowEventKind::PreForwards, "signup", 2), recorder(&log, "step2"));

        let mut ctx = FlowContext::new();
        let mut event = TransitionEvent::new(FlowEventKind::PreForwards, "signup", Some(1), &mut ctx);
        dispatcher.dispatch(&mut event).unwrap();

        assert_eq!(*log.borrow(), vec!["step", "flow", "global"]);
        assert_eq!(dispatcher.listener_count(), 5);
    }

    #[test]
    fn listener_error_stops_dispatch() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_listener(ListenerKey::flow(FlowEventKind::Reset, "signup"),
                                |_event| Err(ListenerError::new("nope")));
        dispatcher.add_listener(ListenerKey::global(FlowEventKind::Reset), recorder(&log, "global"));

        let mut ctx = FlowContext::new();
        let mut event = TransitionEvent::new(FlowEventKind::Reset, "signup", None, &mut ctx);
        let err = dispatcher.dispatch(&mut event).unwrap_err();

        assert_eq!(err, ListenerError::new("nope"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn block_is_visible_after_dispatch() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_listener(ListenerKey::step(FlowEventKind::PreBackwards, "signup", 3), |event| {
                      event.block_transition();
                      Ok(())
                  });
        assert!(dispatcher.has_listeners(&ListenerKey::step(FlowEventKind::PreBackwards, "signup", 3)));

        let mut ctx = FlowContext::new();
        let mut event = TransitionEvent::new(FlowEventKind::PreBackwards, "signup", Some(3), &mut ctx);
        dispatcher.dispatch(&mut event).unwrap();
        assert!(event.is_transition_blocked());
    }
}
