//! Implementación del `Transitioner`.

use log::{debug, info, warn};

use super::TransitionerOptions;
use crate::context::FlowContext;
use crate::errors::{FlowError, TransitionError};
use crate::event::{EventDispatcher, FlowEventKind, TransitionEvent};
use crate::flow::{FormData, FormFlow};
use crate::request::{RequestInput, TransitionRequest};
use crate::status::{FormValidity, Status};
use crate::step::StepNumber;

/// Motor de transiciones de flujos multi-step.
///
/// Sin estado por flujo: el flujo llega por referencia en cada llamada junto
/// a la request. Lo único que conserva es el bus de notificaciones y sus
/// opciones.
#[derive(Debug, Default)]
pub struct Transitioner {
    dispatcher: EventDispatcher,
    options: TransitionerOptions,
}

impl Transitioner {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self::with_options(dispatcher, TransitionerOptions::default())
    }

    pub fn with_options(dispatcher: EventDispatcher, options: TransitionerOptions) -> Self {
        Self { dispatcher, options }
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Para registrar listeners después de construir el motor.
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    pub fn options(&self) -> TransitionerOptions {
        self.options
    }

    /// Hay petición si el campo de transición del flujo viene no vacío.
    pub fn has_transition_request<F>(&self, flow: &F, request: &RequestInput) -> bool
        where F: FormFlow + ?Sized
    {
        !request.value_or_empty(flow.transition_key()).is_empty()
    }

    /// Interpreta la petición de `request` y la ejecuta.
    ///
    /// Las peticiones desconocidas devuelven `FAILURE` sin efectos. Un
    /// retroceso a N se ejecuta paso a paso y se detiene en el primer
    /// `Status` no exitoso.
    pub fn transition<F>(&self, flow: &mut F, request: &RequestInput) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let Some(transition) = TransitionRequest::from_input(request, flow.transition_key()) else {
            return Err(TransitionError::NoTransitionRequest { flow: flow.name().to_string() }.into());
        };
        debug!("flow {} at step {}: {transition} requested",
               flow.name(),
               flow.current_step_number());

        match transition {
            TransitionRequest::Forwards => self.forwards(flow, request),
            TransitionRequest::Backwards { requested_step_number } => {
                self.backwards_to(flow, request, requested_step_number)
            }
            TransitionRequest::Complete => self.complete(flow, request),
            TransitionRequest::Reset => self.reset(flow),
            TransitionRequest::Unknown(raw) => {
                warn!("flow {}: unknown transition request {raw:?}", flow.name());
                Ok(Status::failure())
            }
        }
    }

    fn backwards_to<F>(&self, flow: &mut F, request: &RequestInput, requested: StepNumber) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let current = flow.current_step_number();
        let count = flow.steps().count();
        if requested == 0 || requested >= current || requested as usize > count {
            return Err(TransitionError::InvalidRequestedStep { flow: flow.name().to_string(),
                                                               requested }.into());
        }

        loop {
            let status = self.backwards(flow, request)?;
            if !status.is_successful() || flow.current_step_number() <= requested {
                return Ok(status);
            }
        }
    }

    /// Avanza un step.
    ///
    /// Error si el flujo está en el último step. `FAILURE|INVALID_FORM` si el
    /// formulario no se envió o no es válido; `FAILURE|VALID_FORM|BLOCKED` si
    /// un listener de `pre_forwards` veta. En ambos casos no hay mutación.
    pub fn forwards<F>(&self, flow: &mut F, request: &RequestInput) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let name = flow.name().to_string();
        let current = flow.current_step()?.number();
        if current == flow.steps().last()?.number() {
            return Err(TransitionError::OnLastStep { flow: name }.into());
        }

        let (validity, data) = submit_form(flow, request)?;
        if validity == FormValidity::Invalid {
            debug!("flow {name}: step {current} input is not valid, staying");
            return Ok(Status::invalid_form());
        }

        if self.dispatch(flow, &name, FlowEventKind::PreForwards, Some(current), data.as_ref())? {
            warn!("flow {name}: forwards from step {current} blocked by listener");
            return Ok(Status::blocked(FormValidity::Valid));
        }

        let snapshot = self.snapshot(&*flow);
        let context = flow.context_mut();
        context.set_current_step_number(current + 1);
        context.mark_completed(current);
        self.finish_mutation(flow, &name, FlowEventKind::Forwards, Some(current), data.as_ref(), snapshot)?;

        debug!("flow {name}: moved forwards to step {}", current + 1);
        Ok(Status::transitioned())
    }

    /// Retrocede un step.
    ///
    /// Error si el flujo está en el primer step. La validez del formulario
    /// no impide retroceder; sólo un veto en `pre_backwards` lo hace, y en
    /// ese caso el `Status` conserva la validez calculada. En éxito siempre
    /// devuelve `SUCCESS|VALID_FORM`.
    pub fn backwards<F>(&self, flow: &mut F, request: &RequestInput) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let name = flow.name().to_string();
        let current = flow.current_step()?.number();
        if current == flow.steps().first()?.number() {
            return Err(TransitionError::OnFirstStep { flow: name }.into());
        }

        let (validity, data) = submit_form(flow, request)?;

        if self.dispatch(flow, &name, FlowEventKind::PreBackwards, Some(current), data.as_ref())? {
            warn!("flow {name}: backwards from step {current} blocked by listener");
            return Ok(Status::blocked(validity));
        }

        let snapshot = self.snapshot(&*flow);
        let context = flow.context_mut();
        context.mark_incompleted(current);
        context.set_current_step_number(current - 1);
        self.finish_mutation(flow, &name, FlowEventKind::Backwards, Some(current), data.as_ref(), snapshot)?;

        debug!("flow {name}: moved backwards to step {}", current - 1);
        Ok(Status::transitioned())
    }

    /// Completa el flujo desde el último step y lo reinicia.
    ///
    /// Todos los steps anteriores deben estar completados; si alguno no lo
    /// está devuelve `FAILURE` sin notificar nada.
    pub fn complete<F>(&self, flow: &mut F, request: &RequestInput) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let name = flow.name().to_string();
        let current = flow.current_step()?.number();
        if current != flow.steps().last()?.number() {
            return Err(TransitionError::NotOnLastStep { flow: name }.into());
        }

        let (validity, data) = submit_form(flow, request)?;
        if validity == FormValidity::Invalid {
            debug!("flow {name}: last step input is not valid, not completing");
            return Ok(Status::invalid_form());
        }

        let context = flow.context();
        if let Some(pending) = flow.steps()
                                   .steps_before(current)
                                   .find(|step| !context.is_completed(step.number()))
        {
            warn!("flow {name}: can not complete, step {} is not completed", pending.number());
            return Ok(Status::failure());
        }

        if self.dispatch(flow, &name, FlowEventKind::PreComplete, None, data.as_ref())? {
            warn!("flow {name}: completion blocked by listener");
            return Ok(Status::blocked(FormValidity::Valid));
        }

        self.dispatch(flow, &name, FlowEventKind::Completed, None, data.as_ref())?;
        flow.reset()?;

        info!("flow {name} completed");
        Ok(Status::completed())
    }

    /// Notifica `reset` y devuelve el flujo a su estado inicial persistido.
    pub fn reset<F>(&self, flow: &mut F) -> Result<Status, FlowError>
        where F: FormFlow + ?Sized
    {
        let name = flow.name().to_string();
        self.dispatch(flow, &name, FlowEventKind::Reset, None, None)?;
        flow.reset()?;

        info!("flow {name} reset");
        Ok(Status::reset())
    }

    /// Despacha `kind` en sus tres ámbitos y devuelve si quedó bloqueado.
    fn dispatch<F>(&self,
                   flow: &mut F,
                   name: &str,
                   kind: FlowEventKind,
                   step: Option<StepNumber>,
                   form_data: Option<&FormData>)
                   -> Result<bool, FlowError>
        where F: FormFlow + ?Sized
    {
        let mut event = TransitionEvent::new(kind, name, step, flow.context_mut()).with_form_data(form_data);
        self.dispatcher.dispatch(&mut event)?;
        Ok(kind.is_pre_phase() && event.is_transition_blocked())
    }

    fn snapshot<F>(&self, flow: &F) -> Option<FlowContext>
        where F: FormFlow + ?Sized
    {
        self.options.rollback_on_failure.then(|| flow.context().clone())
    }

    /// Evento posterior + persistencia tras mutar el contexto.
    fn finish_mutation<F>(&self,
                          flow: &mut F,
                          name: &str,
                          kind: FlowEventKind,
                          step: Option<StepNumber>,
                          form_data: Option<&FormData>,
                          snapshot: Option<FlowContext>)
                          -> Result<(), FlowError>
        where F: FormFlow + ?Sized
    {
        let result = self.dispatch(flow, name, kind, step, form_data).and_then(|_| flow.save());
        if let Err(err) = result {
            if let Some(previous) = snapshot {
                warn!("flow {name}: {kind} failed after mutation, restoring previous context");
                *flow.context_mut() = previous;
            }
            return Err(err);
        }
        Ok(())
    }
}

/// Envía el formulario del step actual (si aún no lo está) y devuelve su
/// validez junto a una copia de los datos enviados para los listeners.
fn submit_form<F>(flow: &mut F, request: &RequestInput) -> Result<(FormValidity, Option<FormData>), FlowError>
    where F: FormFlow + ?Sized
{
    let form = flow.current_step_form()?;
    if !form.is_submitted() {
        form.handle_request(request);
    }
    let validity = if form.is_submitted() && form.is_valid() {
        FormValidity::Valid
    } else {
        FormValidity::Invalid
    };
    Ok((validity, form.data().cloned()))
}
