//! Demo: flujo de alta en tres steps sobre una sesión en memoria.
//!
//! Cada request reconstruye el flujo desde la sesión (como haría un handler
//! web), aplica la transición y muestra el `Status` resultante.
use std::cell::Cell;
use std::rc::Rc;

use formflow_rust::config::AppConfig;
use formflow_rust::errors::{CoreError, DomainError};
use formflow_rust::{build_transitioner, flow_builder, telemetry, EventDispatcher, FieldForm, Flow, FlowEventKind,
                    FormFlow, InMemoryContextStorage, ListenerKey, RequestInput, Status, Transitioner};
use log::info;

const FLOW_NAME: &str = "signup";

fn build_flow(config: &AppConfig, session: &InMemoryContextStorage) -> Result<Flow, CoreError> {
    let flow = flow_builder(config, FLOW_NAME).step("account", FieldForm::required(["email", "password"]))
                                              .step("profile", FieldForm::required(["name"]))
                                              .step("confirm",
                                                    FieldForm::new(["accept"]).with_validator(|data| {
                                                        data.get("accept").is_some_and(|v| v == "yes")
                                                    }))
                                              .storage(session.clone())
                                              .build()?;
    Ok(flow)
}

/// Una request completa: flujo nuevo, transición y status.
fn handle(engine: &Transitioner,
          config: &AppConfig,
          session: &InMemoryContextStorage,
          label: &str,
          request: RequestInput)
          -> Result<Status, CoreError> {
    let mut flow = build_flow(config, session)?;
    let before = flow.current_step_number();
    let status = engine.transition(&mut flow, &request).map_err(DomainError::from)?;
    println!("{label:<28} step {before} -> {}  [{status}]", flow.current_step_number());
    Ok(status)
}

fn run() -> Result<(), CoreError> {
    telemetry::init_logging()?;
    let config = &AppConfig::try_from_env()?;
    let key = config.flow.transition_key.as_str();
    info!("config: {}", serde_json::to_string(config).map_err(|e| CoreError::Internal(e.to_string()))?);

    // Mantenimiento: veta avanzar desde el perfil mientras esté activo.
    let maintenance = Rc::new(Cell::new(false));
    let mut dispatcher = EventDispatcher::new();
    let gate = Rc::clone(&maintenance);
    dispatcher.add_listener(ListenerKey::step(FlowEventKind::PreForwards, FLOW_NAME, 2), move |event| {
                  if gate.get() {
                      event.block_transition();
                  }
                  Ok(())
              });
    // Cuentas desechables: se rechazan mirando los datos enviados.
    dispatcher.add_listener(ListenerKey::step(FlowEventKind::PreForwards, FLOW_NAME, 1), |event| {
                  let disposable = event.form_data()
                                        .and_then(|data| data.get("email"))
                                        .is_some_and(|email| email.ends_with("@mailinator.com"));
                  if disposable {
                      event.block_transition();
                  }
                  Ok(())
              });
    dispatcher.add_listener(ListenerKey::global(FlowEventKind::Completed), |event| {
                  info!("flow {} completed", event.flow_name());
                  Ok(())
              });
    let engine = build_transitioner(config, dispatcher);
    let session = InMemoryContextStorage::new();

    handle(&engine,
           config,
           &session,
           "account (disposable)",
           RequestInput::new().with("email", "bot@mailinator.com")
                              .with("password", "s3cret")
                              .with(key, "1"))?;
    handle(&engine,
           config,
           &session,
           "account (valid)",
           RequestInput::new().with("email", "ana@example.com")
                              .with("password", "s3cret")
                              .with(key, "1"))?;
    handle(&engine,
           config,
           &session,
           "profile (missing name)",
           RequestInput::new().with("name", " ").with(key, "1"))?;

    maintenance.set(true);
    handle(&engine,
           config,
           &session,
           "profile (maintenance)",
           RequestInput::new().with("name", "Ana").with(key, "1"))?;
    maintenance.set(false);

    handle(&engine,
           config,
           &session,
           "profile (valid)",
           RequestInput::new().with("name", "Ana").with(key, "1"))?;
    handle(&engine, config, &session, "back to account", RequestInput::new().with(key, "0:1"))?;
    handle(&engine,
           config,
           &session,
           "account (again)",
           RequestInput::new().with("email", "ana@example.com")
                              .with("password", "s3cret")
                              .with(key, "1"))?;
    handle(&engine,
           config,
           &session,
           "profile (again)",
           RequestInput::new().with("name", "Ana").with(key, "1"))?;
    let status = handle(&engine,
                        config,
                        &session,
                        "confirm",
                        RequestInput::new().with("accept", "yes").with(key, "2"))?;

    println!("completed: {}  session: {}",
             status.is_completed(),
             session.raw("formflow.signup").unwrap_or_default());
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
