
use std::cell::RefCell;
use std::rc::Rc;

use flow_core::{EventDispatcher, FieldForm, Flow, FlowEventKind, FormFlow, ListenerKey, RequestInput, Transitioner};
use test_support::*;

#[test]
fn blocking_a_post_event_is_ignored() {
    let mut engine = Transitioner::default();
    block(engine.dispatcher_mut(), ListenerKey::global(FlowEventKind::Forwards));
    let mut flow = TestFlow::new(3);

    let status = send(&engine, &mut flow, "1").unwrap();

    assert!(status.is_successful());
    assert!(!status.is_blocked());
    assert_eq!(flow.current_step_number(), 2);
}

#[test]
fn listeners_of_other_flows_are_not_notified() {
    let mut dispatcher = EventDispatcher::new();
    let hits = Rc::new(RefCell::new(Vec::new()));
    for key in [ListenerKey::flow(FlowEventKind::Forwards, "checkout"),
                ListenerKey::step(FlowEventKind::Forwards, "checkout", 1),
                ListenerKey::step(FlowEventKind::Forwards, FLOW, 2)]
    {
        let hits = Rc::clone(&hits);
        let id = key.to_string();
        dispatcher.add_listener(key, move |_| {
                      hits.borrow_mut().push(id.clone());
                      Ok(())
                  });
    }
    let engine = Transitioner::new(dispatcher);
    let mut flow = TestFlow::new(3);

    send(&engine, &mut flow, "1").unwrap();

    assert!(hits.borrow().is_empty());
}

#[test]
fn listeners_run_in_registration_order_within_a_key() {
    let mut dispatcher = EventDispatcher::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        dispatcher.add_listener(ListenerKey::flow(FlowEventKind::Reset, FLOW), move |_| {
                      order.borrow_mut().push(tag);
                      Ok(())
                  });
    }
    assert_eq!(dispatcher.listener_count(), 3);
    assert!(dispatcher.has_listeners(&ListenerKey::flow(FlowEventKind::Reset, FLOW)));
    assert!(!dispatcher.has_listeners(&ListenerKey::global(FlowEventKind::Reset)));

    let engine = Transitioner::new(dispatcher);
    assert_eq!(engine.dispatcher().listener_count(), 3);
    let mut flow = TestFlow::new(2);
    engine.reset(&mut flow).unwrap();

    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn veto_still_notifies_remaining_scopes() {
    let mut engine = Transitioner::default();
    block(engine.dispatcher_mut(), ListenerKey::step(FlowEventKind::PreForwards, FLOW, 1));
    let log = record_all(engine.dispatcher_mut(), 3);
    let mut flow = TestFlow::new(3);

    let status = send(&engine, &mut flow, "1").unwrap();

    assert!(status.is_blocked());
    assert_eq!(*log.borrow(),
               vec!["pre_forwards.signup.step_1", "pre_forwards.signup", "pre_forwards"]);
}

#[test]
fn post_listener_can_annotate_the_context_before_save() {
    let mut engine = Transitioner::default();
    engine.dispatcher_mut()
          .add_listener(ListenerKey::flow(FlowEventKind::Forwards, FLOW), |event| {
              // Un listener puede adelantar la marca del step destino.
              let next = event.context().current_step_number();
              event.context_mut().mark_completed(next);
              Ok(())
          });
    let mut flow = TestFlow::new(3);

    send(&engine, &mut flow, "1").unwrap();

    assert_eq!(flow.completed(), vec![1, 2]);
    assert_eq!(flow.saves, 1);
}

#[test]
fn listeners_can_veto_on_submitted_form_data() {
    let mut engine = Transitioner::default();
    engine.dispatcher_mut()
          .add_listener(ListenerKey::flow(FlowEventKind::PreForwards, "newsletter"), |event| {
              let disposable = event.form_data()
                                    .and_then(|data| data.get("email"))
                                    .is_some_and(|email| email.ends_with("@spam.test"));
              if disposable {
                  event.block_transition();
              }
              Ok(())
          });
    let seen_on_reset = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen_on_reset);
    engine.dispatcher_mut()
          .add_listener(ListenerKey::global(FlowEventKind::Reset), move |event| {
              recorder.borrow_mut().push(event.form_data().is_some());
              Ok(())
          });
    let mut flow = Flow::builder("newsletter").step("email", FieldForm::required(["email"]))
                                              .step("done", FieldForm::new(["ok"]))
                                              .build()
                                              .unwrap();
    let request = |email: &str| RequestInput::new().with("email", email).with("flow_transition", "1");

    assert!(!flow.transition(&engine, &request("bot@spam.test")).unwrap());
    assert_eq!(flow.current_step_number(), 1);
    assert!(flow.transition(&engine, &request("ada@example.com")).unwrap());
    assert_eq!(flow.current_step_number(), 2);

    engine.reset(&mut flow).unwrap();
    assert_eq!(*seen_on_reset.borrow(), vec![false]);
}

#[test]
fn forms_without_data_expose_nothing() {
    let mut engine = Transitioner::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&seen);
    engine.dispatcher_mut()
          .add_listener(ListenerKey::global(FlowEventKind::PreForwards), move |event| {
              recorder.borrow_mut().push(event.form_data().is_none());
              Ok(())
          });
    let mut flow = TestFlow::new(2);

    send(&engine, &mut flow, "1").unwrap();
    assert_eq!(*seen.borrow(), vec![true]);
}
