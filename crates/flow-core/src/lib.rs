//! flow-core: motor de transiciones para flujos de formularios multi-step.
pub mod constants;
pub mod context;
pub mod engine;
pub mod errors;
pub mod event;
pub mod flow;
pub mod request;
pub mod status;
pub mod step;
pub mod storage;

pub use context::FlowContext;
pub use engine::{Transitioner, TransitionerOptions};
pub use errors::{FlowError, ListenerError, StepCollectionError, StorageError, TransitionError};
pub use event::{EventDispatcher, FlowEventKind, ListenerKey, TransitionEvent};
pub use flow::{FieldForm, Flow, FlowBuilder, FormData, FormFlow, StepForm};
pub use request::{RequestInput, TransitionRequest};
pub use status::{FormValidity, Status};
pub use step::{Step, StepCollection, StepNumber};
pub use storage::{ContextStorage, InMemoryContextStorage};
