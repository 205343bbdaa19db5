use std::collections::HashMap;
use std::fmt;

use super::StepForm;
use crate::request::RequestInput;

/// Datos enviados a un `FieldForm` (campo → valor).
pub type FormData = HashMap<String, String>;

type Validator = Box<dyn Fn(&FormData) -> bool>;

/// Formulario mínimo basado en campos con nombre.
///
/// Se considera enviado cuando la request trae alguno de sus campos (o
/// siempre, si no declara ninguno). La validación es una función sobre los
/// datos enviados; por defecto todo envío es válido.
pub struct FieldForm {
    fields: Vec<String>,
    validator: Validator,
    data: Option<FormData>,
}

impl FieldForm {
    pub fn new<I, S>(fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { fields: fields.into_iter().map(Into::into).collect(),
               validator: Box::new(|_| true),
               data: None }
    }

    pub fn with_validator<F>(mut self, validator: F) -> Self
        where F: Fn(&FormData) -> bool + 'static
    {
        self.validator = Box::new(validator);
        self
    }

    /// Todos los campos declarados deben venir con valor no vacío.
    pub fn required<I, S>(fields: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let form = Self::new(fields);
        let required = form.fields.clone();
        form.with_validator(move |data| {
                required.iter()
                        .all(|name| data.get(name).is_some_and(|v| !v.trim().is_empty()))
            })
    }
}

impl StepForm for FieldForm {
    fn is_submitted(&self) -> bool {
        self.data.is_some()
    }

    fn is_valid(&self) -> bool {
        self.data.as_ref().is_some_and(|data| (self.validator)(data))
    }

    fn handle_request(&mut self, request: &RequestInput) {
        let submitted: FormData = self.fields
                                      .iter()
                                      .filter_map(|name| request.get(name).map(|v| (name.clone(), v.to_string())))
                                      .collect();
        if self.fields.is_empty() || !submitted.is_empty() {
            self.data = Some(submitted);
        }
    }

    fn data(&self) -> Option<&FormData> {
        self.data.as_ref()
    }

    fn clear(&mut self) {
        self.data = None;
    }
}

impl fmt::Debug for FieldForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldForm")
         .field("fields", &self.fields)
         .field("data", &self.data)
         .finish_non_exhaustive()
    }
}
