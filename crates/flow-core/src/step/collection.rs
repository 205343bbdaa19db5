use std::slice;

use crate::errors::StepCollectionError;

use super::{Step, StepNumber};

/// Colección ordenada de steps de un flujo.
///
/// Invariante: los números son contiguos y únicos, empezando en 1, por lo que
/// el step `n` vive siempre en el índice `n - 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCollection {
    steps: Vec<Step>,
}

impl StepCollection {
    /// Valida que los steps estén numerados 1..=n en orden.
    pub fn new(steps: Vec<Step>) -> Result<Self, StepCollectionError> {
        for (index, step) in steps.iter().enumerate() {
            let expected = index as StepNumber + 1;
            if step.number() != expected {
                return Err(StepCollectionError::NonContiguous { expected,
                                                                found: step.number() });
            }
        }
        Ok(Self { steps })
    }

    /// Numera las etiquetas en orden (1..=n).
    pub fn from_labels<I, S>(labels: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let steps = labels.into_iter()
                          .enumerate()
                          .map(|(index, label)| Step::new(index as StepNumber + 1, label))
                          .collect();
        Self { steps }
    }

    pub fn count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn contains(&self, number: StepNumber) -> bool {
        number >= 1 && (number as usize) <= self.steps.len()
    }

    pub fn get(&self, number: StepNumber) -> Result<&Step, StepCollectionError> {
        if !self.contains(number) {
            return Err(StepCollectionError::NotFound(number));
        }
        Ok(&self.steps[number as usize - 1])
    }

    pub fn first(&self) -> Result<&Step, StepCollectionError> {
        self.steps.first().ok_or(StepCollectionError::Empty)
    }

    pub fn last(&self) -> Result<&Step, StepCollectionError> {
        self.steps.last().ok_or(StepCollectionError::Empty)
    }

    /// Steps con número menor que `number`, en orden ascendente.
    pub fn steps_before(&self, number: StepNumber) -> StepsBefore<'_> {
        StepsBefore { inner: self.steps.iter(),
                      limit: number }
    }

    pub fn iter(&self) -> slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a StepCollection {
    type Item = &'a Step;
    type IntoIter = slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Iterador perezoso devuelto por `StepCollection::steps_before`.
///
/// Es `Clone`, así que puede recorrerse de nuevo sin volver a pedirlo.
#[derive(Debug, Clone)]
pub struct StepsBefore<'a> {
    inner: slice::Iter<'a, Step>,
    limit: StepNumber,
}

impl<'a> Iterator for StepsBefore<'a> {
    type Item = &'a Step;

    fn next(&mut self) -> Option<Self::Item> {
        // ordenados: el primer step fuera de rango corta la iteración
        self.inner.next().filter(|step| step.number() < self.limit)
    }
}
