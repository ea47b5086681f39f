use std::sync::Mutex;

use catalogo_core::fields::FieldInput;
use catalogo_core::{ErrorLocation, ErrorTree, FormModel, FormState};

use super::lock;

/// A [`FormState`] shared by a page controller.
#[derive(Debug)]
pub struct FormCell<M: FormModel> {
    state: Mutex<FormState<M>>,
}

impl<M> FormCell<M>
where
    M: FormModel + Clone,
{
    pub fn new(draft: M) -> Self {
        Self {
            state: Mutex::new(FormState::new(draft)),
        }
    }

    /// Apply one renderer edit. Returns whether the draft changed.
    pub fn edit(&self, input: &FieldInput<'_>) -> bool {
        lock(&self.state).edit(input)
    }

    /// Apply a dotted `key=raw` assignment using the field's declared input
    /// kind. Unknown keys return `false`.
    pub fn set_key(&self, key: &str, raw: &str) -> bool {
        let Some(path) = M::resolve_key(key) else {
            return false;
        };
        let value = M::input_kind(path).coerce(raw, raw == "true");
        lock(&self.state).set(path, value)
    }

    pub fn draft(&self) -> M {
        lock(&self.state).draft().clone()
    }

    pub fn errors(&self) -> ErrorTree {
        lock(&self.state).errors().clone()
    }

    /// Validate; a copy of the draft when it passes.
    pub fn validated(&self) -> Option<M> {
        let mut state = lock(&self.state);
        state.validate().then(|| state.draft().clone())
    }

    pub fn reset(&self, draft: M) {
        lock(&self.state).reset(draft);
    }

    pub fn lock_path(&self, path: M::Path) {
        lock(&self.state).lock(path);
    }

    pub fn set_errors(&self, errors: ErrorTree) {
        lock(&self.state).set_errors(errors);
    }

    pub fn set_error(&self, location: ErrorLocation, message: impl Into<String>) {
        lock(&self.state).set_error(location, message);
    }

    pub fn set_general_error(&self, message: impl Into<String>) {
        lock(&self.state).set_general_error(message);
    }
}
