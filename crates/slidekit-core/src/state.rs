use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::RuntimeHandle;

/// Observable value. Every write asks the runtime for a render pass.
pub struct MutableState<T> {
    value: Rc<RefCell<T>>,
    runtime: RuntimeHandle,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            runtime,
        }
    }

    pub fn set_value(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.runtime.request_render();
    }

    /// Read-only view sharing the same cell.
    pub fn as_state(&self) -> State<T> {
        State {
            value: Rc::clone(&self.value),
        }
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    value: Rc<RefCell<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
        }
    }
}

impl<T: Clone> State<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}
