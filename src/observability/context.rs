//! Thread-local record of the command being executed, read back by the
//! panic hook.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<OperationContext> =
        const { RefCell::new(OperationContext::new()) };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationContext {
    pub operation: Option<&'static str>,
    pub register_path: Option<PathBuf>,
}

impl OperationContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operation: None,
            register_path: None,
        }
    }
}

/// Restores the previous context when dropped.
#[must_use = "the context is cleared when the guard is dropped"]
pub struct OperationGuard {
    previous: OperationContext,
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        let previous = std::mem::take(&mut self.previous);
        CURRENT_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

pub fn set_operation(operation: &'static str, register_path: Option<PathBuf>) -> OperationGuard {
    let previous = CURRENT_CONTEXT.with(|ctx| {
        ctx.replace(OperationContext {
            operation: Some(operation),
            register_path,
        })
    });
    OperationGuard { previous }
}

pub fn get_current_context() -> OperationContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}
