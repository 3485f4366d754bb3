use std::{fmt, rc::Rc};

use crate::trace::Tracer;

/// Execution context threaded alongside the cursor.
///
/// Carries the optional tracer and the tracing switches. It is a plain value:
/// combinators that change tracing for a subtree hand a modified copy to that
/// subtree only, so nested or independent parses never see each other's
/// settings.
pub struct Context<C> {
    tracer: Option<Rc<dyn Tracer<C>>>,
    enabled: bool,
    scoped: Option<bool>,
}

impl<C> Context<C> {
    /// No tracer, tracing off.
    pub fn new() -> Self {
        Self {
            tracer: None,
            enabled: false,
            scoped: None,
        }
    }

    /// Attaches `tracer`. It hears nothing until tracing is switched on with
    /// [`Context::with_tracing`] or for a subtree with `visible`.
    pub fn with_tracer(self, tracer: Rc<dyn Tracer<C>>) -> Self {
        Self {
            tracer: Some(tracer),
            ..self
        }
    }

    pub fn with_tracing(self) -> Self {
        Self {
            enabled: true,
            ..self
        }
    }

    pub fn without_tracing(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    /// Overrides the tracing switch for everything parsed with the returned
    /// context, whatever the switch says.
    pub fn scoped(&self, enabled: bool) -> Self {
        Self {
            tracer: self.tracer.clone(),
            enabled: self.enabled,
            scoped: Some(enabled),
        }
    }

    pub fn tracing_enabled(&self) -> bool {
        self.scoped.unwrap_or(self.enabled)
    }

    /// The tracer to notify, if there is one and tracing is on here.
    #[inline]
    pub fn active_tracer(&self) -> Option<&dyn Tracer<C>> {
        if self.tracing_enabled() {
            self.tracer.as_deref()
        } else {
            None
        }
    }
}

impl<C> Default for Context<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Context<C> {
    fn clone(&self) -> Self {
        Self {
            tracer: self.tracer.clone(),
            enabled: self.enabled,
            scoped: self.scoped,
        }
    }
}

impl<C> fmt::Debug for Context<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Context")
            .field("tracer", &self.tracer.is_some())
            .field("enabled", &self.enabled)
            .field("scoped", &self.scoped)
            .finish()
    }
}
