use tracing::Span;

/// Explicit logging context handed to each long-lived component at construction.
///
/// Components log inside their own span so whoever builds them decides where their events go.
/// There is no process-wide logger object; installing a subscriber is the binary's job.
#[derive(Clone, Debug)]
pub struct LogHandle {
    span: Span,
}

impl LogHandle {
    /// Top-level span for a sign process.
    pub fn root() -> Self {
        Self {
            span: tracing::info_span!("workshop_sign"),
        }
    }

    /// Handle that records nothing. Useful in tests and for throwaway components.
    pub fn disabled() -> Self {
        Self {
            span: Span::none(),
        }
    }

    /// Wrap an existing span.
    pub fn from_span(span: Span) -> Self {
        Self { span }
    }

    /// Derive a component handle nested under this one.
    pub fn child(&self, component: &'static str) -> Self {
        Self {
            span: tracing::info_span!(parent: &self.span, "component", name = component),
        }
    }

    /// Borrow the underlying span.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Run `f` with this handle's span entered.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }
}
