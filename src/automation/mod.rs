//! Automation glue: templated values and downstream consumers
//!
//! Actions in an automation pipeline run against an opaque invocation
//! context `X` (a sensor reading, a trigger payload, whatever the pipeline
//! carries). Every configurable value of an action is a
//! [`TemplatableValue`]: either a fixed value or a pure function of the
//! context, resolved fresh on each invocation.
//!
//! The engine is agnostic to what downstream consumers do with a response;
//! it only guarantees each registered consumer is invoked exactly once per
//! request, in registration order.

use crate::http::ResponseHandle;
use crate::http::body::ResponseBody;

pub mod action;

/// A value that is either fixed or resolved from the invocation context.
///
/// Resolution is a pure function `(context) -> value`; templates must not
/// hold state between invocations.
pub enum TemplatableValue<T, X> {
    /// A fixed value, the same on every invocation.
    Fixed(T),
    /// A value computed from the invocation context.
    Template(fn(&X) -> T),
}

impl<T: Clone, X> TemplatableValue<T, X> {
    /// Resolves the value against `ctx`.
    pub fn value(&self, ctx: &X) -> T {
        match self {
            TemplatableValue::Fixed(value) => value.clone(),
            TemplatableValue::Template(template) => template(ctx),
        }
    }
}

impl<T: core::fmt::Debug, X> core::fmt::Debug for TemplatableValue<T, X> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TemplatableValue::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            TemplatableValue::Template(_) => f.debug_tuple("Template").finish(),
        }
    }
}

/// Consumer of a successfully-established response.
///
/// `body` is mutable on purpose: a consumer may rewrite the buffer it was
/// handed. With multiple consumers registered, each receives an independent
/// copy, so such mutation is never observable across consumers.
pub trait ResponseTrigger<H: ResponseHandle> {
    /// Processes the response and its captured body.
    fn process(&mut self, response: &H, body: &mut ResponseBody);
}

/// Consumer fired when a request could not be established.
///
/// There is no payload: by the time an error trigger fires, no response
/// exists and no body work was attempted.
pub trait ErrorTrigger {
    /// Processes the failure.
    fn process(&mut self);
}
