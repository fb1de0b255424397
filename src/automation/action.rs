//! The request-sending action
//!
//! [`SendAction`] is the orchestrator tying the engine together: it renders
//! the request body and headers against the invocation context, issues the
//! request through the client, optionally captures and repairs the response
//! body, and fans the result out to the registered triggers. Every failure
//! mode past request establishment degrades to a default value instead of
//! propagating, so an invocation always runs to completion and always ends
//! its response handle.

use heapless::{String, Vec};

use super::{ErrorTrigger, ResponseTrigger, TemplatableValue};
use crate::error::Error;
use crate::http::body::{BodyCollector, ResponseBody};
use crate::http::chunk;
use crate::http::client::Client;
use crate::http::{
    Header, MAX_HEADER_VALUE_LEN, MAX_HEADERS, MAX_URL_LEN, Method, ResponseHandle, Transport,
};
use crate::json::{self, JSON_BUFFER_SIZE, JsonObject, MAX_JSON_ENTRIES, MAX_JSON_VALUE_LEN};
use crate::platform::Platform;

/// Maximum length of a literal (non-JSON) body template.
pub const MAX_LITERAL_BODY_LEN: usize = 512;
/// Maximum number of response or error triggers on one action.
pub const MAX_TRIGGERS: usize = 4;

/// Sends one HTTP request per invocation and dispatches the response.
///
/// Generic over the opaque invocation context `X`; every templated value is
/// resolved against the context passed to [`play`](SendAction::play).
///
/// The three body sources are mutually exclusive with last-applicable-wins
/// priority: a literal body template is overridden by key/value JSON
/// entries, which are overridden by a JSON builder callback.
pub struct SendAction<'t, X, T: Transport> {
    url: TemplatableValue<String<MAX_URL_LEN>, X>,
    method: TemplatableValue<Method, X>,
    body: Option<TemplatableValue<String<MAX_LITERAL_BODY_LEN>, X>>,
    capture_response: TemplatableValue<bool, X>,
    headers: Vec<(&'static str, TemplatableValue<String<MAX_HEADER_VALUE_LEN>, X>), MAX_HEADERS>,
    json_fields: Vec<(&'static str, TemplatableValue<String<MAX_JSON_VALUE_LEN>, X>), MAX_JSON_ENTRIES>,
    json_builder: Option<fn(&X, &mut JsonObject)>,
    response_triggers: Vec<&'t mut dyn ResponseTrigger<T::Handle>, MAX_TRIGGERS>,
    error_triggers: Vec<&'t mut dyn ErrorTrigger, MAX_TRIGGERS>,
}

impl<'t, X, T: Transport> SendAction<'t, X, T> {
    /// Creates a GET action against a fixed URL, with response capture off.
    ///
    /// A URL longer than [`MAX_URL_LEN`] degrades to an empty URL, which the
    /// client rejects at invocation time.
    pub fn new(url: &str) -> Self {
        Self {
            url: TemplatableValue::Fixed(String::try_from(url).unwrap_or_default()),
            method: TemplatableValue::Fixed(Method::Get),
            body: None,
            capture_response: TemplatableValue::Fixed(false),
            headers: Vec::new(),
            json_fields: Vec::new(),
            json_builder: None,
            response_triggers: Vec::new(),
            error_triggers: Vec::new(),
        }
    }

    /// Replaces the URL template.
    pub fn set_url(&mut self, url: TemplatableValue<String<MAX_URL_LEN>, X>) {
        self.url = url;
    }

    /// Replaces the method template.
    pub fn set_method(&mut self, method: TemplatableValue<Method, X>) {
        self.method = method;
    }

    /// Binds a literal body template.
    pub fn set_body(&mut self, body: TemplatableValue<String<MAX_LITERAL_BODY_LEN>, X>) {
        self.body = Some(body);
    }

    /// Sets whether the response body is captured and dispatched.
    pub fn set_capture_response(&mut self, capture: TemplatableValue<bool, X>) {
        self.capture_response = capture;
    }

    /// Registers a header template; a duplicate name replaces the earlier
    /// value.
    pub fn add_header(
        &mut self,
        name: &'static str,
        value: TemplatableValue<String<MAX_HEADER_VALUE_LEN>, X>,
    ) -> Result<(), Error> {
        if let Some(entry) = self.headers.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
            return Ok(());
        }
        self.headers
            .push((name, value))
            .map_err(|_| Error::BufferOverflow)
    }

    /// Registers a key/value pair for the JSON body; a duplicate key
    /// replaces the earlier value.
    pub fn add_json(
        &mut self,
        key: &'static str,
        value: TemplatableValue<String<MAX_JSON_VALUE_LEN>, X>,
    ) -> Result<(), Error> {
        if let Some(entry) = self.json_fields.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
            return Ok(());
        }
        self.json_fields
            .push((key, value))
            .map_err(|_| Error::BufferOverflow)
    }

    /// Binds a callback that populates the JSON body from the context.
    pub fn set_json_builder(&mut self, builder: fn(&X, &mut JsonObject)) {
        self.json_builder = Some(builder);
    }

    /// Registers a response consumer; consumers fire in registration order.
    pub fn register_response_trigger(
        &mut self,
        trigger: &'t mut dyn ResponseTrigger<T::Handle>,
    ) -> Result<(), Error> {
        self.response_triggers
            .push(trigger)
            .map_err(|_| Error::BufferOverflow)
    }

    /// Registers an error consumer, fired when no response was obtained.
    pub fn register_error_trigger(
        &mut self,
        trigger: &'t mut dyn ErrorTrigger,
    ) -> Result<(), Error> {
        self.error_triggers
            .push(trigger)
            .map_err(|_| Error::BufferOverflow)
    }

    /// Runs one invocation against `ctx`.
    ///
    /// On transport failure every error trigger fires once and the
    /// invocation ends with no body work. Otherwise the body is collected
    /// (when capture is enabled), repaired when the declared content length
    /// was negative, and dispatched: a sole response trigger receives the
    /// buffer itself, while two or more each receive an independent copy so
    /// one trigger's mutation is never observable by another. The response
    /// handle is ended on every path.
    pub fn play<P: Platform>(&mut self, client: &mut Client<T>, platform: &mut P, ctx: &X) {
        let mut request_body: Vec<u8, JSON_BUFFER_SIZE> = Vec::new();
        if let Some(body) = &self.body {
            let rendered = body.value(ctx);
            let _ = request_body.extend_from_slice(rendered.as_bytes());
        }
        if !self.json_fields.is_empty() {
            let fields = &self.json_fields;
            request_body = json::build_json(|root| {
                for (key, value) in fields.iter() {
                    let _ = root.set(key, value.value(ctx).as_str());
                }
            });
        }
        if let Some(builder) = self.json_builder {
            request_body = json::build_json(|root| builder(ctx, root));
        }

        let mut headers: Vec<Header, MAX_HEADERS> = Vec::new();
        for (name, value) in &self.headers {
            let header = Header {
                name: String::try_from(*name).unwrap_or_default(),
                value: value.value(ctx),
            };
            let _ = headers.push(header);
        }

        let url = self.url.value(ctx);
        let method = self.method.value(ctx);
        let mut response = match client.start(&url, method, &request_body, &headers) {
            Some(response) => response,
            None => {
                for trigger in self.error_triggers.iter_mut() {
                    trigger.process();
                }
                return;
            }
        };

        let invalid_content_length = response.content_length() < 0;
        let mut response_body = ResponseBody::new();
        if self.capture_response.value(ctx) {
            let max_buffer_size = client.config().max_response_buffer_size;
            let mut collector = BodyCollector::new(platform, max_buffer_size);
            response_body = collector.collect(&mut response);
            if invalid_content_length {
                if let Some(corrected) = chunk::strip_chunk_framing(&mut response_body) {
                    response.set_content_length(corrected as i32);
                }
            }
        }

        if self.response_triggers.len() == 1 {
            // Sole consumer owns the buffer, no copy needed.
            self.response_triggers[0].process(&response, &mut response_body);
        } else {
            for trigger in self.response_triggers.iter_mut() {
                let mut body_copy = response_body.clone();
                trigger.process(&response, &mut body_copy);
            }
        }

        response.end();
    }
}
