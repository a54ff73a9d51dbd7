//! Text encoding helpers shared by the link builders.
//!
//! - Base64 blocks (vmess payload, shadowsocks/socks userinfo, subscription body)
//!   use the standard alphabet with padding over UTF-8 bytes.
//! - Query strings are `application/x-www-form-urlencoded` (space becomes `+`,
//!   `/` becomes `%2F`).
//! - Fragments and userinfo passwords are percent-encoded as URI components,
//!   leaving `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as they are.

use crate::inbound::Inbound;
use base64::Engine;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

/// Characters escaped in a URI component (the unreserved set of `encodeURIComponent`).
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Standard Base64 (with padding) of the UTF-8 bytes of `text`.
pub fn base64_encode(text: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(text.as_bytes())
}

/// Percent-encodes `text` for use as a URI component (fragment, userinfo).
pub fn encode_component(text: &str) -> Cow<'_, str> {
    utf8_percent_encode(text, COMPONENT).into()
}

/// Ordered query parameters with replace-in-place `set`.
///
/// Setting a name that is already present replaces its value but keeps its
/// original position, so parameter order only depends on first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Sets `name` only when `value` is present.
    pub fn set_opt(&mut self, name: &'static str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Value of `name`, if set.
    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when no parameters are set.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Serializes as `name=value&...` without a leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(n, v)| (*n, v.as_str())))
            .finish()
    }
}

/// Network-level part of a link: where to connect and how to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint<'a> {
    /// Server address as supplied by the caller
    pub host: &'a str,
    /// Inbound port
    pub port: u16,
    /// Remark, or `"{protocol}-{port}"`
    pub remark: Cow<'a, str>,
}

impl<'a> Endpoint<'a> {
    /// Endpoint of `inbound` reachable at `host`.
    pub fn new(inbound: &'a Inbound, host: &'a str) -> Self {
        Endpoint {
            host,
            port: inbound.port,
            remark: inbound.display_remark(),
        }
    }

    /// `host:port`, with IPv6 literals bracketed.
    pub fn authority(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// `#` followed by the percent-encoded remark.
    pub fn fragment(&self) -> String {
        format!("#{}", encode_component(&self.remark))
    }
}
