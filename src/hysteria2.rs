//! Hysteria2 link builder
//!
//! Link format: `hysteria2://<password>@<host>:<port>?insecure=1#<remark>`
//!
//! The password is the inbound's shared secret, falling back to the first
//! client's password. `insecure=1` is always emitted: existing client links
//! depend on it and it stays until certificate handling for generated links is
//! decided.

use crate::LinkBuilder;
use crate::constants::{param, scheme};
use crate::encoding::{Endpoint, QueryParams, encode_component};
use crate::error::Result;
use tracing::trace;

/// Builds a `hysteria2://` link.
#[derive(Debug, Clone)]
pub struct Hysteria2Link<'a> {
    /// Where the client connects
    pub endpoint: &'a Endpoint<'a>,
    /// Authentication password
    pub password: &'a str,
}

impl Hysteria2Link<'_> {
    /// Query parameters in emission order.
    pub fn query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.set(param::INSECURE, "1");
        query
    }
}

impl LinkBuilder for Hysteria2Link<'_> {
    fn to_link(&self) -> Result<String> {
        trace!("Built Hysteria2 link for port {}", self.endpoint.port);
        Ok(format!(
            "{}{}@{}?{}{}",
            scheme::HYSTERIA2,
            encode_component(self.password),
            self.endpoint.authority(),
            self.query().to_query_string(),
            self.endpoint.fragment()
        ))
    }
}
