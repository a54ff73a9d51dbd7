//! Subscription aggregator
//!
//! Folds the links of every enabled inbound into one newline-separated document
//! and Base64-encodes it (standard alphabet, padded, UTF-8). Inbound order and
//! client order within an inbound are preserved. Disabled inbounds contribute
//! nothing; an input with no links encodes the empty string.

use crate::encoding::base64_encode;
use crate::inbound::Inbound;
use crate::selector::generate_all_client_links;
use tracing::debug;

/// Links of all enabled inbounds, in order, before encoding.
pub fn subscription_links(inbounds: &[Inbound], host: &str) -> Vec<String> {
    inbounds
        .iter()
        .filter(|inbound| inbound.enable)
        .flat_map(|inbound| generate_all_client_links(inbound, host))
        .collect()
}

/// Builds the Base64 subscription document for `inbounds`.
///
/// # Example
///
/// ```rust
/// use inbound_share_link::{Inbound, generate_subscription};
///
/// let disabled = Inbound::new("socks", 1080).with_enable(false);
/// assert_eq!(generate_subscription(&[disabled], "1.2.3.4"), "");
/// ```
pub fn generate_subscription(inbounds: &[Inbound], host: &str) -> String {
    let links = subscription_links(inbounds, host);
    debug!(
        "Built subscription with {} links from {} inbounds ({} enabled)",
        links.len(),
        inbounds.len(),
        inbounds.iter().filter(|i| i.enable).count()
    );
    base64_encode(&links.join("\n"))
}
