//! Target expansion.
//!
//! Turns one input token into the ordered list of concrete addresses it
//! names. CIDR blocks expand to every address they contain; anything else
//! (bare IPs, hostnames, malformed CIDR) passes through as a single target.

use ipnetwork::IpNetwork;
use tracing::warn;

/// Expansions above this many addresses get a logged warning. One /16.
const LARGE_EXPANSION: u128 = 65_536;

/// Expand a target token into concrete scan addresses.
///
/// A token containing a prefix separator that parses as valid CIDR yields
/// every address in the block in ascending numeric order, network and
/// broadcast addresses included. Any other token (no separator, or a
/// separator that does not parse) yields the token itself unchanged, so
/// hostnames and malformed blocks still get one scan attempt each.
///
/// Expansion is unbounded: a /8 materializes all sixteen million addresses.
pub fn expand(token: &str) -> Vec<String> {
    if token.contains('/') {
        if let Ok(network) = token.parse::<IpNetwork>() {
            if address_count(&network) > LARGE_EXPANSION {
                warn!(block = token, "expanding a large CIDR block");
            }
            return match network {
                IpNetwork::V4(net) => net.iter().map(|ip| ip.to_string()).collect(),
                IpNetwork::V6(net) => net.iter().map(|ip| ip.to_string()).collect(),
            };
        }
    }
    vec![token.to_string()]
}

fn address_count(network: &IpNetwork) -> u128 {
    match network {
        IpNetwork::V4(net) => u128::from(net.size()),
        IpNetwork::V6(net) => {
            let prefix = u32::from(net.prefix());
            if prefix >= 128 {
                1
            } else {
                1u128.checked_shl(128 - prefix).unwrap_or(u128::MAX)
            }
        }
    }
}
