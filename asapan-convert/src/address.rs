//! Address/mask normalization into canonical `network/prefix` form.

use std::net::Ipv4Addr;

use ipnet::{ipv4_mask_to_prefix, Ipv4Net};

/// Normalize an address and mask into `network/prefix` with host bits zeroed.
///
/// The mask may be a dotted netmask (`255.255.255.0`), a prefix length (`24`),
/// or a dotted host mask (`0.0.0.255`). Anything unparsable returns `address`
/// unchanged so one bad definition never aborts a conversion.
pub fn normalize(address: &str, mask: &str) -> String {
    match to_network(address, mask) {
        Some(net) => net.to_string(),
        None => {
            log::trace!("keeping '{address}' as-is: cannot normalize with mask '{mask}'");
            address.to_string()
        }
    }
}

/// Token shape test: exactly three dots, like `10.0.0.1` or `255.255.255.0`.
///
/// This is deliberately a shape check only; validity is decided by [`normalize`].
pub fn is_dotted_quad(token: &str) -> bool {
    token.bytes().filter(|b| *b == b'.').count() == 3
}

fn to_network(address: &str, mask: &str) -> Option<Ipv4Net> {
    let addr: Ipv4Addr = address.parse().ok()?;
    let prefix = prefix_len(mask)?;
    Ipv4Net::new(addr, prefix).ok().map(|net| net.trunc())
}

fn prefix_len(mask: &str) -> Option<u8> {
    if let Ok(dotted) = mask.parse::<Ipv4Addr>() {
        if let Ok(prefix) = ipv4_mask_to_prefix(dotted) {
            return Some(prefix);
        }
        let inverted = Ipv4Addr::from(!u32::from(dotted));
        return ipv4_mask_to_prefix(inverted).ok();
    }
    if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        return mask.parse::<u8>().ok().filter(|p| *p <= 32);
    }
    None
}
