use crate::{Error, PikaSnowflake, Result};

/// Derives a node ID in `0..=1023` from the host's first MAC address.
///
/// The 48-bit address is reduced modulo 1024. Hosts whose addresses agree
/// in the low bits will collide, so prefer an explicitly assigned node ID
/// when one is available.
///
/// # Errors
///
/// Returns [`Error::NodeId`] if the interfaces cannot be listed or no MAC
/// address is found.
pub fn derive_node_id() -> Result<u16> {
    let mac = mac_address::get_mac_address()
        .map_err(|e| Error::NodeId {
            reason: e.to_string(),
        })?
        .ok_or_else(|| Error::NodeId {
            reason: "no mac address found".to_owned(),
        })?;
    Ok(node_id_from_mac(mac.bytes()))
}

fn node_id_from_mac(bytes: [u8; 6]) -> u16 {
    let mut padded = [0u8; 8];
    padded[2..].copy_from_slice(&bytes);
    let modulus = u64::from(PikaSnowflake::max_node_id()) + 1;
    (u64::from_be_bytes(padded) % modulus) as u16
}
