//! CCSDS primary-header helpers.
//!
//! Packets moved through the translator are CCSDS-framed: a six-byte
//! primary header whose first sixteen bits are the big-endian stream
//! identifier, followed by an optional secondary header (two bytes for
//! commands, six for telemetry timestamps). These helpers read header
//! metadata out of raw packet bytes so callers can pick the right message
//! definition and skip the right number of header bytes. Checksum handling
//! is deliberately not provided here.

/// Size in bytes of the primary header alone.
pub const PRI_HDR_SIZE: usize = 6;
/// Size in bytes of a command header (primary + command secondary).
pub const CMD_HDR_SIZE: usize = 8;
/// Size in bytes of a telemetry header (primary + timestamp secondary).
pub const TLM_HDR_SIZE: usize = 12;

/// Secondary-header-present flag within the stream identifier.
const SHDR_FLAG: u16 = 0x0800;
/// Packet-type flag within the stream identifier (set for commands).
const TYPE_FLAG: u16 = 0x1000;

/// The big-endian stream identifier from the first two packet bytes.
///
/// Returns `None` when the buffer is shorter than the identifier.
pub fn msg_id(packet: &[u8]) -> Option<u16> {
    let bytes: [u8; 2] = [*packet.first()?, *packet.get(1)?];
    Some(u16::from_be_bytes(bytes))
}

/// Whether the stream identifier advertises a secondary header.
pub fn has_secondary_header(packet: &[u8]) -> Option<bool> {
    Some(msg_id(packet)? & SHDR_FLAG != 0)
}

/// Whether the packet is a command (telemetry otherwise).
pub fn is_command(packet: &[u8]) -> Option<bool> {
    Some(msg_id(packet)? & TYPE_FLAG != 0)
}

/// Total header size of the packet, in bytes.
///
/// Six bytes without a secondary header; commands with one carry eight,
/// telemetry with one carries twelve.
pub fn header_size(packet: &[u8]) -> Option<usize> {
    if !has_secondary_header(packet)? {
        Some(PRI_HDR_SIZE)
    } else if is_command(packet)? {
        Some(CMD_HDR_SIZE)
    } else {
        Some(TLM_HDR_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_id_reads_big_endian() {
        let packet: [u8; 6] = [0x08, 0x81, 0xC0, 0x00, 0x00, 0x01];
        assert_eq!(msg_id(&packet), Some(0x0881));
        assert_eq!(msg_id(&[0x08]), None);
        assert_eq!(msg_id(&[]), None);
    }

    #[test]
    fn header_size_by_flags() {
        // No secondary header: primary only.
        assert_eq!(header_size(&[0x07, 0xFF]), Some(PRI_HDR_SIZE));
        // Telemetry with secondary header.
        assert_eq!(header_size(&[0x08, 0x81]), Some(TLM_HDR_SIZE));
        // Command with secondary header.
        assert_eq!(header_size(&[0x18, 0x81]), Some(CMD_HDR_SIZE));
        // Command without secondary header.
        assert_eq!(header_size(&[0x10, 0x00]), Some(PRI_HDR_SIZE));
        assert_eq!(header_size(&[0x18]), None);
    }

    #[test]
    fn flag_helpers() {
        assert_eq!(has_secondary_header(&[0x08, 0x00]), Some(true));
        assert_eq!(has_secondary_header(&[0x07, 0xFF]), Some(false));
        assert_eq!(is_command(&[0x18, 0x00]), Some(true));
        assert_eq!(is_command(&[0x08, 0x00]), Some(false));
    }
}
