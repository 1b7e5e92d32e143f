use std::collections::HashMap;

use once_cell::sync::Lazy;

const ECHO_REPLY: u16 = 0;
const ECHO: u16 = 8;
const ROUTER_ADVERTISEMENT: u16 = 9;
const ROUTER_SOLICITATION: u16 = 10;
const TIMESTAMP: u16 = 13;
const TIMESTAMP_REPLY: u16 = 14;
const INFO_REQUEST: u16 = 15;
const INFO_REPLY: u16 = 16;
const ADDRESS_MASK_REQUEST: u16 = 17;
const ADDRESS_MASK_REPLY: u16 = 18;

/// Request/reply pairs. Each pair is registered in both directions.
const PAIRS: [(u16, u16); 5] = [
    (ECHO, ECHO_REPLY),
    (TIMESTAMP, TIMESTAMP_REPLY),
    (INFO_REQUEST, INFO_REPLY),
    (ROUTER_SOLICITATION, ROUTER_ADVERTISEMENT),
    (ADDRESS_MASK_REQUEST, ADDRESS_MASK_REPLY),
];

static COUNTERPARTS: Lazy<HashMap<u16, u16>> = Lazy::new(|| {
    PAIRS
        .iter()
        .flat_map(|&(request, reply)| [(request, reply), (reply, request)])
        .collect()
});

/// Returns the type that answers (or is answered by) `icmp_type`, if the type belongs to a
/// request/reply pair. Types without a counterpart describe one-way traffic.
pub(crate) fn counterpart(icmp_type: u16) -> Option<u16> {
    COUNTERPARTS.get(&icmp_type).copied()
}
