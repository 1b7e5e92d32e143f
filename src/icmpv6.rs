use std::collections::HashMap;

use once_cell::sync::Lazy;

const ECHO_REQUEST: u16 = 128;
const ECHO_REPLY: u16 = 129;
const MLD_LISTENER_QUERY: u16 = 130;
const MLD_LISTENER_REPORT: u16 = 131;
const ROUTER_SOLICITATION: u16 = 133;
const ROUTER_ADVERTISEMENT: u16 = 134;
const NEIGHBOR_SOLICITATION: u16 = 135;
const NEIGHBOR_ADVERTISEMENT: u16 = 136;
const NODE_INFO_QUERY: u16 = 139;
const NODE_INFO_RESPONSE: u16 = 140;
const HOME_AGENT_REQUEST: u16 = 144;
const HOME_AGENT_REPLY: u16 = 145;

const PAIRS: [(u16, u16); 6] = [
    (ECHO_REQUEST, ECHO_REPLY),
    (MLD_LISTENER_QUERY, MLD_LISTENER_REPORT),
    (ROUTER_SOLICITATION, ROUTER_ADVERTISEMENT),
    (NEIGHBOR_SOLICITATION, NEIGHBOR_ADVERTISEMENT),
    (NODE_INFO_QUERY, NODE_INFO_RESPONSE),
    (HOME_AGENT_REQUEST, HOME_AGENT_REPLY),
];

static COUNTERPARTS: Lazy<HashMap<u16, u16>> = Lazy::new(|| {
    PAIRS
        .iter()
        .flat_map(|&(request, reply)| [(request, reply), (reply, request)])
        .collect()
});

/// ICMPv6 flavour of [`icmpv4::counterpart`](crate::icmpv4::counterpart).
pub(crate) fn counterpart(icmp_type: u16) -> Option<u16> {
    COUNTERPARTS.get(&icmp_type).copied()
}
