use metrics::counter;
use tracing::{debug, trace};

use super::InternalEvent;
use crate::Protocol;

/// Hashing path event. Tracing only, it must not touch the metrics recorder.
#[derive(Debug)]
pub(crate) struct CommunityIdCalculated {
    pub protocol: Protocol,
    pub one_way: bool,
}

impl InternalEvent for CommunityIdCalculated {
    fn emit(self) {
        trace!(
            message = "Calculated community id.",
            protocol = %self.protocol,
            one_way = self.one_way,
        );
    }
}

#[derive(Debug)]
pub(crate) struct FlowTuplePortsIgnored {
    pub protocol: Protocol,
}

impl InternalEvent for FlowTuplePortsIgnored {
    fn emit(self) {
        debug!(
            message = "Ignoring ports for a protocol that does not carry them.",
            protocol = %self.protocol,
        );
        counter!("community_id_ports_ignored_total", 1);
    }
}
