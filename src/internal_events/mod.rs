mod community_id;

pub(crate) use self::community_id::*;

/// An event emitted by this crate for observability: a `tracing` event plus any counters that
/// go with it.
pub(crate) trait InternalEvent: Sized {
    fn emit(self);
}

macro_rules! emit {
    ($event:expr) => {
        $crate::internal_events::InternalEvent::emit($event)
    };
}

pub(crate) use emit;
