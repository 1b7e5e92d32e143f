use std::net::AddrParseError;

use snafu::Snafu;

/// Errors raised while building a [`FlowTuple`](crate::FlowTuple).
///
/// All validation happens at construction time. Once a tuple exists, computing its Community ID
/// cannot fail.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FlowTupleError {
    /// The combination of fields does not describe a valid flow.
    #[snafu(display("invalid flow tuple field `{}`: {}", field, reason))]
    InvalidTuple { field: &'static str, reason: String },

    /// A textual address was neither dotted-quad IPv4 nor colon-hex IPv6.
    #[snafu(display("could not parse `{}` address {:?}: {}", field, input, source))]
    AddressParse {
        field: &'static str,
        input: String,
        source: AddrParseError,
    },

    /// A raw address was not 4 or 16 bytes long, or `saddr` and `daddr` are of different families.
    #[snafu(display("unsupported address family for `{}`: {}", field, detail))]
    UnsupportedFamily { field: &'static str, detail: String },

    /// A protocol name could not be resolved to an IP protocol number.
    #[snafu(display("unknown protocol {:?}", name))]
    UnknownProtocol { name: String },
}

pub type Result<T, E = FlowTupleError> = std::result::Result<T, E>;
