//! Error types for the small-world core library.
//!
//! Defines the generator and graph error enums exposed by the public API,
//! their stable machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::params::GenerationParameters;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::Graph`] from caller-supplied
/// edges.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node outside `[0, node_count)`.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The offending node identifier.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joined a node to itself.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// Node the loop was attached to.
        node: usize,
    },
    /// The same unordered pair appeared more than once.
    #[error("duplicate edge between {source_node} and {target_node}")]
    DuplicateEdge {
        /// Lower endpoint of the repeated edge.
        source_node: usize,
        /// Higher endpoint of the repeated edge.
        target_node: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a node outside the graph.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The same unordered pair appeared more than once.
        DuplicateEdge => DuplicateEdge { .. } => "GRAPH_DUPLICATE_EDGE",
    }
}

/// Error type produced when configuring or running the small-world generator.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SmallWorldError {
    /// The supplied parameters can never yield a connected graph, or are out
    /// of range.
    #[error("invalid generation parameters: {reason}")]
    InvalidParameters {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },
    /// Every attempt within the retry budget produced a disconnected graph.
    #[error("no connected graph for {parameters} after {tries} tries")]
    GenerationExhausted {
        /// Parameters used for every attempt.
        parameters: GenerationParameters,
        /// Number of attempts made before giving up.
        tries: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`SmallWorldError`] variants.
    enum SmallWorldErrorCode for SmallWorldError {
        /// The supplied parameters were rejected before generation.
        InvalidParameters => InvalidParameters { .. } => "SMALLWORLD_INVALID_PARAMETERS",
        /// The retry budget was exhausted without producing a connected graph.
        GenerationExhausted => GenerationExhausted { .. } => "SMALLWORLD_GENERATION_EXHAUSTED",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SmallWorldError>;
