//! Typed domain separators for canonical hashing.
//!
//! Every digest in the workspace selects a domain via [`HashDomain`], so the
//! same bytes hashed for two different purposes never collide. New domains
//! are added to the single macro invocation below; `as_bytes()`, `ALL` and
//! `Display` are generated from it.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Each variant maps to a unique, null-terminated byte string that is
        /// prepended to the hashed payload.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Kernel
    // -----------------------------------------------------------------------

    /// Graph store identity (labels + canonical edge list).
    GraphStore => b"BFSTEP::GRAPH_STORE::V1\0",

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Exported traversal state.
    TraversalState => b"BFSTEP::TRAVERSAL_STATE::V1\0",

    /// Point-in-time snapshot of a traversal.
    Snapshot => b"BFSTEP::SNAPSHOT::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Step-by-step run transcript.
    Transcript => b"BFSTEP::TRANSCRIPT::V1\0",

    /// Report artifact content hashing.
    ReportArtifact => b"BFSTEP::REPORT_ARTIFACT::V1\0",

    /// Report digest over the artifact hashes.
    ReportDigest => b"BFSTEP::REPORT_DIGEST::V1\0",
}
