//! Error types for the qtclust core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

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
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DistanceCalculator`] operations.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DistanceError {
    /// Requested instance index was outside the calculator's bounds.
    #[error("instance index {index} is out of bounds")]
    OutOfBounds {
        /// The requested instance index that exceeded the calculator bounds.
        index: usize,
    },
    /// The calculator could not produce a distance for the requested pair.
    #[error("distance calculation failed: {detail}")]
    Calculation {
        /// Human-readable description of the failure.
        detail: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`DistanceError`] variants.
    enum DistanceErrorCode for DistanceError {
        /// Requested instance index was outside the calculator's bounds.
        OutOfBounds => OutOfBounds { .. } => "DISTANCE_OUT_OF_BOUNDS",
        /// The calculator could not produce a distance for the requested pair.
        Calculation => Calculation { .. } => "DISTANCE_CALCULATION_FAILED",
    }
}

/// Error type produced when constructing or running [`crate::QtClusterer`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QtError {
    /// The worker-count hint must be at least one thread.
    #[error("thread count must be at least 1 (got {got})")]
    InvalidThreadCount {
        /// The invalid worker-count hint supplied by the caller.
        got: usize,
    },
    /// A [`crate::DistanceCalculator`] operation failed during clustering.
    #[error("distance calculator `{calculator}` failed: {error}")]
    Calculator {
        /// Identifier for the calculator that produced the error.
        calculator: Arc<str>,
        #[source]
        /// Underlying calculator error bubbled up by the engine.
        error: DistanceError,
    },
    /// An instance was recorded using the reserved "unassigned" sentinel.
    #[error("instance index {index} is reserved as the unassigned sentinel")]
    ReservedInstanceIndex {
        /// The rejected instance index.
        index: usize,
    },
    /// A cluster slot beyond the engine's capacity was addressed.
    #[error("cluster slot {slot} must be < capacity {capacity}")]
    ClusterSlotOutOfRange {
        /// The out-of-range slot index.
        slot: usize,
        /// Number of cluster slots available to the engine.
        capacity: usize,
    },
    /// The worker pool for the parallel engine could not be constructed.
    #[error("failed to build worker pool: {detail}")]
    ThreadPool {
        /// Error reported by the pool builder.
        detail: Arc<str>,
    },
    /// The external graph-clustering backend failed.
    #[error("external clustering backend failed: {detail}")]
    External {
        /// Description of the I/O, spawn, exit-status, or parse failure.
        detail: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`QtError`] variants.
    enum QtErrorCode for QtError {
        /// The worker-count hint must be at least one thread.
        InvalidThreadCount => InvalidThreadCount { .. } => "QT_INVALID_THREAD_COUNT",
        /// A [`crate::DistanceCalculator`] operation failed during clustering.
        CalculatorFailure => Calculator { .. } => "QT_CALCULATOR_FAILURE",
        /// An instance was recorded using the reserved "unassigned" sentinel.
        ReservedInstanceIndex => ReservedInstanceIndex { .. } => "QT_RESERVED_INSTANCE_INDEX",
        /// A cluster slot beyond the engine's capacity was addressed.
        ClusterSlotOutOfRange => ClusterSlotOutOfRange { .. } => "QT_CLUSTER_SLOT_OUT_OF_RANGE",
        /// The worker pool for the parallel engine could not be constructed.
        ThreadPool => ThreadPool { .. } => "QT_THREAD_POOL_FAILURE",
        /// The external graph-clustering backend failed.
        External => External { .. } => "QT_EXTERNAL_BACKEND_FAILURE",
    }
}

impl QtError {
    /// Retrieve the inner [`DistanceErrorCode`] when the error originated in a
    /// [`crate::DistanceCalculator`].
    pub const fn distance_code(&self) -> Option<DistanceErrorCode> {
        match self {
            Self::Calculator { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, QtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let err = QtError::InvalidThreadCount { got: 0 };
        assert_eq!(err.code().as_str(), "QT_INVALID_THREAD_COUNT");

        let err = DistanceError::OutOfBounds { index: 7 };
        assert_eq!(err.code().as_str(), "DISTANCE_OUT_OF_BOUNDS");
    }

    #[test]
    fn distance_code_surfaces_wrapped_calculator_errors() {
        let err = QtError::Calculator {
            calculator: Arc::from("fixture"),
            error: DistanceError::OutOfBounds { index: 3 },
        };
        assert_eq!(err.distance_code(), Some(DistanceErrorCode::OutOfBounds));
        assert_eq!(
            QtError::InvalidThreadCount { got: 0 }.distance_code(),
            None
        );
    }
}
