//! Error types for the djset core library.
//!
//! Every public operation validates its inputs before touching the partition,
//! so an error always leaves the structure exactly as it was before the call.

use std::fmt;

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

/// Error produced by [`crate::Partition`] and [`crate::PointMatrix`]
/// operations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PartitionError {
    /// An element index fell outside `[0, len)`.
    #[error("index {index} is out of bounds for a partition of {len} elements")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of elements in the partition.
        len: usize,
    },
    /// A point matrix did not have the declared shape.
    #[error(
        "point matrix has shape ({rows}, {cols}) but ({expected_rows}, {expected_cols}) was declared"
    )]
    ShapeMismatch {
        /// Declared number of rows.
        expected_rows: usize,
        /// Declared number of columns.
        expected_cols: usize,
        /// Actual number of rows.
        rows: usize,
        /// Actual number of columns.
        cols: usize,
    },
    /// A neighbour sequence did not have the declared length.
    #[error("neighbour sequence has length {actual} but {expected} was declared")]
    SizeMismatch {
        /// Declared number of neighbours.
        expected: usize,
        /// Actual number of neighbours supplied.
        actual: usize,
    },
    /// The distance threshold was NaN or negative.
    #[error("distance threshold must be a non-negative number (got {got})")]
    InvalidThreshold {
        /// Threshold supplied by the caller.
        got: f32,
    },
    /// Nested rows handed to [`crate::PointMatrix::try_from_rows`] differ in
    /// length.
    #[error("row {row} has length {actual} but expected {expected}")]
    RaggedRows {
        /// Row whose length disagreed with the first row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// `rows * cols` does not fit in `usize`.
    #[error("matrix with {rows} rows and {cols} columns exceeds capacity limits")]
    CapacityOverflow {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// An element index fell outside the partition.
        IndexOutOfBounds => IndexOutOfBounds { .. } => "PARTITION_INDEX_OUT_OF_BOUNDS",
        /// A point matrix did not have the declared shape.
        ShapeMismatch => ShapeMismatch { .. } => "PARTITION_SHAPE_MISMATCH",
        /// A neighbour sequence did not have the declared length.
        SizeMismatch => SizeMismatch { .. } => "PARTITION_SIZE_MISMATCH",
        /// The distance threshold was NaN or negative.
        InvalidThreshold => InvalidThreshold { .. } => "PARTITION_INVALID_THRESHOLD",
        /// Nested rows differ in length.
        RaggedRows => RaggedRows { .. } => "PARTITION_RAGGED_ROWS",
        /// The matrix shape overflows `usize`.
        CapacityOverflow => CapacityOverflow { .. } => "PARTITION_CAPACITY_OVERFLOW",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PartitionError>;
