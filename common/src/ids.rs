// Object identifiers
//
// Every ledger object is referenced by a sequential instance number.
// Relations between objects (registrar, owner, issuer...) are stored as
// these ids and resolved through the owning store, never as pointers.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_object_id {
    ($name:ident, $prefix:expr) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            #[inline]
            pub const fn new(instance: u64) -> Self {
                Self(instance)
            }

            #[inline]
            pub const fn instance(&self) -> u64 {
                self.0
            }

            // Next id in allocation order
            #[inline]
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl From<u64> for $name {
            fn from(instance: u64) -> Self {
                Self(instance)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

define_object_id!(AccountId, "1.2.");
define_object_id!(AssetId, "1.3.");
define_object_id!(VestingBalanceId, "1.13.");
define_object_id!(HtlcId, "1.16.");
