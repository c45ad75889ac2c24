//! Strongly-typed identifiers used across the domain.
//!
//! Purchase orders live in a relational schema with serial integer keys, so
//! every identifier wraps an `i32` and serializes as a bare JSON number.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a purchase order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseOrderId(i32);

/// Identifier of a purchase order line item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(i32);

/// Identifier of a catalog item referenced by a line item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i32);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i32) -> Self {
                Self(value)
            }

            pub const fn get(&self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i32> for $t {
            fn from(value: i32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(PurchaseOrderId, "PurchaseOrderId");
impl_int_newtype!(LineItemId, "LineItemId");
impl_int_newtype!(ItemId, "ItemId");
