//! Call records consumed by contract billing.
//!
//! Only the duration matters for billing; the numbers and locations are kept for
//! the directory and reporting layers that sit around the core.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{BillingPeriod, PhoneNumber};

/// A `(longitude, latitude)` pair.
pub type Coordinates = (f64, f64);

/// A completed phone call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Call {
    /// The calling line.
    pub src_number: PhoneNumber,

    /// The called line.
    pub dst_number: PhoneNumber,

    /// When the call started.
    pub time: NaiveDateTime,

    /// Call length in seconds.
    pub duration: u32,

    /// Where the caller was.
    pub src_loc: Coordinates,

    /// Where the callee was.
    pub dst_loc: Coordinates,
}

impl Call {
    /// Create a new call record.
    #[must_use]
    pub fn new(
        src_number: PhoneNumber,
        dst_number: PhoneNumber,
        time: NaiveDateTime,
        duration: u32,
        src_loc: Coordinates,
        dst_loc: Coordinates,
    ) -> Self {
        Self {
            src_number,
            dst_number,
            time,
            duration,
            src_loc,
            dst_loc,
        }
    }

    /// Whole minutes charged for this call; partial minutes round up.
    #[must_use]
    pub const fn billable_minutes(&self) -> u32 {
        self.duration.div_ceil(60)
    }

    /// The billing period the call belongs to.
    #[must_use]
    pub fn period(&self) -> BillingPeriod {
        BillingPeriod::of(&self.time)
    }
}
