// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period value type parser as defined in RFC 5545 Section 3.3.9.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::value::Extra;
use crate::value::datetime::{ValueDateTime, value_date_time};
use crate::value::duration::{ValueDuration, value_duration};

/// Period of Time value defined in RFC 5545 Section 3.3.9
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePeriod {
    /// Explicit period with start and end date-time
    ///
    /// Format: `date-time "/" date-time`
    Explicit {
        /// Start date-time
        start: ValueDateTime,

        /// End date-time
        end: ValueDateTime,
    },

    /// Period with start date-time and duration
    ///
    /// Format: `date-time "/" dur-value`
    Duration {
        /// Start date-time
        start: ValueDateTime,

        /// Duration
        duration: ValueDuration,
    },
}

impl ValuePeriod {
    /// Start of the period.
    #[must_use]
    pub const fn start(&self) -> ValueDateTime {
        match self {
            ValuePeriod::Explicit { start, .. } | ValuePeriod::Duration { start, .. } => *start,
        }
    }
}

impl Display for ValuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValuePeriod::Explicit { start, end } => write!(f, "{start}/{end}"),
            ValuePeriod::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// period-start    = date-time "/" dur-value
/// ```
pub(crate) fn value_period<'src>() -> impl Parser<'src, &'src str, ValuePeriod, Extra<'src>> + Clone
{
    let explicit = value_date_time()
        .then_ignore(just('/'))
        .then(value_date_time())
        .map(|(start, end)| ValuePeriod::Explicit { start, end });

    let start = value_date_time()
        .then_ignore(just('/'))
        .then(value_duration())
        .map(|(start, duration)| ValuePeriod::Duration { start, duration });

    choice((explicit, start))
}
