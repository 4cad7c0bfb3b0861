// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters as defined in RFC 5545 Section 3.2.

use crate::keyword::{
    KW_ALTREP, KW_CN, KW_CUTYPE, KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_ENCODING,
    KW_FBTYPE, KW_FMTTYPE, KW_LANGUAGE, KW_MEMBER, KW_PARTSTAT, KW_RANGE, KW_RELATED, KW_RELTYPE,
    KW_ROLE, KW_RSVP, KW_SENT_BY, KW_TZID, KW_VALUE,
};
use crate::kind::impl_kind_mapping;
use crate::syntax::ContentParameter;
use crate::value::ValueKind;

impl_kind_mapping! {
    /// Kinds of iCalendar parameters
    #[expect(missing_docs)]
    enum ParameterKind {
        AlternateText       => KW_ALTREP,
        CommonName          => KW_CN,
        CalendarUserType    => KW_CUTYPE,
        Delegators          => KW_DELEGATED_FROM,
        Delegatees          => KW_DELEGATED_TO,
        Directory           => KW_DIR,
        Encoding            => KW_ENCODING,
        FormatType          => KW_FMTTYPE,
        FreeBusyType        => KW_FBTYPE,
        Language            => KW_LANGUAGE,
        GroupOrListMembership => KW_MEMBER,
        ParticipationStatus => KW_PARTSTAT,
        RecurrenceIdRange   => KW_RANGE,
        AlarmTriggerRelationship => KW_RELATED,
        RelationshipType    => KW_RELTYPE,
        ParticipationRole   => KW_ROLE,
        RsvpExpectation     => KW_RSVP,
        SendBy              => KW_SENT_BY,
        TimeZoneIdentifier  => KW_TZID,
        ValueType           => KW_VALUE,
    }
}

/// A parameter attached to a property, owned by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Kind of the parameter
    pub kind: ParameterKind,

    /// Values in source order, unquoted
    pub values: Vec<String>,
}

impl Parameter {
    /// Values joined by commas, the single-string form used by xCal and jCal.
    #[must_use]
    pub fn joined(&self) -> String {
        self.values.join(",")
    }

    /// The value kind named by a `VALUE=` parameter.
    ///
    /// Returns `None` for other parameters and for unknown type names.
    #[must_use]
    pub fn value_kind(&self) -> Option<ValueKind> {
        match self.kind {
            ParameterKind::ValueType => self.values.first()?.parse().ok(),
            _ => None,
        }
    }
}

impl From<ContentParameter> for Parameter {
    fn from(param: ContentParameter) -> Self {
        Self {
            kind: ParameterKind::from(param.name.as_str()),
            values: param.values,
        }
    }
}
