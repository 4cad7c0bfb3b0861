// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule type definitions for iCalendar.

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::keyword::{
    KW_DAY_FR, KW_DAY_MO, KW_DAY_SA, KW_DAY_SU, KW_DAY_TH, KW_DAY_TU, KW_DAY_WE, KW_RRULE_BYDAY,
    KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY, KW_RRULE_BYSECOND,
    KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT, KW_RRULE_FREQ,
    KW_RRULE_FREQ_DAILY, KW_RRULE_FREQ_HOURLY, KW_RRULE_FREQ_MINUTELY, KW_RRULE_FREQ_MONTHLY,
    KW_RRULE_FREQ_SECONDLY, KW_RRULE_FREQ_WEEKLY, KW_RRULE_FREQ_YEARLY, KW_RRULE_INTERVAL,
    KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::Extra;
use crate::value::datetime::{DateOrDateTime, value_date, value_date_time};

/// Recurrence rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecurrenceRule {
    /// Frequency of recurrence
    pub freq: RecurrenceFrequency,
    /// Until date for recurrence, never set together with `count`
    pub until: Option<DateOrDateTime>,
    /// Number of occurrences
    pub count: Option<u32>,
    /// Interval between recurrences, 1 when not given
    pub interval: u32,
    /// Second specifier
    pub by_second: Vec<i16>,
    /// Minute specifier
    pub by_minute: Vec<i16>,
    /// Hour specifier
    pub by_hour: Vec<i16>,
    /// Day of week specifier
    pub by_day: Vec<WeekDayNum>,
    /// Day of month specifier
    pub by_month_day: Vec<i16>,
    /// Day of year specifier
    pub by_year_day: Vec<i16>,
    /// Week number specifier
    pub by_week_no: Vec<i16>,
    /// Month specifier
    pub by_month: Vec<MonthNum>,
    /// Position in set
    pub by_set_pos: Vec<i16>,
    /// Start day of week
    pub wkst: Option<WeekDay>,
}

impl ValueRecurrenceRule {
    /// Create a rule with only a frequency set.
    #[must_use]
    pub const fn new(freq: RecurrenceFrequency) -> Self {
        Self {
            freq,
            until: None,
            count: None,
            interval: 1,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            wkst: None,
        }
    }

    /// Week start to emit: `None` when unset or the default Monday.
    #[must_use]
    pub fn explicit_wkst(&self) -> Option<WeekDay> {
        self.wkst.filter(|day| *day != WeekDay::Monday)
    }
}

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum RecurrenceFrequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Secondly => write!(f, "{KW_RRULE_FREQ_SECONDLY}"),
            RecurrenceFrequency::Minutely => write!(f, "{KW_RRULE_FREQ_MINUTELY}"),
            RecurrenceFrequency::Hourly => write!(f, "{KW_RRULE_FREQ_HOURLY}"),
            RecurrenceFrequency::Daily => write!(f, "{KW_RRULE_FREQ_DAILY}"),
            RecurrenceFrequency::Weekly => write!(f, "{KW_RRULE_FREQ_WEEKLY}"),
            RecurrenceFrequency::Monthly => write!(f, "{KW_RRULE_FREQ_MONTHLY}"),
            RecurrenceFrequency::Yearly => write!(f, "{KW_RRULE_FREQ_YEARLY}"),
        }
    }
}

/// Day of week with optional occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Day of the week
    pub day: WeekDay,
    /// Occurrence in month or year (optional), e.g. -1 for the last
    pub occurrence: Option<i8>,
}

/// `[ordinal]weekday`, e.g. `2MO` or `-1SU`.
impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.occurrence {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.day)
    }
}

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(missing_docs)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekDay::Sunday => write!(f, "{KW_DAY_SU}"),
            WeekDay::Monday => write!(f, "{KW_DAY_MO}"),
            WeekDay::Tuesday => write!(f, "{KW_DAY_TU}"),
            WeekDay::Wednesday => write!(f, "{KW_DAY_WE}"),
            WeekDay::Thursday => write!(f, "{KW_DAY_TH}"),
            WeekDay::Friday => write!(f, "{KW_DAY_FR}"),
            WeekDay::Saturday => write!(f, "{KW_DAY_SA}"),
        }
    }
}

/// A BYMONTH entry, possibly a leap month as defined in RFC 7529.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthNum {
    /// Month number, 1-12
    pub month: u8,
    /// Whether the entry names the leap month following `month`
    pub leap: bool,
}

/// `N` or `NL` for a leap month.
impl Display for MonthNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.month)?;
        if self.leap {
            write!(f, "L")?;
        }
        Ok(())
    }
}

/// Renders the rule with FREQ first, omitting INTERVAL=1 and WKST=MO.
impl Display for ValueRecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: Display>(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            items: &[T],
        ) -> fmt::Result {
            let Some((first, rest)) = items.split_first() else {
                return Ok(());
            };
            write!(f, ";{name}={first}")?;
            for item in rest {
                write!(f, ",{item}")?;
            }
            Ok(())
        }

        write!(f, "{KW_RRULE_FREQ}={}", self.freq)?;
        if let Some(until) = &self.until {
            write!(f, ";{KW_RRULE_UNTIL}={until}")?;
        } else if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        list(f, KW_RRULE_BYSECOND, &self.by_second)?;
        list(f, KW_RRULE_BYMINUTE, &self.by_minute)?;
        list(f, KW_RRULE_BYHOUR, &self.by_hour)?;
        list(f, KW_RRULE_BYDAY, &self.by_day)?;
        list(f, KW_RRULE_BYMONTHDAY, &self.by_month_day)?;
        list(f, KW_RRULE_BYYEARDAY, &self.by_year_day)?;
        list(f, KW_RRULE_BYWEEKNO, &self.by_week_no)?;
        list(f, KW_RRULE_BYMONTH, &self.by_month)?;
        list(f, KW_RRULE_BYSETPOS, &self.by_set_pos)?;
        if let Some(wkst) = self.explicit_wkst() {
            write!(f, ";{KW_RRULE_WKST}={wkst}")?;
        }
        Ok(())
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
pub(crate) fn value_rrule<'src>()
-> impl Parser<'src, &'src str, ValueRecurrenceRule, Extra<'src>> + Clone {
    recur_rrule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect::<Vec<_>>()
        .try_map(|parts, span| build_from_parts(parts).map_err(|msg| Rich::custom(span, msg)))
}

fn build_from_parts(parts: Vec<Part>) -> Result<ValueRecurrenceRule, &'static str> {
    fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), &'static str> {
        match slot {
            Some(_) => Err("duplicate rule part"),
            None => {
                *slot = Some(value);
                Ok(())
            }
        }
    }

    fn set_list<T>(slot: &mut Vec<T>, value: Vec<T>) -> Result<(), &'static str> {
        if slot.is_empty() {
            *slot = value;
            Ok(())
        } else {
            Err("duplicate rule part")
        }
    }

    let mut freq = None;
    let mut until = None;
    let mut count = None;
    let mut interval = None;
    let mut rule = ValueRecurrenceRule::new(RecurrenceFrequency::Yearly);
    let mut wkst = None;

    for part in parts {
        match part {
            Part::Freq(f) => set_once(&mut freq, f)?,
            Part::Until(u) => set_once(&mut until, u)?,
            Part::Count(c) => set_once(&mut count, c)?,
            Part::Interval(i) => set_once(&mut interval, i)?,
            Part::BySecond(v) => set_list(&mut rule.by_second, v)?,
            Part::ByMinute(v) => set_list(&mut rule.by_minute, v)?,
            Part::ByHour(v) => set_list(&mut rule.by_hour, v)?,
            Part::ByDay(v) => set_list(&mut rule.by_day, v)?,
            Part::ByMonthDay(v) => set_list(&mut rule.by_month_day, v)?,
            Part::ByYearDay(v) => set_list(&mut rule.by_year_day, v)?,
            Part::ByWeekNo(v) => set_list(&mut rule.by_week_no, v)?,
            Part::ByMonth(v) => set_list(&mut rule.by_month, v)?,
            Part::BySetPos(v) => set_list(&mut rule.by_set_pos, v)?,
            Part::Wkst(w) => set_once(&mut wkst, w)?,
        }
    }

    if until.is_some() && count.is_some() {
        return Err("UNTIL and COUNT are mutually exclusive");
    }

    rule.freq = freq.ok_or("FREQ is required")?;
    rule.until = until;
    rule.count = count;
    rule.interval = interval.unwrap_or(1);
    rule.wkst = wkst;
    Ok(rule)
}

#[derive(Debug, Clone)]
enum Part {
    Freq(RecurrenceFrequency),
    Until(DateOrDateTime),
    Count(u32),
    Interval(u32),
    BySecond(Vec<i16>),
    ByMinute(Vec<i16>),
    ByHour(Vec<i16>),
    ByDay(Vec<WeekDayNum>),
    ByMonthDay(Vec<i16>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i16>),
    ByMonth(Vec<MonthNum>),
    BySetPos(Vec<i16>),
    Wkst(WeekDay),
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rrule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> + Clone {
    let kw = |kw| keyword(kw).ignore_then(just('='));

    // Longer keywords first where one is a prefix of another
    choice((
        kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq),
        kw(KW_RRULE_UNTIL).ignore_then(enddate()).map(Part::Until),
        kw(KW_RRULE_COUNT).ignore_then(u32_non_zero()).map(Part::Count),
        kw(KW_RRULE_INTERVAL)
            .ignore_then(u32_non_zero())
            .map(Part::Interval),
        kw(KW_RRULE_BYSECOND)
            .ignore_then(int_list(0, 60, false))
            .map(Part::BySecond),
        kw(KW_RRULE_BYMINUTE)
            .ignore_then(int_list(0, 59, false))
            .map(Part::ByMinute),
        kw(KW_RRULE_BYHOUR)
            .ignore_then(int_list(0, 23, false))
            .map(Part::ByHour),
        kw(KW_RRULE_BYDAY).ignore_then(bywdaylist()).map(Part::ByDay),
        kw(KW_RRULE_BYMONTHDAY)
            .ignore_then(int_list(1, 31, true))
            .map(Part::ByMonthDay),
        kw(KW_RRULE_BYMONTH).ignore_then(bymolist()).map(Part::ByMonth),
        kw(KW_RRULE_BYYEARDAY)
            .ignore_then(int_list(1, 366, true))
            .map(Part::ByYearDay),
        kw(KW_RRULE_BYWEEKNO)
            .ignore_then(int_list(1, 53, true))
            .map(Part::ByWeekNo),
        kw(KW_RRULE_BYSETPOS)
            .ignore_then(int_list(1, 366, true))
            .map(Part::BySetPos),
        kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst),
    ))
}

/// Rule part names and values are matched ignoring ASCII case.
fn keyword<'src>(kw: &'static str) -> impl Parser<'src, &'src str, (), Extra<'src>> + Clone {
    any()
        .repeated()
        .exactly(kw.len())
        .to_slice()
        .try_map(move |s: &str, span| {
            if s.eq_ignore_ascii_case(kw) {
                Ok(())
            } else {
                Err(Rich::custom(span, format!("expected {kw}")))
            }
        })
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, RecurrenceFrequency, Extra<'src>> + Clone {
    choice((
        keyword(KW_RRULE_FREQ_SECONDLY).to(RecurrenceFrequency::Secondly),
        keyword(KW_RRULE_FREQ_MINUTELY).to(RecurrenceFrequency::Minutely),
        keyword(KW_RRULE_FREQ_HOURLY).to(RecurrenceFrequency::Hourly),
        keyword(KW_RRULE_FREQ_DAILY).to(RecurrenceFrequency::Daily),
        keyword(KW_RRULE_FREQ_WEEKLY).to(RecurrenceFrequency::Weekly),
        keyword(KW_RRULE_FREQ_MONTHLY).to(RecurrenceFrequency::Monthly),
        keyword(KW_RRULE_FREQ_YEARLY).to(RecurrenceFrequency::Yearly),
    ))
}

/// ```txt
/// enddate     = date / date-time
/// ```
fn enddate<'src>() -> impl Parser<'src, &'src str, DateOrDateTime, Extra<'src>> + Clone {
    choice((
        value_date_time().map(DateOrDateTime::DateTime),
        value_date().map(DateOrDateTime::Date),
    ))
}

fn digits<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10)
        .collect::<String>()
        .try_map(|digits, span| {
            lexical::parse::<u32, _>(&digits).map_err(|_| Rich::custom(span, "number too large"))
        })
}

fn u32_non_zero<'src>() -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    digits().try_map(|n, span| {
        if n == 0 {
            Err(Rich::custom(span, "expected a positive integer"))
        } else {
            Ok(n)
        }
    })
}

/// A comma separated list of integers within `min..=max`, optionally signed.
///
/// ```txt
/// byseclist   = ( seconds *("," seconds) )
/// bymodaylist = ( monthdaynum *("," monthdaynum) )
/// monthdaynum = [plus / minus] ordmoday
/// ```
fn int_list<'src>(
    min: i16,
    max: i16,
    signed: bool,
) -> impl Parser<'src, &'src str, Vec<i16>, Extra<'src>> + Clone {
    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .try_map(move |sign, span| match sign {
            Some(_) if !signed => Err(Rich::custom(span, "sign not allowed")),
            sign => Ok(!matches!(sign, Some('-'))),
        });

    sign.then(digits())
        .try_map(move |(positive, n), span| match i16::try_from(n) {
            Ok(n) if (min..=max).contains(&n) => Ok(if positive { n } else { -n }),
            _ => Err(Rich::custom(span, "number out of range")),
        })
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ordwk       = 1*2DIGIT       ;1 to 53
/// ```
fn bywdaylist<'src>() -> impl Parser<'src, &'src str, Vec<WeekDayNum>, Extra<'src>> + Clone {
    let ordwk = select! { c @ ('+' | '-') => c }
        .or_not()
        .then(digits())
        .try_map(|(sign, n), span| match i8::try_from(n) {
            Ok(n) if (1..=53).contains(&n) => Ok(if sign == Some('-') { -n } else { n }),
            _ => Err(Rich::custom(span, "week ordinal out of range")),
        });

    ordwk
        .or_not()
        .then(weekday())
        .map(|(occurrence, day)| WeekDayNum { day, occurrence })
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// ```txt
/// bymolist    = ( monthnum *("," monthnum) )
/// monthnum    = 1*2DIGIT ["L"] ;1 to 12, "L" for a leap month (RFC 7529)
/// ```
fn bymolist<'src>() -> impl Parser<'src, &'src str, Vec<MonthNum>, Extra<'src>> + Clone {
    digits()
        .then(one_of("Ll").or_not())
        .try_map(|(n, leap), span| match u8::try_from(n) {
            Ok(month) if (1..=12).contains(&month) => Ok(MonthNum {
                month,
                leap: leap.is_some(),
            }),
            _ => Err(Rich::custom(span, "month out of range")),
        })
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, WeekDay, Extra<'src>> + Clone {
    choice((
        keyword(KW_DAY_SU).to(WeekDay::Sunday),
        keyword(KW_DAY_MO).to(WeekDay::Monday),
        keyword(KW_DAY_TU).to(WeekDay::Tuesday),
        keyword(KW_DAY_WE).to(WeekDay::Wednesday),
        keyword(KW_DAY_TH).to(WeekDay::Thursday),
        keyword(KW_DAY_FR).to(WeekDay::Friday),
        keyword(KW_DAY_SA).to(WeekDay::Saturday),
    ))
}

#[cfg(test)]
mod tests {
    use crate::value::{ValueDate, ValueDateTime, ValueTime};

    use super::*;

    fn parse(src: &str) -> Result<ValueRecurrenceRule, Vec<Rich<'_, char>>> {
        value_rrule().parse(src).into_result()
    }

    #[test]
    fn parses_simple_rule() {
        let rule = parse("FREQ=DAILY;COUNT=10").unwrap();
        assert_eq!(rule.freq, RecurrenceFrequency::Daily);
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.until, None);
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.wkst, None);
    }

    #[test]
    fn parses_rule_parts_in_any_order() {
        let rule = parse("BYDAY=2MO,-1SU,FR;INTERVAL=2;FREQ=MONTHLY;UNTIL=19971224T000000Z").unwrap();
        assert_eq!(rule.freq, RecurrenceFrequency::Monthly);
        assert_eq!(rule.interval, 2);
        assert_eq!(
            rule.until,
            Some(DateOrDateTime::DateTime(ValueDateTime::new(
                ValueDate {
                    year: 1997,
                    month: 12,
                    day: 24
                },
                ValueTime::new(0, 0, 0, true),
            )))
        );
        assert_eq!(
            rule.by_day,
            [
                WeekDayNum {
                    day: WeekDay::Monday,
                    occurrence: Some(2)
                },
                WeekDayNum {
                    day: WeekDay::Sunday,
                    occurrence: Some(-1)
                },
                WeekDayNum {
                    day: WeekDay::Friday,
                    occurrence: None
                },
            ]
        );
    }

    #[test]
    fn parses_numeric_lists() {
        let rule =
            parse("FREQ=YEARLY;BYMONTH=1,5L;BYMONTHDAY=-1,15;BYYEARDAY=100,-366;BYSETPOS=-1")
                .unwrap();
        assert_eq!(
            rule.by_month,
            [
                MonthNum {
                    month: 1,
                    leap: false
                },
                MonthNum {
                    month: 5,
                    leap: true
                },
            ]
        );
        assert_eq!(rule.by_month_day, [-1, 15]);
        assert_eq!(rule.by_year_day, [100, -366]);
        assert_eq!(rule.by_set_pos, [-1]);
    }

    #[test]
    fn rejects_invalid_rules() {
        for src in [
            "COUNT=10",                              // FREQ is required
            "FREQ=DAILY;FREQ=WEEKLY",                // duplicate part
            "FREQ=DAILY;COUNT=5;UNTIL=20250101",     // UNTIL and COUNT
            "FREQ=DAILY;INTERVAL=0",                 // interval must be positive
            "FREQ=DAILY;BYHOUR=24",                  // out of range
            "FREQ=DAILY;BYHOUR=-1",                  // sign not allowed
            "FREQ=YEARLY;BYMONTH=13",                // out of range
            "FREQ=FORTNIGHTLY",                      // unknown frequency
        ] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn matches_names_ignoring_case() {
        let rule = parse("freq=daily;Interval=2;byday=-1su,Fr;bymonth=5l;wkst=tu").unwrap();
        assert_eq!(rule.freq, RecurrenceFrequency::Daily);
        assert_eq!(rule.interval, 2);
        assert_eq!(
            rule.by_day,
            [
                WeekDayNum {
                    day: WeekDay::Sunday,
                    occurrence: Some(-1)
                },
                WeekDayNum {
                    day: WeekDay::Friday,
                    occurrence: None
                },
            ]
        );
        assert_eq!(rule.to_string(), "FREQ=DAILY;INTERVAL=2;BYDAY=-1SU,FR;BYMONTH=5L;WKST=TU");
    }

    #[test]
    fn renders_with_defaults_suppressed() {
        let rule = parse("WKST=MO;INTERVAL=1;BYDAY=MO,WE;FREQ=WEEKLY").unwrap();
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;BYDAY=MO,WE");

        let rule = parse("FREQ=WEEKLY;WKST=TU;INTERVAL=3;UNTIL=20250101").unwrap();
        assert_eq!(rule.to_string(), "FREQ=WEEKLY;UNTIL=20250101;INTERVAL=3;WKST=TU");

        let rule = parse("FREQ=YEARLY;BYMONTH=5L,6").unwrap();
        assert_eq!(rule.to_string(), "FREQ=YEARLY;BYMONTH=5L,6");
    }
}
