//! Recurrence rule expansion (RFC 5545 §3.3.10).
//!
//! Expansion walks interval by interval from the seed instant. Each interval
//! contributes a sorted batch of candidate instants shaped by the BY parts;
//! BYMONTH/BYMONTHDAY/BYDAY expand or limit depending on the frequency, per
//! the table in RFC 5545 §3.3.10. Interval indexes are always multiples of
//! the rule interval from the seed, so a skipped interval (say, FEB for a
//! rule pinned to the 31st) never shifts the ones after it.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use koyomi_core::CalDateTime;
use tracing::warn;

use crate::ical::core::{Frequency, RRule, Weekday};

/// Consecutive empty intervals scanned before expansion gives up.
///
/// A rule whose BY parts never match anything (BYMONTHDAY=30 with BYMONTH=2)
/// would otherwise scan forever, yet satisfiable rules can sit on long gaps:
/// a leap-day rule crossing a common century year waits eight years between
/// matches. Daily and coarser frequencies get one full 400-year Gregorian
/// cycle, within which any satisfiable date pattern recurs whatever the
/// interval. A full cycle is too many steps at sub-daily frequencies, so
/// those scan a 4_500-day window instead.
const fn empty_interval_budget(freq: Frequency) -> u32 {
    const CYCLE_YEARS: u32 = 400;
    const CYCLE_DAYS: u32 = 146_097;
    const SUB_DAILY_SCAN_DAYS: u32 = 4_500;
    match freq {
        Frequency::Secondly => SUB_DAILY_SCAN_DAYS * 86_400,
        Frequency::Minutely => SUB_DAILY_SCAN_DAYS * 1_440,
        Frequency::Hourly => SUB_DAILY_SCAN_DAYS * 24,
        Frequency::Daily => CYCLE_DAYS,
        Frequency::Weekly => CYCLE_DAYS / 7,
        Frequency::Monthly => CYCLE_YEARS * 12,
        Frequency::Yearly => CYCLE_YEARS,
    }
}

/// Iterator over the instants a recurrence rule generates from a seed.
///
/// The seed is the component's start; it is the first instant yielded when
/// it matches the rule's pattern, and candidates before it are dropped. The
/// COUNT and UNTIL bounds are applied in-stream, so a bounded rule's
/// iterator is finite. Instants keep the seed's UTC or floating form.
#[derive(Debug, Clone)]
pub struct RecurIter {
    rule: RRule,
    seed: NaiveDateTime,
    utc: bool,
    /// Inclusive upper bound resolved from UNTIL, if any.
    until: Option<NaiveDateTime>,
    /// Index of the next interval to expand.
    cursor: i64,
    /// Candidates from the current interval, sorted descending so `pop`
    /// yields the earliest first.
    pending: Vec<NaiveDateTime>,
    emitted: u32,
    done: bool,
}

impl RecurIter {
    /// Creates an expansion iterator for a rule seeded at the given start.
    #[must_use]
    pub fn new(rule: RRule, seed: CalDateTime) -> Self {
        let until = rule.until.map(|u| u.limit().naive());
        Self {
            rule,
            seed: seed.naive(),
            utc: seed.is_utc(),
            until,
            cursor: 0,
            pending: Vec::new(),
            emitted: 0,
            done: false,
        }
    }

    /// Fills `pending` from the next non-empty interval.
    ///
    /// Returns `None` once the rule is exhausted: the interval base ran past
    /// the UNTIL bound, date arithmetic overflowed, or too many consecutive
    /// intervals came up empty.
    fn fill_next_interval(&mut self) -> Option<()> {
        let budget = empty_interval_budget(self.rule.freq);
        for _ in 0..budget {
            let base = self.interval_base(self.cursor)?;
            self.cursor += 1;
            if self.past_horizon(base) {
                return None;
            }
            let mut candidates = self.interval_candidates(base);
            if candidates.is_empty() {
                continue;
            }
            candidates.sort_unstable();
            candidates.dedup();
            candidates.reverse();
            self.pending = candidates;
            return Some(());
        }
        warn!(
            rule = %self.rule,
            "no candidates in {budget} consecutive intervals, ending expansion"
        );
        None
    }

    /// Returns the base instant of the interval at `idx` steps from the seed.
    fn interval_base(&self, idx: i64) -> Option<NaiveDateTime> {
        let step = i64::from(self.rule.interval).checked_mul(idx)?;
        match self.rule.freq {
            Frequency::Secondly => self.seed.checked_add_signed(TimeDelta::try_seconds(step)?),
            Frequency::Minutely => self
                .seed
                .checked_add_signed(TimeDelta::try_seconds(step.checked_mul(60)?)?),
            Frequency::Hourly => self
                .seed
                .checked_add_signed(TimeDelta::try_seconds(step.checked_mul(3600)?)?),
            Frequency::Daily => self
                .seed
                .checked_add_signed(TimeDelta::try_seconds(step.checked_mul(86_400)?)?),
            Frequency::Weekly => self
                .seed
                .checked_add_signed(TimeDelta::try_seconds(step.checked_mul(604_800)?)?),
            Frequency::Monthly => self.seed.checked_add_months(Months::new(u32::try_from(step).ok()?)),
            Frequency::Yearly => self
                .seed
                .checked_add_months(Months::new(u32::try_from(step.checked_mul(12)?).ok()?)),
        }
    }

    /// Whether the interval at `base` lies wholly past the UNTIL bound.
    ///
    /// Candidates can precede their interval base (BYMONTH=3 inside a year
    /// based in June), so the check allows one unit of slack before
    /// declaring the stream exhausted.
    fn past_horizon(&self, base: NaiveDateTime) -> bool {
        let Some(until) = self.until else {
            return false;
        };
        let slack = match self.rule.freq {
            Frequency::Yearly => 366,
            Frequency::Monthly => 31,
            Frequency::Weekly => 7,
            _ => 0,
        };
        TimeDelta::try_days(slack)
            .and_then(|d| until.checked_add_signed(d))
            .is_some_and(|horizon| base > horizon)
    }

    fn interval_candidates(&self, base: NaiveDateTime) -> Vec<NaiveDateTime> {
        match self.rule.freq {
            Frequency::Secondly | Frequency::Minutely | Frequency::Hourly | Frequency::Daily => {
                self.limited_base(base)
            }
            Frequency::Weekly => self.weekly_candidates(base),
            Frequency::Monthly => self.monthly_candidates(base),
            Frequency::Yearly => self.yearly_candidates(base),
        }
    }

    /// Sub-daily and daily frequencies: every BY part acts as a limit.
    fn limited_base(&self, base: NaiveDateTime) -> Vec<NaiveDateTime> {
        let date = base.date();
        if self.matches_by_month(date) && self.matches_by_month_day(date) && self.matches_weekday(date)
        {
            vec![base]
        } else {
            Vec::new()
        }
    }

    /// Weekly frequency: BYDAY expands across the WKST-aligned week, BYMONTH
    /// limits.
    fn weekly_candidates(&self, base: NaiveDateTime) -> Vec<NaiveDateTime> {
        if self.rule.by_day.is_empty() {
            if self.matches_by_month(base.date()) {
                return vec![base];
            }
            return Vec::new();
        }

        let wkst = self.rule.wkst.num_days_from_monday();
        let back = (base.date().weekday().num_days_from_monday() + 7 - wkst) % 7;
        let Some(week_start) = TimeDelta::try_days(i64::from(back))
            .and_then(|d| base.date().checked_sub_signed(d))
        else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for offset in 0..7 {
            let Some(date) = TimeDelta::try_days(offset)
                .and_then(|d| week_start.checked_add_signed(d))
            else {
                continue;
            };
            if self.matches_weekday(date) && self.matches_by_month(date) {
                candidates.push(date.and_time(base.time()));
            }
        }
        candidates
    }

    /// Monthly frequency: BYMONTHDAY and BYDAY expand (BYDAY limits when
    /// both appear), BYMONTH limits. Without day-shaping parts the seed's
    /// day-of-month is kept and short months are skipped.
    fn monthly_candidates(&self, base: NaiveDateTime) -> Vec<NaiveDateTime> {
        let date = base.date();
        if !self.matches_by_month(date) {
            return Vec::new();
        }

        if !self.rule.by_month_day.is_empty() {
            let mut days = self.expand_by_month_day(date.year(), date.month());
            if !self.rule.by_day.is_empty() {
                days.retain(|d| self.matches_weekday(*d));
            }
            return at_time(days, base);
        }

        if !self.rule.by_day.is_empty() {
            return at_time(self.expand_by_day_in_month(date.year(), date.month()), base);
        }

        if date.day() == self.seed_day() {
            vec![base]
        } else {
            Vec::new()
        }
    }

    /// Yearly frequency: BYMONTH, BYMONTHDAY and BYDAY expand in combination
    /// per RFC 5545 §3.3.10; without them the seed's month-day is kept and
    /// non-leap years are skipped for a FEB 29 seed.
    fn yearly_candidates(&self, base: NaiveDateTime) -> Vec<NaiveDateTime> {
        let year = base.date().year();

        if !self.rule.by_day.is_empty() {
            let mut days = if self.rule.by_month.is_empty() {
                self.expand_by_day_in_year(year)
            } else {
                let mut days = Vec::new();
                for &m in &self.rule.by_month {
                    days.extend(self.expand_by_day_in_month(year, u32::from(m)));
                }
                days
            };
            if !self.rule.by_month_day.is_empty() {
                days.retain(|d| self.matches_by_month_day(*d));
            }
            return at_time(days, base);
        }

        if !self.rule.by_month.is_empty() {
            let mut days = Vec::new();
            for &m in &self.rule.by_month {
                if self.rule.by_month_day.is_empty() {
                    days.extend(NaiveDate::from_ymd_opt(year, u32::from(m), self.seed_day()));
                } else {
                    days.extend(self.expand_by_month_day(year, u32::from(m)));
                }
            }
            return at_time(days, base);
        }

        if !self.rule.by_month_day.is_empty() {
            let mut days = Vec::new();
            for month in 1..=12 {
                days.extend(self.expand_by_month_day(year, month));
            }
            return at_time(days, base);
        }

        if base.date().day() == self.seed_day() {
            vec![base]
        } else {
            Vec::new()
        }
    }

    fn matches_by_month(&self, date: NaiveDate) -> bool {
        self.rule.by_month.is_empty()
            || self.rule.by_month.iter().any(|&m| u32::from(m) == date.month())
    }

    fn matches_by_month_day(&self, date: NaiveDate) -> bool {
        if self.rule.by_month_day.is_empty() {
            return true;
        }
        let last = days_in_month(date.year(), date.month());
        self.rule
            .by_month_day
            .iter()
            .any(|&md| month_day(md, last).is_some_and(|d| d == date.day()))
    }

    /// Weekday-only BYDAY match; ordinals are meaningful only where BYDAY
    /// expands and are ignored here.
    fn matches_weekday(&self, date: NaiveDate) -> bool {
        self.rule.by_day.is_empty()
            || self.rule.by_day.iter().any(|wd| wd.weekday == date.weekday())
    }

    fn expand_by_month_day(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        let last = days_in_month(year, month);
        let mut days = Vec::new();
        for &md in &self.rule.by_month_day {
            if let Some(date) =
                month_day(md, last).and_then(|d| NaiveDate::from_ymd_opt(year, month, d))
            {
                days.push(date);
            }
        }
        days
    }

    fn expand_by_day_in_month(&self, year: i32, month: u32) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        for wd in &self.rule.by_day {
            let matching = weekday_dates_in_month(year, month, wd.weekday);
            days.extend(select_ordinal(&matching, wd.ordinal));
        }
        days
    }

    /// BYDAY in a yearly rule without BYMONTH: ordinals index into the
    /// year's full run of that weekday (BYDAY=20MO is the twentieth Monday).
    fn expand_by_day_in_year(&self, year: i32) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        for wd in &self.rule.by_day {
            let matching: Vec<NaiveDate> = (1..=12)
                .flat_map(|m| weekday_dates_in_month(year, m, wd.weekday))
                .collect();
            days.extend(select_ordinal(&matching, wd.ordinal));
        }
        days
    }

    fn seed_day(&self) -> u32 {
        self.seed.date().day()
    }
}

impl Iterator for RecurIter {
    type Item = CalDateTime;

    fn next(&mut self) -> Option<CalDateTime> {
        if self.done {
            return None;
        }
        if self.rule.count.is_some_and(|count| self.emitted >= count) {
            self.done = true;
            return None;
        }
        loop {
            if let Some(naive) = self.pending.pop() {
                if naive < self.seed {
                    continue;
                }
                if self.until.is_some_and(|until| naive > until) {
                    self.done = true;
                    self.pending.clear();
                    return None;
                }
                self.emitted += 1;
                return Some(CalDateTime::from_naive(naive, self.utc));
            }
            if self.fill_next_interval().is_none() {
                self.done = true;
                return None;
            }
        }
    }
}

impl std::iter::FusedIterator for RecurIter {}

fn at_time(days: Vec<NaiveDate>, base: NaiveDateTime) -> Vec<NaiveDateTime> {
    days.into_iter().map(|d| d.and_time(base.time())).collect()
}

/// Resolves a BYMONTHDAY entry against a month of `last` days.
///
/// Negative entries count back from the end (-1 is the last day). Entries
/// that fall outside the month resolve to nothing.
fn month_day(md: i8, last: u32) -> Option<u32> {
    let day = if md > 0 {
        i64::from(md)
    } else {
        i64::from(last) + i64::from(md) + 1
    };
    u32::try_from(day).ok().filter(|d| (1..=last).contains(d))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|d| d.pred_opt()).map_or(31, |d| d.day())
}

fn weekday_dates_in_month(year: i32, month: u32, weekday: Weekday) -> Vec<NaiveDate> {
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|d| d.weekday() == weekday)
        .collect()
}

/// Selects dates by BYDAY ordinal: `None` keeps all, `1` the first, `-1`
/// the last. Out-of-range ordinals select nothing.
fn select_ordinal(matching: &[NaiveDate], ordinal: Option<i8>) -> Vec<NaiveDate> {
    match ordinal {
        None => matching.to_vec(),
        Some(n) if n > 0 => {
            let idx = usize::from(n.unsigned_abs()) - 1;
            matching.get(idx).copied().into_iter().collect()
        }
        Some(n) => matching
            .len()
            .checked_sub(usize::from(n.unsigned_abs()))
            .and_then(|idx| matching.get(idx))
            .copied()
            .into_iter()
            .collect(),
    }
}
