// src/schedule.rs
//
// Opening hours as three day groups (Mon–Fri, Saturday, Sunday) and the
// "is it open right now" check in local time.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Weekday};

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Window {
    /// Midnight to midnight: never open.
    pub const CLOSED: Window = Window { open: NaiveTime::MIN, close: NaiveTime::MIN };

    /// Parse `"<open> - <close>"`, e.g. `"6:00am - 10:00pm"`.
    pub fn parse(text: &str) -> Result<Window> {
        let mut parts = text.split(['-', '–', '—']);
        let (Some(open), Some(close), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(Error::Hours(s!(text)));
        };
        Ok(Window { open: parse_clock(open)?, close: parse_clock(close)? })
    }

    /// Both boundaries on `date` in `tz`. Ambiguous local times (DST fall-back)
    /// take the earlier instant.
    pub fn on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let pin = |t: NaiveTime| {
            let local = date.and_time(t);
            tz.from_local_datetime(&local)
                .earliest()
                .map(|dt| dt.fixed_offset())
                .ok_or(Error::LocalTime(local))
        };
        Ok((pin(self.open)?, pin(self.close)?))
    }
}

/// 12-hour clock with an am/pm suffix: `6:00am`, `10pm`, `9:30 P.M.`, `noon`.
/// Anything but letters, digits and `:` is ignored.
pub fn parse_clock(text: &str) -> Result<NaiveTime> {
    let bad = || Error::Hours(s!(text));
    let t: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ':')
        .collect::<String>()
        .to_ascii_lowercase();

    match t.as_str() {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0).ok_or_else(bad),
        "midnight" => return Ok(NaiveTime::MIN),
        _ => {}
    }

    let (clock, pm) = if let Some(c) = t.strip_suffix("am") {
        (c, false)
    } else if let Some(c) = t.strip_suffix("pm") {
        (c, true)
    } else {
        return Err(bad());
    };

    let (h, m) = match clock.split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock, "0"),
    };
    let h: u32 = h.parse().map_err(|_| bad())?;
    let m: u32 = m.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&h) {
        return Err(bad());
    }
    let h24 = match (h, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(h24, m, 0).ok_or_else(bad)
}

/// Which of the three windows applies on a given weekday.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayCategory {
    Weekday = 0,
    Saturday = 1,
    Sunday = 2,
}

impl DayCategory {
    pub fn of(day: Weekday) -> Self {
        match day {
            Weekday::Sat => DayCategory::Saturday,
            Weekday::Sun => DayCategory::Sunday,
            _ => DayCategory::Weekday,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeekSchedule {
    pub windows: [Window; 3],
}

/// Outcome of checking one schedule against "now".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenState {
    pub open: bool,
    pub open_at: DateTime<FixedOffset>,
    pub close_at: DateTime<FixedOffset>,
}

impl WeekSchedule {
    pub fn new(weekday: Window, saturday: Window, sunday: Window) -> Self {
        Self { windows: [weekday, saturday, sunday] }
    }

    pub fn window_for(&self, day: Weekday) -> Window {
        self.windows[DayCategory::of(day).index()]
    }

    /// Open iff `now` lies strictly inside today's window in `now`'s timezone.
    pub fn evaluate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<OpenState> {
        let window = self.window_for(now.weekday());
        let (open_at, close_at) = window.on(now.date_naive(), &now.timezone())?;
        let now = now.fixed_offset();
        Ok(OpenState { open: open_at < now && now < close_at, open_at, close_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Edmonton;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<chrono_tz::Tz> {
        Edmonton.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    fn usual() -> WeekSchedule {
        WeekSchedule::new(
            Window::parse("6:00am - 10:00pm").unwrap(),
            Window::parse("7:00am - 8:00pm").unwrap(),
            Window::CLOSED,
        )
    }

    #[test]
    fn parses_clock_variants() {
        assert_eq!(parse_clock("6:00am").unwrap(), hm(6, 0));
        assert_eq!(parse_clock("10:00pm").unwrap(), hm(22, 0));
        assert_eq!(parse_clock(" 9:30 P.M. ").unwrap(), hm(21, 30));
        assert_eq!(parse_clock("10pm").unwrap(), hm(22, 0));
        assert_eq!(parse_clock("12:00am").unwrap(), hm(0, 0));
        assert_eq!(parse_clock("12:15pm").unwrap(), hm(12, 15));
        assert_eq!(parse_clock("Noon").unwrap(), hm(12, 0));
    }

    #[test]
    fn rejects_bad_clock() {
        for bad in ["6:00", "13:00pm", "0:30am", "6:75am", "closed", ""] {
            assert!(parse_clock(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn parses_ranges_with_any_dash() {
        let w = Window::parse("5:30am – 9:00pm").unwrap();
        assert_eq!(w, Window { open: hm(5, 30), close: hm(21, 0) });
        assert!(Window::parse("5:30am").is_err());
        assert!(Window::parse("5:30am - 9:00pm - 10:00pm").is_err());
    }

    #[test]
    fn day_categories() {
        assert_eq!(DayCategory::of(Weekday::Mon).index(), 0);
        assert_eq!(DayCategory::of(Weekday::Fri).index(), 0);
        assert_eq!(DayCategory::of(Weekday::Sat).index(), 1);
        assert_eq!(DayCategory::of(Weekday::Sun).index(), 2);
    }

    #[test]
    fn open_mid_afternoon_on_a_weekday() {
        // Wednesday, 3:00pm
        let state = usual().evaluate(&local(2024, 6, 12, 15, 0)).unwrap();
        assert!(state.open);
        assert_eq!(state.open_at.to_rfc3339(), "2024-06-12T06:00:00-06:00");
        assert_eq!(state.close_at.to_rfc3339(), "2024-06-12T22:00:00-06:00");
    }

    #[test]
    fn boundaries_are_exclusive() {
        let s = usual();
        assert!(!s.evaluate(&local(2024, 6, 12, 6, 0)).unwrap().open);
        assert!(s.evaluate(&local(2024, 6, 12, 6, 1)).unwrap().open);
        assert!(!s.evaluate(&local(2024, 6, 12, 22, 0)).unwrap().open);
    }

    #[test]
    fn saturday_uses_its_own_window() {
        let s = usual();
        // Saturday 9:00pm: weekday hours would say open
        assert!(!s.evaluate(&local(2024, 6, 15, 21, 0)).unwrap().open);
        assert!(s.evaluate(&local(2024, 6, 15, 19, 59)).unwrap().open);
    }

    #[test]
    fn closed_sunday_never_opens() {
        let state = usual().evaluate(&local(2024, 6, 16, 12, 0)).unwrap();
        assert!(!state.open);
        assert_eq!(state.open_at, state.close_at);
        assert_eq!(state.open_at.to_rfc3339(), "2024-06-16T00:00:00-06:00");
    }

    #[test]
    fn evaluates_in_the_clock_of_now() {
        // 21:00 UTC on a weekday is 3:00pm in Edmonton (MDT)
        let utc = chrono::Utc.with_ymd_and_hms(2024, 6, 12, 21, 0, 0).unwrap();
        assert!(usual().evaluate(&utc.with_timezone(&Edmonton)).unwrap().open);
    }

    #[test]
    fn dst_change_day_uses_local_offsets() {
        // 2024-03-10 springs forward at 2am; 6am is already MDT
        let state = usual().evaluate(&local(2024, 3, 10, 12, 0)).unwrap();
        assert_eq!(state.open_at.to_rfc3339(), "2024-03-10T00:00:00-07:00");
        let mon = usual().evaluate(&local(2024, 3, 11, 12, 0)).unwrap();
        assert_eq!(mon.open_at.to_rfc3339(), "2024-03-11T06:00:00-06:00");
    }

    #[test]
    fn boundary_in_spring_forward_gap_is_an_error() {
        // 2:00am to 3:00am does not exist in Edmonton on 2024-03-10
        let w = Window { open: hm(2, 30), close: hm(22, 0) };
        let day = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        match w.on(day, &Edmonton) {
            Err(Error::LocalTime(t)) => assert_eq!(t, day.and_time(hm(2, 30))),
            other => panic!("expected a local time error, got {other:?}"),
        }

        let night_owl = WeekSchedule::new(w, w, w);
        assert!(matches!(night_owl.evaluate(&local(2024, 3, 10, 12, 0)), Err(Error::LocalTime(_))));
        // Same window the day after is fine
        assert!(night_owl.evaluate(&local(2024, 3, 11, 12, 0)).is_ok());
    }

    #[test]
    fn ambiguous_fall_back_boundary_takes_earlier_instant() {
        // 1:30am happens twice on 2024-11-03; the MDT one comes first
        let w = Window { open: hm(1, 30), close: hm(22, 0) };
        let day = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let (open, _) = w.on(day, &Edmonton).unwrap();
        assert_eq!(open.to_rfc3339(), "2024-11-03T01:30:00-06:00");
    }
}
