//! # Data Binding
//!
//! Resolves dotted data paths against [`WeddingData`] and substitutes `{path}`
//! placeholders in block templates.
//!
//! A [`BindingContext`] is built once per render pass. It holds a JSON view of
//! the data plus the computed date fields (`wedding.dateDisplay`,
//! `wedding.dday`, `countdown.days`, ...), which depend on the injected
//! render instant rather than the wall clock.
//!
//! Missing values resolve to `None`, and interpolate as the empty string.

use crate::countdown::{wedding_datetime, Countdown};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Timelike};
use letter_schema::{Account, WeddingData};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Read-only binding view shared by every block in one render pass
#[derive(Debug, Clone)]
pub struct BindingContext<'a> {
    data: &'a WeddingData,
    tree: Value,
    computed: BTreeMap<String, String>,
    wedding_at: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
}

impl<'a> BindingContext<'a> {
    pub fn new(data: &'a WeddingData, now: DateTime<FixedOffset>) -> Self {
        let tree = match serde_json::to_value(data) {
            Ok(tree) => tree,
            Err(err) => {
                warn!(error = %err, "Failed to serialize wedding data for binding");
                Value::Null
            }
        };

        let wedding_at = wedding_datetime(&data.wedding, now.offset());
        let computed = computed_fields(data, wedding_at, now);

        Self {
            data,
            tree,
            computed,
            wedding_at,
            now,
        }
    }

    pub fn data(&self) -> &WeddingData {
        self.data
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    /// The wedding moment, when the date parses
    pub fn wedding_at(&self) -> Option<DateTime<FixedOffset>> {
        self.wedding_at
    }

    /// Resolve a dotted path; empty strings count as missing
    pub fn resolve(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if let Some(value) = self.computed.get(path) {
            return Some(value.clone());
        }

        // Legacy `groom.*` / `bride.*` read through `couple.*`
        let canonical;
        let path = if path.starts_with("groom.") || path.starts_with("bride.") {
            canonical = format!("couple.{}", path);
            canonical.as_str()
        } else {
            path
        };

        resolve_path(&self.tree, path)
    }

    /// Resolve a path, or the empty string
    pub fn get(&self, path: &str) -> String {
        self.resolve(path).unwrap_or_default()
    }

    /// Replace `{path}` tokens in a template
    pub fn interpolate(&self, template: &str) -> String {
        interpolate_with(template, |path| self.resolve(path))
    }
}

/// Walk a JSON tree by dotted path; numeric segments index arrays
pub fn resolve_path(tree: &Value, path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }

    let mut current = tree;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    match current {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Replace `{path}` tokens using `lookup`
///
/// Missing values become empty, runs of spaces left behind collapse to one,
/// and an unterminated `{` is kept literally.
pub fn interpolate_with(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut substituted_empty = false;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let path = &after[..end];
                match lookup(path) {
                    Some(value) => out.push_str(&value),
                    None => substituted_empty = true,
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    if substituted_empty {
        collapse_spaces(&out)
    } else {
        out
    }
}

fn collapse_spaces(text: &str) -> String {
    text.lines()
        .map(|line| line.split(' ').filter(|w| !w.is_empty()).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// `bank number (holder)`, skipping empty parts
pub fn format_account(account: &Account) -> String {
    let mut parts: Vec<String> = [account.bank.trim(), account.number.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if !account.holder.trim().is_empty() {
        parts.push(format!("({})", account.holder.trim()));
    }

    parts.join(" ")
}

/// `오후 2시`, `오전 11시 30분`
pub fn format_time(time: &NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour < 12 { "오전" } else { "오후" };
    let display_hour = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    if time.minute() == 0 {
        format!("{} {}시", period, display_hour)
    } else {
        format!("{} {}시 {}분", period, display_hour, time.minute())
    }
}

pub fn weekday_ko(date: &NaiveDate) -> &'static str {
    WEEKDAYS[date.weekday().num_days_from_sunday() as usize]
}

/// `5월 24일 토요일`, with the time appended when known
pub fn format_date_display(date: &NaiveDate, time: Option<&NaiveTime>) -> String {
    let base = format!("{}월 {}일 {}요일", date.month(), date.day(), weekday_ko(date));
    match time {
        Some(time) => format!("{} {}", base, format_time(time)),
        None => base,
    }
}

/// `D-Day`, `D-3`, `D+10` by calendar day
pub fn format_dday(date: &NaiveDate, today: &NaiveDate) -> String {
    let diff = (*date - *today).num_days();
    match diff {
        0 => "D-Day".to_string(),
        d if d > 0 => format!("D-{}", d),
        d => format!("D+{}", d.abs()),
    }
}

fn computed_fields(
    data: &WeddingData,
    wedding_at: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    if let (Some(groom), Some(bride)) = (&data.couple.groom.name, &data.couple.bride.name) {
        fields.insert("couple.names".to_string(), format!("{} ♥ {}", groom, bride));
    }

    let time = data
        .wedding
        .time
        .as_deref()
        .and_then(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M").ok());
    if let Some(time) = &time {
        fields.insert("wedding.timeDisplay".to_string(), format_time(time));
    }

    let Some(date_str) = data.wedding.date.as_deref() else {
        return fields;
    };
    let Ok(date) = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") else {
        warn!(date = date_str, "Unparseable wedding date, computed fields skipped");
        return fields;
    };

    fields.insert(
        "wedding.dateDisplay".to_string(),
        format_date_display(&date, time.as_ref()),
    );
    fields.insert(
        "wedding.dateDot".to_string(),
        format!("{}.{:02}.{:02}", date.year(), date.month(), date.day()),
    );
    fields.insert(
        "wedding.dateMonthDay".to_string(),
        format!("{:02}.{:02}", date.month(), date.day()),
    );
    fields.insert("wedding.year".to_string(), date.year().to_string());
    fields.insert("wedding.month".to_string(), format!("{:02}", date.month()));
    fields.insert("wedding.day".to_string(), format!("{:02}", date.day()));
    fields.insert("wedding.weekday".to_string(), weekday_ko(&date).to_string());
    // Older templates
    fields.insert("wedding.dayOfWeek".to_string(), weekday_ko(&date).to_string());
    fields.insert(
        "wedding.dday".to_string(),
        format_dday(&date, &now.date_naive()),
    );

    for (suffix, offset) in [("Minus2", -2i64), ("Minus1", -1), ("Plus1", 1), ("Plus2", 2)] {
        let shifted = date + Duration::days(offset);
        fields.insert(
            format!("wedding.weekday{}", suffix),
            weekday_ko(&shifted).to_string(),
        );
        fields.insert(format!("wedding.day{}", suffix), shifted.day().to_string());
    }

    if let Some(target) = wedding_at {
        let countdown = Countdown::between(target, now);
        fields.insert("countdown.days".to_string(), countdown.days.to_string());
        fields.insert("countdown.hours".to_string(), countdown.hours.to_string());
        fields.insert("countdown.minutes".to_string(), countdown.minutes.to_string());
        fields.insert("countdown.seconds".to_string(), countdown.seconds.to_string());
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_schema::PersonInfo;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-05-21T14:00:00+09:00").unwrap()
    }

    fn sample() -> WeddingData {
        let mut data = WeddingData::default();
        data.couple.groom = PersonInfo::named("민수");
        data.couple.bride = PersonInfo::named("수진");
        data.wedding.date = Some("2025-05-24".into());
        data.wedding.time = Some("14:30".into());
        data.venue.name = Some("더채플앳청담".into());
        data.photos.gallery = vec!["a.jpg".into(), "b.jpg".into()];
        data
    }

    #[test]
    fn test_resolve_paths() {
        let data = sample();
        let ctx = BindingContext::new(&data, now());

        assert_eq!(ctx.resolve("couple.groom.name").as_deref(), Some("민수"));
        assert_eq!(ctx.resolve("groom.name").as_deref(), Some("민수"));
        assert_eq!(ctx.resolve("photos.gallery.1").as_deref(), Some("b.jpg"));
        assert_eq!(ctx.resolve("venue.hall"), None);
        assert_eq!(ctx.resolve("photos.gallery.9"), None);
        assert_eq!(ctx.resolve("couple"), None);
    }

    #[test]
    fn test_computed_date_fields() {
        let data = sample();
        let ctx = BindingContext::new(&data, now());

        assert_eq!(ctx.get("wedding.dateDisplay"), "5월 24일 토요일 오후 2시 30분");
        assert_eq!(ctx.get("wedding.dateDot"), "2025.05.24");
        assert_eq!(ctx.get("wedding.month"), "05");
        assert_eq!(ctx.get("wedding.weekday"), "토");
        assert_eq!(ctx.get("wedding.dayOfWeek"), "토");
        assert_eq!(ctx.get("wedding.weekdayPlus1"), "일");
        assert_eq!(ctx.get("wedding.dday"), "D-3");
        assert_eq!(ctx.get("countdown.days"), "3");
        assert_eq!(ctx.get("couple.names"), "민수 ♥ 수진");
    }

    #[test]
    fn test_dday_variants() {
        let day = NaiveDate::from_ymd_opt(2025, 5, 24).unwrap();
        assert_eq!(format_dday(&day, &day), "D-Day");
        assert_eq!(
            format_dday(&day, &NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()),
            "D+10"
        );
    }

    #[test]
    fn test_format_time() {
        let t = |s| NaiveTime::parse_from_str(s, "%H:%M").unwrap();
        assert_eq!(format_time(&t("14:00")), "오후 2시");
        assert_eq!(format_time(&t("11:30")), "오전 11시 30분");
        assert_eq!(format_time(&t("00:00")), "오전 12시");
        assert_eq!(format_time(&t("12:00")), "오후 12시");
    }

    #[test]
    fn test_interpolate_missing_values_are_empty() {
        let data = sample();
        let ctx = BindingContext::new(&data, now());

        assert_eq!(
            ctx.interpolate("{couple.groom.name} 그리고 {couple.bride.name}"),
            "민수 그리고 수진"
        );
        assert_eq!(ctx.interpolate("{venue.name} {venue.hall}"), "더채플앳청담");
        assert_eq!(ctx.interpolate("no {placeholder"), "no {placeholder");
        assert!(!ctx.interpolate("{venue.hall}").contains('{'));
    }

    #[test]
    fn test_format_account() {
        let account = Account {
            bank: "국민은행".into(),
            number: "123-45-6789".into(),
            holder: "김민수".into(),
            relation: None,
        };
        assert_eq!(format_account(&account), "국민은행 123-45-6789 (김민수)");

        let partial = Account {
            bank: "".into(),
            number: "123".into(),
            holder: "".into(),
            relation: None,
        };
        assert_eq!(format_account(&partial), "123");
    }

    #[test]
    fn test_unparseable_date_skips_computed_fields() {
        let mut data = sample();
        data.wedding.date = Some("next spring".into());
        let ctx = BindingContext::new(&data, now());

        assert_eq!(ctx.resolve("wedding.dday"), None);
        assert_eq!(ctx.resolve("wedding.date").as_deref(), Some("next spring"));
    }
}
