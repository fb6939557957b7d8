//! Calendar block: month view, mini strip, countdown and timeline.
//!
//! Countdown styles are separate strategies over the same [`Countdown`]. Once
//! the wedding moment is reached every style shows the end message instead of
//! a count.

use super::{image, modifier_class, variant_name, BlockContext};
use crate::countdown::Countdown;
use crate::vdom::VNode;
use chrono::{Datelike, NaiveDate};
use letter_schema::{
    CalendarDisplay, CalendarSettings, CountdownStyle, CountdownUnits, TimelineLayout,
};

const DEFAULT_END_MESSAGE: &str = "결혼한 지 {n}일 됐어요";
const WEEKDAY_HEADERS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];
/// Circumference of the analog ring (r = 45)
const RING_LENGTH: f64 = 283.0;

pub(super) fn calendar(ctx: &BlockContext, s: &CalendarSettings) -> VNode {
    match s.display() {
        CalendarDisplay::Full => month(ctx),
        CalendarDisplay::Mini => mini(ctx),
        CalendarDisplay::Countdown {
            style,
            units,
            end_message,
        } => countdown(ctx, style, units, end_message.as_deref()),
        CalendarDisplay::Timeline(layout) => timeline(ctx, layout),
    }
}

fn wedding_date(ctx: &BlockContext) -> Option<NaiveDate> {
    ctx.binding.wedding_at().map(|dt| dt.date_naive())
}

fn missing_date() -> VNode {
    VNode::text_element("p", "se2-calendar__empty", "예식 날짜를 입력해 주세요")
}

fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(30)
}

fn month(ctx: &BlockContext) -> VNode {
    let body = VNode::with_tag_class("div", "se2-calendar se2-calendar--full");
    let Some(date) = wedding_date(ctx) else {
        return body.with_child(missing_date());
    };
    let body = body.with_optional_child(ctx.heading("{wedding.year}.{wedding.month}"));

    let mut grid = VNode::with_tag_class("div", "se2-calendar__grid")
        .with_style("display", "grid")
        .with_style("grid-template-columns", "repeat(7, 1fr)")
        .with_children(
            WEEKDAY_HEADERS
                .iter()
                .map(|d| VNode::text_element("span", "se2-calendar__weekday", *d))
                .collect(),
        );

    let Some(first) = date.with_day(1) else {
        return body.with_child(missing_date());
    };
    let offset = first.weekday().num_days_from_sunday();
    for i in 0..offset {
        grid = grid.with_child(
            VNode::with_tag_class("span", "se2-calendar__day se2-calendar__day--blank")
                .with_key(format!("blank-{}", i)),
        );
    }

    for day in 1..=days_in_month(date) {
        let mut cell = VNode::text_element("span", "se2-calendar__day", day.to_string())
            .with_key(day.to_string());
        if day == date.day() {
            cell = cell
                .with_class("se2-calendar__day--wedding")
                .with_style("background", "var(--accent-default)")
                .with_style("color", "var(--fg-on-accent)");
        }
        grid = grid.with_child(cell);
    }

    body.with_child(grid).with_child(VNode::text_element(
        "p",
        "se2-calendar__caption",
        ctx.binding.get("wedding.dateDisplay"),
    ))
}

fn mini(ctx: &BlockContext) -> VNode {
    let body = VNode::with_tag_class("div", "se2-calendar se2-calendar--mini");
    if wedding_date(ctx).is_none() {
        return body.with_child(missing_date());
    }

    let strip = [
        ("Minus2", false),
        ("Minus1", false),
        ("", true),
        ("Plus1", false),
        ("Plus2", false),
    ]
    .into_iter()
    .map(|(suffix, is_wedding)| {
        let mut cell = VNode::with_tag_class("div", "se2-calendar__strip-day")
            .with_child(VNode::text_element(
                "span",
                "se2-calendar__weekday",
                ctx.binding.get(&format!("wedding.weekday{}", suffix)),
            ))
            .with_child(VNode::text_element(
                "span",
                "se2-calendar__day",
                if is_wedding {
                    ctx.binding.get("wedding.day").trim_start_matches('0').to_string()
                } else {
                    ctx.binding.get(&format!("wedding.day{}", suffix))
                },
            ));
        if is_wedding {
            cell = cell.with_class("se2-calendar__strip-day--wedding");
        }
        cell
    })
    .collect();

    body.with_child(VNode::with_tag_class("div", "se2-calendar__strip").with_children(strip))
        .with_child(VNode::text_element(
            "p",
            "se2-calendar__caption",
            ctx.binding.get("wedding.dateDisplay"),
        ))
}

fn countdown(
    ctx: &BlockContext,
    style: CountdownStyle,
    units: CountdownUnits,
    end_message: Option<&str>,
) -> VNode {
    let body = VNode::with_tag_class("div", "se2-calendar se2-calendar--countdown");
    let Some(target) = ctx.binding.wedding_at() else {
        return body
            .with_optional_child(ctx.heading("D-Day"))
            .with_child(missing_date());
    };

    let remaining = Countdown::between(target, ctx.binding.now());
    let body = body
        .with_class(modifier_class("se2-countdown", &style))
        .with_attr("data-target", target.to_rfc3339());

    if remaining.is_past {
        let template = end_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_END_MESSAGE)
            .replace("{n}", &remaining.days_since().to_string());
        return body
            .with_optional_child(ctx.heading("함께한 시간"))
            .with_child(VNode::text_element(
                "p",
                "se2-countdown__end",
                ctx.binding.interpolate(&template),
            ));
    }

    let body = body.with_optional_child(ctx.heading("D-Day"));
    let display = match style {
        CountdownStyle::Digital => digital(&remaining, units),
        CountdownStyle::Flip => flip(&remaining, units),
        CountdownStyle::Analog => analog(&remaining),
        CountdownStyle::Text => text(&remaining, units),
    };
    body.with_child(display)
}

fn enabled_units(c: &Countdown, units: CountdownUnits) -> Vec<(&'static str, &'static str, i64)> {
    [
        ("days", "DAYS", c.days, units.days),
        ("hours", "HOURS", c.hours, units.hours),
        ("minutes", "MINS", c.minutes, units.minutes),
        ("seconds", "SECS", c.seconds, units.seconds),
    ]
    .into_iter()
    .filter(|(_, _, _, on)| *on)
    .map(|(unit, label, value, _)| (unit, label, value))
    .collect()
}

fn digital(c: &Countdown, units: CountdownUnits) -> VNode {
    let mut node = VNode::with_tag_class("div", "se2-countdown__digital");
    for (i, (unit, _, value)) in enabled_units(c, units).into_iter().enumerate() {
        if i > 0 {
            node = node.with_child(VNode::text_element("span", "se2-countdown__sep", ":"));
        }
        let text = if unit == "days" {
            value.to_string()
        } else {
            format!("{:02}", value)
        };
        node = node.with_child(
            VNode::text_element("span", "se2-countdown__segment", text).with_attr("data-unit", unit),
        );
    }
    node
}

fn flip(c: &Countdown, units: CountdownUnits) -> VNode {
    VNode::with_tag_class("div", "se2-countdown__flip").with_children(
        enabled_units(c, units)
            .into_iter()
            .map(|(unit, label, value)| {
                VNode::with_tag_class("div", "se2-countdown__card")
                    .with_key(unit)
                    .with_attr("data-unit", unit)
                    .with_child(VNode::text_element(
                        "span",
                        "se2-countdown__value",
                        format!("{:02}", value),
                    ))
                    .with_child(VNode::text_element("span", "se2-countdown__label", label))
            })
            .collect(),
    )
}

fn analog(c: &Countdown) -> VNode {
    let progress = ((1.0 - c.days as f64 / 100.0) * RING_LENGTH).clamp(0.0, RING_LENGTH);

    let ring = |class: &str, color: &str| {
        VNode::with_tag_class("circle", class)
            .with_attr("cx", "50")
            .with_attr("cy", "50")
            .with_attr("r", "45")
            .with_attr("fill", "none")
            .with_attr("stroke", color)
            .with_attr("stroke-width", "4")
    };

    VNode::with_tag_class("div", "se2-countdown__analog").with_child(
        VNode::with_tag_class("svg", "se2-countdown__ring")
            .with_attr("viewBox", "0 0 100 100")
            .with_child(ring("se2-countdown__track", "var(--border-muted)"))
            .with_child(
                ring("se2-countdown__progress", "var(--accent-default)")
                    .with_attr("stroke-dasharray", format!("{} {}", progress, RING_LENGTH))
                    .with_attr("transform", "rotate(-90 50 50)"),
            )
            .with_child(
                VNode::text_element("text", "se2-countdown__days", c.days.to_string())
                    .with_attr("x", "50")
                    .with_attr("y", "55")
                    .with_attr("text-anchor", "middle")
                    .with_attr("data-unit", "days"),
            ),
    )
}

fn text(c: &Countdown, units: CountdownUnits) -> VNode {
    let mut parts = Vec::new();
    if units.days {
        parts.push(format!("{}일", c.days));
    }
    if units.hours {
        parts.push(format!("{}시간", c.hours));
    }
    let line = if parts.is_empty() {
        "결혼식이 다가오고 있어요".to_string()
    } else {
        format!("결혼까지 {} 남았어요", parts.join(" "))
    };
    VNode::text_element("p", "se2-countdown__text", line)
}

fn timeline(ctx: &BlockContext, layout: TimelineLayout) -> VNode {
    let items = &ctx.binding.data().timeline.items;

    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mut entry = VNode::with_tag_class("li", "se2-timeline__item")
                .with_key(i.to_string())
                .with_child(VNode::text_element("span", "se2-timeline__date", item.date.as_str()))
                .with_child(VNode::text_element("h3", "se2-timeline__title", item.title.as_str()))
                .with_optional_child(
                    item.description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .map(|d| VNode::text_element("p", "se2-timeline__description", d)),
                );
            if let Some(src) = item.image.as_deref().filter(|s| !s.is_empty()) {
                entry = entry.with_child(image("se2-timeline__image", src, item.title.as_str()));
            }
            if layout == TimelineLayout::Alternate {
                let side = if i % 2 == 0 { "left" } else { "right" };
                entry = entry.with_class(format!("se2-timeline__item--{}", side));
            }
            entry
        })
        .collect();

    VNode::with_tag_class("div", "se2-calendar se2-calendar--timeline")
        .with_optional_child(ctx.heading("우리의 이야기"))
        .with_child(
            VNode::with_tag_class("ol", modifier_class("se2-timeline", &layout))
                .with_attr("data-layout", variant_name(&layout))
                .with_children(entries),
        )
}
