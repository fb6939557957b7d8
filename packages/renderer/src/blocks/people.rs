//! Blocks about the couple and their families.

use super::{image, link, modifier_class, paragraphs, BlockContext};
use crate::binding::format_account;
use crate::vdom::VNode;
use letter_schema::{
    Account, AccountMode, AccountSettings, ContactSettings, InterviewItem, InterviewMode,
    InterviewSettings, PersonInfo, ProfileMode, ProfileSettings,
};

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(super) fn profile(ctx: &BlockContext, s: &ProfileSettings) -> VNode {
    let couple = &ctx.binding.data().couple;

    VNode::with_tag_class("div", modifier_class("se2-profile", &s.display_mode))
        .with_optional_child(ctx.heading("신랑 & 신부"))
        .with_child(
            VNode::with_tag_class("div", "se2-profile__people")
                .with_child(person_card(&couple.groom, "신랑", "groom", s))
                .with_child(person_card(&couple.bride, "신부", "bride", s)),
        )
}

fn person_card(person: &PersonInfo, role: &str, key: &str, s: &ProfileSettings) -> VNode {
    let mut card = VNode::with_tag_class("div", format!("se2-profile__person se2-profile__person--{}", key))
        .with_key(key);

    if s.display_mode == ProfileMode::Cards {
        if let Some(photo) = non_empty(&person.photo) {
            card = card.with_child(image("se2-profile__photo", photo, role));
        }
    }

    card = card
        .with_child(VNode::text_element("span", "se2-profile__role", role))
        .with_child(VNode::text_element(
            "strong",
            "se2-profile__name",
            non_empty(&person.name).unwrap_or_default(),
        ))
        .with_optional_child(
            non_empty(&person.name_en).map(|n| VNode::text_element("span", "se2-profile__name-en", n)),
        );

    if s.show_parents {
        card = card.with_optional_child(
            person
                .parents_line()
                .map(|p| VNode::text_element("p", "se2-profile__parents", p)),
        );
    }

    if s.display_mode == ProfileMode::Cards {
        card = card.with_optional_child(
            non_empty(&person.intro).map(|i| paragraphs("se2-profile__intro", i)),
        );
    }

    card
}

/// One phone entry; `None` without a number
fn contact_entry(label: &str, name: Option<&str>, phone: Option<&str>) -> Option<VNode> {
    let phone = phone?;
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();

    Some(
        VNode::with_tag_class("div", "se2-contact__entry")
            .with_key(format!("{}-{}", label, digits))
            .with_child(VNode::text_element("span", "se2-contact__label", label))
            .with_optional_child(name.map(|n| VNode::text_element("strong", "se2-contact__name", n)))
            .with_child(
                VNode::with_tag_class("div", "se2-contact__actions")
                    .with_optional_child(link("se2-contact__call", &format!("tel:{}", digits), "전화"))
                    .with_optional_child(link("se2-contact__sms", &format!("sms:{}", digits), "문자")),
            ),
    )
}

pub(super) fn contact(ctx: &BlockContext, s: &ContactSettings) -> VNode {
    let couple = &ctx.binding.data().couple;
    let (groom, bride) = (&couple.groom, &couple.bride);

    let mut entries = vec![
        contact_entry("신랑", non_empty(&groom.name), non_empty(&groom.phone)),
        contact_entry("신부", non_empty(&bride.name), non_empty(&bride.phone)),
    ];

    if s.show_parents {
        entries.extend([
            contact_entry("신랑 아버지", non_empty(&groom.father), non_empty(&groom.father_phone)),
            contact_entry("신랑 어머니", non_empty(&groom.mother), non_empty(&groom.mother_phone)),
            contact_entry("신부 아버지", non_empty(&bride.father), non_empty(&bride.father_phone)),
            contact_entry("신부 어머니", non_empty(&bride.mother), non_empty(&bride.mother_phone)),
        ]);
    }

    VNode::with_tag_class("div", modifier_class("se2-contact", &s.display_mode))
        .with_optional_child(ctx.heading("연락하기"))
        .with_child(
            VNode::with_tag_class("div", "se2-contact__list")
                .with_children(entries.into_iter().flatten().collect()),
        )
}

fn account_rows(accounts: &[Account], s: &AccountSettings) -> Vec<VNode> {
    accounts
        .iter()
        .enumerate()
        .map(|(i, account)| {
            let mut row = VNode::with_tag_class("div", "se2-account__row")
                .with_key(i.to_string())
                .with_optional_child(
                    non_empty(&account.relation)
                        .map(|r| VNode::text_element("span", "se2-account__relation", r)),
                )
                .with_child(VNode::text_element("span", "se2-account__number", format_account(account)));

            if s.show_copy_button && !account.number.trim().is_empty() {
                row = row.with_child(
                    VNode::text_element("button", "se2-account__copy", "복사")
                        .with_attr("type", "button")
                        .with_attr("data-copy", account.number.trim()),
                );
            }
            row
        })
        .collect()
}

fn account_group(side: &str, label: &str, accounts: &[Account], s: &AccountSettings) -> VNode {
    let rows = account_rows(accounts, s);
    let class = format!("se2-account__group se2-account__group--{}", side);

    match s.display_mode {
        AccountMode::Accordion => VNode::with_tag_class("details", class)
            .with_child(VNode::text_element("summary", "se2-account__summary", label))
            .with_children(rows),
        AccountMode::Tabs => VNode::with_tag_class("div", class)
            .with_attr("role", "tabpanel")
            .with_attr("aria-label", label)
            .with_children(rows),
        AccountMode::SideBySide | AccountMode::Stacked => VNode::with_tag_class("div", class)
            .with_child(VNode::text_element("h3", "se2-account__side", label))
            .with_children(rows),
    }
}

pub(super) fn account(ctx: &BlockContext, s: &AccountSettings) -> VNode {
    let accounts = &ctx.binding.data().accounts;
    let mut body = VNode::with_tag_class("div", modifier_class("se2-account", &s.display_mode))
        .with_optional_child(ctx.heading("마음 전하실 곳"))
        .with_optional_child(
            ctx.optional_text("message")
                .map(|m| paragraphs("se2-account__message", &m)),
        );

    if s.display_mode == AccountMode::Tabs {
        body = body.with_child(
            VNode::with_tag_class("div", "se2-account__tabs")
                .with_attr("role", "tablist")
                .with_child(VNode::text_element("span", "se2-account__tab", "신랑측").with_attr("role", "tab"))
                .with_child(VNode::text_element("span", "se2-account__tab", "신부측").with_attr("role", "tab")),
        );
    }

    let mut groups = VNode::with_tag_class("div", "se2-account__groups");
    if s.display_mode == AccountMode::SideBySide {
        groups = groups
            .with_style("display", "grid")
            .with_style("grid-template-columns", "1fr 1fr");
    }

    body.with_child(
        groups
            .with_child(account_group("groom", "신랑측", &accounts.groom, s))
            .with_child(account_group("bride", "신부측", &accounts.bride, s)),
    )
}

fn answers(item: &InterviewItem) -> Vec<(&'static str, &str)> {
    [("신랑", &item.groom_answer), ("신부", &item.bride_answer)]
        .into_iter()
        .filter_map(|(who, answer)| non_empty(answer).map(|a| (who, a)))
        .collect()
}

fn interview_item(mode: InterviewMode, index: usize, item: &InterviewItem) -> VNode {
    let key = index.to_string();
    match mode {
        InterviewMode::Card => VNode::with_tag_class("article", "se2-interview__card")
            .with_key(key)
            .with_child(VNode::text_element("h3", "se2-interview__question", item.question.as_str()))
            .with_children(
                answers(item)
                    .into_iter()
                    .map(|(who, a)| {
                        VNode::with_tag_class("p", "se2-interview__answer")
                            .with_child(VNode::text_element("strong", "se2-interview__who", who))
                            .with_child(VNode::text(a))
                    })
                    .collect(),
            ),
        InterviewMode::Chat => VNode::with_tag_class("div", "se2-interview__thread")
            .with_key(key)
            .with_child(VNode::text_element(
                "div",
                "se2-interview__bubble se2-interview__bubble--question",
                item.question.as_str(),
            ))
            .with_children(
                answers(item)
                    .into_iter()
                    .map(|(who, a)| {
                        let side = if who == "신랑" { "left" } else { "right" };
                        VNode::text_element(
                            "div",
                            format!("se2-interview__bubble se2-interview__bubble--{}", side),
                            a,
                        )
                        .with_attr("data-speaker", who)
                    })
                    .collect(),
            ),
        InterviewMode::Timeline => VNode::with_tag_class("li", "se2-interview__step")
            .with_key(key)
            .with_child(VNode::text_element("span", "se2-interview__marker", format!("Q{}", index + 1)))
            .with_child(VNode::text_element("h3", "se2-interview__question", item.question.as_str()))
            .with_children(
                answers(item)
                    .into_iter()
                    .map(|(who, a)| VNode::text_element("p", "se2-interview__answer", format!("{}: {}", who, a)))
                    .collect(),
            ),
        InterviewMode::Accordion => VNode::with_tag_class("details", "se2-interview__item")
            .with_key(key)
            .with_child(VNode::text_element("summary", "se2-interview__question", item.question.as_str()))
            .with_children(
                answers(item)
                    .into_iter()
                    .map(|(who, a)| VNode::text_element("p", "se2-interview__answer", format!("{}: {}", who, a)))
                    .collect(),
            ),
    }
}

pub(super) fn interview(ctx: &BlockContext, s: &InterviewSettings) -> VNode {
    let items = &ctx.binding.data().interview.items;
    let container = if s.display_mode == InterviewMode::Timeline { "ol" } else { "div" };

    VNode::with_tag_class("div", modifier_class("se2-interview", &s.display_mode))
        .with_optional_child(ctx.heading("웨딩 인터뷰"))
        .with_child(
            VNode::with_tag_class(container, "se2-interview__items").with_children(
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| !item.question.trim().is_empty())
                    .map(|(i, item)| interview_item(s.display_mode, i, item))
                    .collect(),
            ),
        )
}
