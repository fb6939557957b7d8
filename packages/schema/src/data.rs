//! # Wedding Data
//!
//! User-entered facts bound into block templates. [`WeddingData`] is the single
//! canonical shape consumed downstream. [`StoredWeddingData`] is what older
//! documents persist: it may carry flat `groom`/`bride` fields next to (or
//! instead of) `couple`. [`StoredWeddingData::normalize`] folds the two together
//! once, with `couple` taking precedence field by field.

use crate::compose::Compose;
use crate::lenient::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeddingData {
    #[serde(deserialize_with = "lenient")]
    pub couple: Couple,
    #[serde(deserialize_with = "lenient")]
    pub wedding: WeddingInfo,
    #[serde(deserialize_with = "lenient")]
    pub venue: Venue,
    #[serde(deserialize_with = "lenient")]
    pub greeting: Greeting,
    #[serde(deserialize_with = "lenient")]
    pub photos: Photos,
    #[serde(deserialize_with = "lenient")]
    pub accounts: Accounts,
    #[serde(deserialize_with = "lenient")]
    pub rsvp: RsvpInfo,
    #[serde(deserialize_with = "lenient")]
    pub notice: NoticeInfo,
    #[serde(deserialize_with = "lenient")]
    pub interview: InterviewInfo,
    #[serde(deserialize_with = "lenient")]
    pub timeline: TimelineInfo,
    #[serde(deserialize_with = "lenient")]
    pub bgm: Bgm,
    #[serde(deserialize_with = "lenient")]
    pub video: VideoInfo,
    #[serde(deserialize_with = "lenient")]
    pub ending: EndingInfo,
    #[serde(deserialize_with = "lenient")]
    pub wreath: WreathInfo,
    /// Free-form values addressable as `custom.<key>`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Couple {
    #[serde(deserialize_with = "lenient")]
    pub groom: PersonInfo,
    #[serde(deserialize_with = "lenient")]
    pub bride: PersonInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub father: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mother: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub father_phone: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mother_phone: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
}

crate::impl_compose_fields!(PersonInfo {
    name,
    name_en,
    phone,
    father,
    mother,
    father_phone,
    mother_phone,
    photo,
    intro,
});

impl PersonInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// `"father · mother"` with whichever parents are known
    pub fn parents_line(&self) -> Option<String> {
        let parents: Vec<&str> = [self.father.as_deref(), self.mother.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parents.is_empty() {
            None
        } else {
            Some(parents.join(" · "))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeddingInfo {
    /// `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// `HH:MM`, 24h
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Venue {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub naver_map_url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub kakao_map_url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub transport: Vec<TransportInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportInfo {
    #[serde(deserialize_with = "lenient")]
    pub kind: String,
    #[serde(deserialize_with = "lenient")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Greeting {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Photo URLs already uploaded to the asset store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Photos {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accounts {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub groom: Vec<Account>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub bride: Vec<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    #[serde(deserialize_with = "lenient")]
    pub bank: String,
    #[serde(deserialize_with = "lenient")]
    pub number: String,
    #[serde(deserialize_with = "lenient")]
    pub holder: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RsvpInfo {
    #[serde(deserialize_with = "lenient")]
    pub enabled: bool,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NoticeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeItem {
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient")]
    pub content: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<InterviewItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewItem {
    #[serde(deserialize_with = "lenient")]
    pub question: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub groom_answer: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bride_answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TimelineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineItem {
    #[serde(deserialize_with = "lenient")]
    pub date: String,
    #[serde(deserialize_with = "lenient")]
    pub title: String,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bgm {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub autoplay: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndingInfo {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WreathInfo {
    #[serde(deserialize_with = "lenient")]
    pub enabled: bool,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Vec::is_empty")]
    pub senders: Vec<String>,
}

/// Persisted wedding data, possibly in the legacy flat shape
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredWeddingData {
    #[serde(flatten)]
    pub data: WeddingData,

    /// Legacy `data.groom`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub groom: Option<PersonInfo>,

    /// Legacy `data.bride`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub bride: Option<PersonInfo>,
}

impl StoredWeddingData {
    /// Parse a stored value. Malformed fields fall back one by one; a value
    /// that is not an object at all yields empty data.
    pub fn from_value(value: Value) -> Self {
        if value.is_null() {
            return Self::default();
        }

        match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "Malformed wedding data, using empty data");
                Self::default()
            }
        }
    }

    /// Fold legacy fields into the canonical shape; `couple.*` wins per field
    pub fn normalize(self) -> WeddingData {
        let mut data = self.data;

        if let Some(legacy) = self.groom {
            data.couple.groom = legacy.compose(&data.couple.groom);
        }
        if let Some(legacy) = self.bride {
            data.couple.bride = legacy.compose(&data.couple.bride);
        }

        data
    }
}

/// Normalize a stored data value of either shape into [`WeddingData`]
pub fn normalize_data(value: Value) -> WeddingData {
    StoredWeddingData::from_value(value).normalize()
}
