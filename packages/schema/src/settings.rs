//! # Typed Block Settings
//!
//! [`BlockSpec`] is the tagged union over `(block type, display mode)` that the
//! renderer dispatches on. It is built from a [`Block`]'s raw settings map;
//! a setting that fails to deserialize falls back to that type's default for
//! the same key.

use crate::block::{Block, BlockType};
use crate::errors::SchemaResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockSpec {
    Hero(HeroSettings),
    Gallery(GallerySettings),
    Profile(ProfileSettings),
    Calendar(CalendarSettings),
    Location(LocationSettings),
    Account(AccountSettings),
    Message(MessageSettings),
    Contact(ContactSettings),
    Interview(InterviewSettings),
    Ending(EndingSettings),
    Wreath(WreathSettings),
    Divider(DividerSettings),
    Music(MusicSettings),
    Video(VideoSettings),
    Notice(NoticeSettings),
    Rsvp(RsvpSettings),
    GreetingParents(GreetingParentsSettings),
}

impl BlockSpec {
    /// Parse a block's type and settings. Fails only on an unknown type.
    pub fn from_block(block: &Block) -> SchemaResult<Self> {
        let spec = match block.kind()? {
            BlockType::Hero => BlockSpec::Hero(settings_or_default(block)),
            BlockType::Gallery => BlockSpec::Gallery(settings_or_default(block)),
            BlockType::Profile => BlockSpec::Profile(settings_or_default(block)),
            BlockType::Calendar => BlockSpec::Calendar(settings_or_default(block)),
            BlockType::Location => BlockSpec::Location(settings_or_default(block)),
            BlockType::Account => BlockSpec::Account(settings_or_default(block)),
            BlockType::Message => BlockSpec::Message(settings_or_default(block)),
            BlockType::Contact => BlockSpec::Contact(settings_or_default(block)),
            BlockType::Interview => BlockSpec::Interview(settings_or_default(block)),
            BlockType::Ending => BlockSpec::Ending(settings_or_default(block)),
            BlockType::Wreath => BlockSpec::Wreath(settings_or_default(block)),
            BlockType::Divider => BlockSpec::Divider(settings_or_default(block)),
            BlockType::Music => BlockSpec::Music(settings_or_default(block)),
            BlockType::Video => BlockSpec::Video(settings_or_default(block)),
            BlockType::Notice => BlockSpec::Notice(settings_or_default(block)),
            BlockType::Rsvp => BlockSpec::Rsvp(settings_or_default(block)),
            BlockType::GreetingParents => {
                BlockSpec::GreetingParents(settings_or_default(block))
            }
        };
        Ok(spec)
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockSpec::Hero(_) => BlockType::Hero,
            BlockSpec::Gallery(_) => BlockType::Gallery,
            BlockSpec::Profile(_) => BlockType::Profile,
            BlockSpec::Calendar(_) => BlockType::Calendar,
            BlockSpec::Location(_) => BlockType::Location,
            BlockSpec::Account(_) => BlockType::Account,
            BlockSpec::Message(_) => BlockType::Message,
            BlockSpec::Contact(_) => BlockType::Contact,
            BlockSpec::Interview(_) => BlockType::Interview,
            BlockSpec::Ending(_) => BlockType::Ending,
            BlockSpec::Wreath(_) => BlockType::Wreath,
            BlockSpec::Divider(_) => BlockType::Divider,
            BlockSpec::Music(_) => BlockType::Music,
            BlockSpec::Video(_) => BlockType::Video,
            BlockSpec::Notice(_) => BlockType::Notice,
            BlockSpec::Rsvp(_) => BlockType::Rsvp,
            BlockSpec::GreetingParents(_) => BlockType::GreetingParents,
        }
    }
}

fn settings_or_default<T: Serialize + DeserializeOwned + Default>(block: &Block) -> T {
    if block.settings.is_empty() {
        return T::default();
    }

    if let Ok(settings) = serde_json::from_value(Value::Object(block.settings.clone())) {
        return settings;
    }

    // Layer stored keys over the defaults one at a time; a key that does not
    // parse keeps its default.
    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, value) in &block.settings {
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_ok() {
            continue;
        }

        warn!(
            block_id = %block.id,
            block_type = %block.block_type,
            setting = %key,
            "Malformed block setting, using default"
        );
        match previous {
            Some(previous) => {
                merged.insert(key.clone(), previous);
            }
            None => {
                merged.remove(key);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Hero
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeroMode {
    #[default]
    Fullscreen,
    Split,
    Overlay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSettings {
    pub display_mode: HeroMode,
    pub show_date: bool,
    pub show_venue: bool,
    /// Darkening over the photo in overlay mode, 0.0 - 1.0
    pub overlay_opacity: f64,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            display_mode: HeroMode::default(),
            show_date: true,
            show_venue: true,
            overlay_opacity: 0.4,
        }
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryMode {
    Carousel,
    #[default]
    Grid,
    Masonry,
    Fullscreen,
    Polaroid,
    FilmStrip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GallerySettings {
    pub display_mode: GalleryMode,
    pub columns: u8,
    pub max_items: Option<usize>,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            display_mode: GalleryMode::default(),
            columns: 3,
            max_items: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileMode {
    #[default]
    Cards,
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileSettings {
    pub display_mode: ProfileMode,
    pub show_parents: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            display_mode: ProfileMode::default(),
            show_parents: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Calendar / countdown / timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarMode {
    #[default]
    Full,
    Mini,
    Countdown,
    Timeline,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountdownStyle {
    #[default]
    Flip,
    Digital,
    Analog,
    Text,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineLayout {
    #[default]
    Vertical,
    Horizontal,
    Alternate,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSettings {
    pub display_mode: CalendarMode,
    /// Countdown presentation, used when `display_mode` is `countdown`
    pub style: CountdownStyle,
    pub show_days: bool,
    pub show_hours: bool,
    pub show_minutes: bool,
    pub show_seconds: bool,
    /// Shown once the wedding moment has passed
    pub end_message: Option<String>,
    /// Timeline presentation, used when `display_mode` is `timeline`
    pub layout: TimelineLayout,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            display_mode: CalendarMode::default(),
            style: CountdownStyle::default(),
            show_days: true,
            show_hours: true,
            show_minutes: true,
            show_seconds: true,
            end_message: None,
            layout: TimelineLayout::default(),
        }
    }
}

/// Which countdown units to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownUnits {
    pub days: bool,
    pub hours: bool,
    pub minutes: bool,
    pub seconds: bool,
}

/// The calendar block's display mode with the data each mode needs
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarDisplay {
    Full,
    Mini,
    Countdown {
        style: CountdownStyle,
        units: CountdownUnits,
        end_message: Option<String>,
    },
    Timeline(TimelineLayout),
}

impl CalendarSettings {
    pub fn display(&self) -> CalendarDisplay {
        match self.display_mode {
            CalendarMode::Full => CalendarDisplay::Full,
            CalendarMode::Mini => CalendarDisplay::Mini,
            CalendarMode::Countdown => CalendarDisplay::Countdown {
                style: self.style,
                units: CountdownUnits {
                    days: self.show_days,
                    hours: self.show_hours,
                    minutes: self.show_minutes,
                    seconds: self.show_seconds,
                },
                end_message: self.end_message.clone(),
            },
            CalendarMode::Timeline => CalendarDisplay::Timeline(self.layout),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationMode {
    #[default]
    Map,
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationSettings {
    pub display_mode: LocationMode,
    pub show_transport: bool,
    pub show_map_links: bool,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            display_mode: LocationMode::default(),
            show_transport: true,
            show_map_links: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountMode {
    Tabs,
    #[default]
    Accordion,
    SideBySide,
    Stacked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountSettings {
    pub display_mode: AccountMode,
    pub show_copy_button: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            display_mode: AccountMode::default(),
            show_copy_button: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Message (guestbook)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageMode {
    #[default]
    List,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageSettings {
    pub display_mode: MessageMode,
    pub placeholder: String,
    pub button_label: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            display_mode: MessageMode::default(),
            placeholder: "축하 메시지를 남겨주세요".to_string(),
            button_label: "방명록 작성".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactMode {
    Grid,
    #[default]
    List,
    Cards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSettings {
    pub display_mode: ContactMode,
    pub show_parents: bool,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            display_mode: ContactMode::default(),
            show_parents: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Interview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewMode {
    #[default]
    Card,
    Chat,
    Timeline,
    Accordion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewSettings {
    pub display_mode: InterviewMode,
}

// ---------------------------------------------------------------------------
// Ending / wreath / music / rsvp / greeting-parents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndingSettings {
    pub show_photo: bool,
}

impl Default for EndingSettings {
    fn default() -> Self {
        Self { show_photo: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WreathSettings {
    pub show_senders: bool,
    pub button_label: String,
}

impl Default for WreathSettings {
    fn default() -> Self {
        Self {
            show_senders: true,
            button_label: "화환 보내기".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicSettings {
    pub show_player: bool,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self { show_player: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RsvpSettings {
    pub show_deadline: bool,
    pub button_label: String,
}

impl Default for RsvpSettings {
    fn default() -> Self {
        Self {
            show_deadline: true,
            button_label: "참석 의사 전달하기".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GreetingParentsSettings {
    pub show_parents: bool,
}

impl Default for GreetingParentsSettings {
    fn default() -> Self {
        Self { show_parents: true }
    }
}

// ---------------------------------------------------------------------------
// Divider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DividerStyle {
    #[default]
    Line,
    Ornament,
    Space,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerSettings {
    pub style: DividerStyle,
}

// ---------------------------------------------------------------------------
// Video
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoSource {
    #[default]
    Youtube,
    Vimeo,
    File,
    Embed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSettings {
    pub source: VideoSource,
    pub autoplay: bool,
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoticeMode {
    #[default]
    List,
    Cards,
    Icons,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoticeSettings {
    pub display_mode: NoticeMode,
}
