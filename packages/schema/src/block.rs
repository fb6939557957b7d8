use crate::errors::{SchemaError, SchemaResult};
use crate::style::TokenOverrides;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One content unit of an invitation document
///
/// `block_type` keeps the stored string so documents written by newer or
/// misconfigured editors still load; [`Block::kind`] parses it into the closed
/// [`BlockType`] set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum height in vh
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Per-type presentation settings (display mode, flags)
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub settings: Map<String, Value>,

    /// Text templates with `{path}` placeholders
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub content: Map<String, Value>,

    /// Freely positioned elements (edit-mode draggable)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<BlockElement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BlockStyleOverride>,
}

fn default_enabled() -> bool {
    true
}

impl Block {
    pub fn new(id: impl Into<String>, block_type: BlockType) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.as_str().to_string(),
            enabled: true,
            height: None,
            settings: Map::new(),
            content: Map::new(),
            elements: Vec::new(),
            style: None,
        }
    }

    /// Parse the stored type string
    pub fn kind(&self) -> SchemaResult<BlockType> {
        self.block_type.parse()
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.insert(key.into(), Value::String(value.into()));
        self
    }

    pub fn with_element(mut self, element: BlockElement) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// A content template as a string, if present
    pub fn content_str(&self, key: &str) -> Option<&str> {
        self.content.get(key).and_then(Value::as_str)
    }

    pub fn find_element(&self, element_id: &str) -> Option<&BlockElement> {
        self.elements.iter().find(|e| e.id == element_id)
    }

    pub fn find_element_mut(&mut self, element_id: &str) -> Option<&mut BlockElement> {
        self.elements.iter_mut().find(|e| e.id == element_id)
    }
}

/// The closed set of block kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Hero,
    Gallery,
    Profile,
    Calendar,
    Location,
    Account,
    Message,
    Contact,
    Interview,
    Ending,
    Wreath,
    Divider,
    Music,
    Video,
    Notice,
    Rsvp,
    GreetingParents,
}

impl BlockType {
    pub const ALL: [BlockType; 17] = [
        BlockType::Hero,
        BlockType::Gallery,
        BlockType::Profile,
        BlockType::Calendar,
        BlockType::Location,
        BlockType::Account,
        BlockType::Message,
        BlockType::Contact,
        BlockType::Interview,
        BlockType::Ending,
        BlockType::Wreath,
        BlockType::Divider,
        BlockType::Music,
        BlockType::Video,
        BlockType::Notice,
        BlockType::Rsvp,
        BlockType::GreetingParents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Hero => "hero",
            BlockType::Gallery => "gallery",
            BlockType::Profile => "profile",
            BlockType::Calendar => "calendar",
            BlockType::Location => "location",
            BlockType::Account => "account",
            BlockType::Message => "message",
            BlockType::Contact => "contact",
            BlockType::Interview => "interview",
            BlockType::Ending => "ending",
            BlockType::Wreath => "wreath",
            BlockType::Divider => "divider",
            BlockType::Music => "music",
            BlockType::Video => "video",
            BlockType::Notice => "notice",
            BlockType::Rsvp => "rsvp",
            BlockType::GreetingParents => "greeting-parents",
        }
    }

    /// Label shown on the block badge in edit mode
    pub fn label_ko(&self) -> &'static str {
        match self {
            BlockType::Hero => "메인 커버",
            BlockType::Gallery => "갤러리",
            BlockType::Profile => "프로필",
            BlockType::Calendar => "캘린더",
            BlockType::Location => "오시는 길",
            BlockType::Account => "축의금",
            BlockType::Message => "방명록",
            BlockType::Contact => "연락처",
            BlockType::Interview => "인터뷰",
            BlockType::Ending => "엔딩",
            BlockType::Wreath => "화환",
            BlockType::Divider => "구분선",
            BlockType::Music => "음악",
            BlockType::Video => "영상",
            BlockType::Notice => "안내사항",
            BlockType::Rsvp => "참석 여부",
            BlockType::GreetingParents => "인사말",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownBlockType(s.to_string()))
    }
}

/// Position and size in percent of the block box, rotation in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Text,
    Image,
    Shape,
    Button,
}

/// A freely positioned element inside a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockElement {
    pub id: String,
    pub kind: ElementKind,
    #[serde(flatten)]
    pub geometry: Geometry,
    #[serde(default)]
    pub z_index: i32,
    /// Literal value or `{path}` template (text), URL (image)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Data path whose value replaces `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
}

impl BlockElement {
    pub fn new(id: impl Into<String>, kind: ElementKind, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            kind,
            geometry,
            z_index: 0,
            value: None,
            binding: None,
            style: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_binding(mut self, path: impl Into<String>) -> Self {
        self.binding = Some(path.into());
        self
    }
}

/// Per-block style adjustments layered over the document style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyleOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<TokenOverrides>,
    /// Raw CSS background (color or gradient)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Raw CSS padding
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
}
