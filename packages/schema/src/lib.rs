//! # Letter Schema
//!
//! The document model shared by the renderer, the store and the editor.
//!
//! ```text
//! EditorDocument
//! ├── meta, status, version
//! ├── blocks: [Block]      (ordered; disabled blocks kept but not rendered)
//! ├── style: StyleSystem   (partial; resolved by letter-renderer)
//! ├── data: WeddingData    (canonical shape)
//! └── animation
//! ```

pub mod block;
pub mod compose;
pub mod data;
pub mod document;
pub mod errors;
pub mod lenient;
pub mod settings;
pub mod style;

pub use block::{Block, BlockElement, BlockStyleOverride, BlockType, ElementKind, Geometry};
pub use compose::{compose, Compose};
pub use data::{
    normalize_data, Account, Accounts, Bgm, Couple, EndingInfo, Greeting, InterviewInfo,
    InterviewItem, NoticeInfo, NoticeItem, PersonInfo, Photos, RsvpInfo, StoredWeddingData,
    TimelineInfo, TimelineItem, TransportInfo, Venue, VideoInfo, WeddingData, WeddingInfo,
    WreathInfo,
};
pub use document::{DocumentMeta, DocumentStatus, EditorDocument, CURRENT_VERSION};
pub use errors::{SchemaError, SchemaResult};
pub use settings::*;
pub use style::{
    is_legacy_style, normalize_style, AnimationMood, EffectsSpec, FontChoice, FontsSpec,
    GlobalAnimation, PaletteSpec, RadiusSpec, ShadowSpec, SpacingSpec, StyleSystem, ThemeSpec,
    TokenOverrides, TypographySpec,
};
