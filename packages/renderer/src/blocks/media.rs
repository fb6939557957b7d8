//! Photo, audio and video blocks. Embedded player URLs must be http(s).

use super::{allowed_url, image, modifier_class, BlockContext, EMBED_SCHEMES};
use crate::vdom::VNode;
use letter_schema::{GalleryMode, GallerySettings, MusicSettings, VideoSettings, VideoSource};

fn edit_placeholder(ctx: &BlockContext, message: &str) -> Option<VNode> {
    ctx.is_edit()
        .then(|| VNode::text_element("p", "se2-block__placeholder", message))
}

pub(super) fn gallery(ctx: &BlockContext, s: &GallerySettings) -> VNode {
    let photos = &ctx.binding.data().photos.gallery;
    let limit = s.max_items.unwrap_or(photos.len());
    let photos: Vec<&str> = photos
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .take(limit)
        .collect();

    let body = VNode::with_tag_class("div", modifier_class("se2-gallery", &s.display_mode))
        .with_optional_child(ctx.heading("갤러리"));

    if photos.is_empty() {
        return body.with_optional_child(edit_placeholder(ctx, "사진을 추가해 주세요"));
    }

    let columns = s.columns.clamp(1, 6);
    let mut track = VNode::with_tag_class("div", "se2-gallery__track")
        .with_attr("data-count", photos.len().to_string());

    track = match s.display_mode {
        GalleryMode::Grid => track
            .with_style("display", "grid")
            .with_style("grid-template-columns", format!("repeat({}, 1fr)", columns))
            .with_style("gap", "var(--element-gap)"),
        GalleryMode::Masonry => track
            .with_style("column-count", columns.to_string())
            .with_style("column-gap", "var(--element-gap)"),
        GalleryMode::Carousel | GalleryMode::FilmStrip => track
            .with_style("display", "flex")
            .with_style("overflow-x", "auto")
            .with_style("scroll-snap-type", "x mandatory"),
        GalleryMode::Fullscreen | GalleryMode::Polaroid => track,
    };

    let items = photos
        .iter()
        .enumerate()
        .map(|(i, src)| {
            let alt = format!("사진 {}", i + 1);
            let mut item = VNode::with_tag_class("figure", "se2-gallery__item")
                .with_key(i.to_string())
                .with_attr("data-index", i.to_string())
                .with_child(image("se2-gallery__photo", src, &alt));

            match s.display_mode {
                GalleryMode::Polaroid => {
                    let tilt = if i % 2 == 0 { -2 } else { 2 };
                    item = item
                        .with_style("transform", format!("rotate({}deg)", tilt))
                        .with_style("background", "#ffffff")
                        .with_style("padding", "8px 8px 32px")
                        .with_style("box-shadow", "var(--shadow-md)");
                }
                GalleryMode::Fullscreen => {
                    item = item.with_style("height", "100vh");
                }
                GalleryMode::Carousel | GalleryMode::FilmStrip => {
                    item = item
                        .with_style("flex", "0 0 auto")
                        .with_style("scroll-snap-align", "center");
                }
                GalleryMode::Grid | GalleryMode::Masonry => {}
            }
            item
        })
        .collect();

    let mut body = body.with_child(track.with_children(items));
    if s.display_mode == GalleryMode::Carousel {
        body = body.with_child(VNode::text_element(
            "span",
            "se2-gallery__counter",
            format!("1 / {}", photos.len()),
        ));
    }
    body
}

pub(super) fn music(ctx: &BlockContext, s: &MusicSettings) -> VNode {
    let bgm = &ctx.binding.data().bgm;
    let body = VNode::with_tag_class("div", "se2-music");

    let Some(url) = bgm.url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return body.with_optional_child(edit_placeholder(ctx, "배경 음악을 선택해 주세요"));
    };

    let mut audio = VNode::with_tag_class("audio", "se2-music__audio")
        .with_attr("src", url)
        .with_attr("loop", "loop")
        .with_attr("preload", "none");
    if s.show_player {
        audio = audio.with_attr("controls", "controls");
    }
    if bgm.autoplay {
        audio = audio.with_attr("data-autoplay", "true");
    }

    body.with_optional_child(
        bgm.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| VNode::text_element("span", "se2-music__title", t)),
    )
    .with_child(audio)
}

/// Video id from the usual YouTube URL shapes
fn youtube_id(url: &str) -> Option<&str> {
    let rest = url
        .split_once("watch?v=")
        .or_else(|| url.split_once("youtu.be/"))
        .or_else(|| url.split_once("/embed/"))
        .or_else(|| url.split_once("/shorts/"))
        .map(|(_, rest)| rest)?;
    let id = rest.split(['&', '?', '/', '#']).next()?;
    (!id.is_empty()).then_some(id)
}

fn vimeo_id(url: &str) -> Option<&str> {
    url.rsplit('/')
        .find(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
}

/// Player URL for an iframe, `None` for direct files
pub(crate) fn embed_url(source: VideoSource, url: &str, autoplay: bool) -> Option<String> {
    let base = match source {
        VideoSource::Youtube => format!("https://www.youtube.com/embed/{}", youtube_id(url)?),
        VideoSource::Vimeo => format!("https://player.vimeo.com/video/{}", vimeo_id(url)?),
        VideoSource::Embed => allowed_url(url, &EMBED_SCHEMES)?.to_string(),
        VideoSource::File => return None,
    };

    if autoplay && source != VideoSource::Embed {
        Some(format!("{}?autoplay=1&mute=1", base))
    } else {
        Some(base)
    }
}

pub(super) fn video(ctx: &BlockContext, s: &VideoSettings) -> VNode {
    let info = &ctx.binding.data().video;
    let body = VNode::with_tag_class("div", modifier_class("se2-video", &s.source))
        .with_optional_child(ctx.heading("{video.title}"));

    let Some(url) = info.url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return body.with_optional_child(edit_placeholder(ctx, "영상 주소를 입력해 주세요"));
    };

    let player = match (s.source, embed_url(s.source, url, s.autoplay)) {
        (VideoSource::File, _) => {
            let mut video = VNode::with_tag_class("video", "se2-video__player")
                .with_attr("src", url)
                .with_attr("controls", "controls")
                .with_attr("playsinline", "playsinline");
            if s.autoplay {
                video = video.with_attr("autoplay", "autoplay").with_attr("muted", "muted");
            }
            video
        }
        (_, Some(src)) => VNode::with_tag_class("iframe", "se2-video__player")
            .with_attr("src", src)
            .with_attr("allow", "autoplay; encrypted-media; picture-in-picture")
            .with_attr("allowfullscreen", "true")
            .with_attr("loading", "lazy"),
        (_, None) => VNode::error(
            format!("Unrecognized video URL: {}", url),
            Some(ctx.block.id.clone()),
        ),
    };

    body.with_child(
        VNode::with_tag_class("div", "se2-video__frame")
            .with_style("aspect-ratio", "16 / 9")
            .with_child(player),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_ids() {
        assert_eq!(youtube_id("https://www.youtube.com/watch?v=abc123&t=10"), Some("abc123"));
        assert_eq!(youtube_id("https://youtu.be/abc123?si=x"), Some("abc123"));
        assert_eq!(youtube_id("https://www.youtube.com/embed/abc123"), Some("abc123"));
        assert_eq!(youtube_id("https://example.com/video"), None);
    }

    #[test]
    fn test_embed_urls() {
        assert_eq!(
            embed_url(VideoSource::Vimeo, "https://vimeo.com/76979871", false).as_deref(),
            Some("https://player.vimeo.com/video/76979871")
        );
        assert_eq!(
            embed_url(VideoSource::Youtube, "https://youtu.be/xyz", true).as_deref(),
            Some("https://www.youtube.com/embed/xyz?autoplay=1&mute=1")
        );
        assert_eq!(embed_url(VideoSource::File, "a.mp4", true), None);
    }

    #[test]
    fn test_embed_url_requires_http() {
        assert_eq!(
            embed_url(VideoSource::Embed, " https://tv.naver.com/embed/1 ", false).as_deref(),
            Some("https://tv.naver.com/embed/1")
        );
        assert_eq!(embed_url(VideoSource::Embed, "javascript:alert(1)", false), None);
        assert_eq!(embed_url(VideoSource::Embed, "data:text/html,hi", false), None);
        assert_eq!(embed_url(VideoSource::Embed, "//evil.example/x", false), None);
    }
}
