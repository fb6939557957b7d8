use letter_renderer::{FontKind, FontResource, RenderedDocument, VNode};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid tag name: {0}")]
    InvalidTag(String),

    #[error("Invalid attribute name '{name}' on <{tag}>")]
    InvalidAttribute { tag: String, name: String },

    #[error("Compilation error: {0}")]
    Generic(String),
}

impl From<String> for CompileError {
    fn from(s: String) -> Self {
        CompileError::Generic(s)
    }
}

impl From<&str> for CompileError {
    fn from(s: &str) -> Self {
        CompileError::Generic(s.to_string())
    }
}

pub const DEFAULT_TITLE: &str = "모바일 청첩장";

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// `<title>`; falls back to [`DEFAULT_TITLE`]
    pub title: Option<String>,
    /// Emit `<link>` tags for the document's fonts
    pub include_fonts: bool,
    pub lang: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            title: None,
            include_fonts: true,
            lang: "ko".to_string(),
        }
    }
}

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered document to a standalone HTML page
pub fn compile_to_html(
    document: &RenderedDocument,
    options: CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    let lang = escape_html(&ctx.options.lang);
    ctx.add_line(&format!("<html lang=\"{}\">", lang));
    ctx.indent();

    compile_head(document, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    compile_node(&document.root, &mut ctx)?;
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    debug!(bytes = html.len(), "Compiled HTML");
    Ok(html)
}

/// Compile a single node tree as an HTML fragment
pub fn compile_fragment(node: &VNode, options: CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    compile_node(node, &mut ctx)?;
    Ok(ctx.get_output())
}

fn compile_head(document: &RenderedDocument, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");

    let title = escape_html(ctx.options.title.as_deref().unwrap_or(DEFAULT_TITLE));
    ctx.add_line(&format!("<title>{}</title>", title));

    if ctx.options.include_fonts {
        compile_font_links(&document.font_resources, ctx);
    }

    if !document.css_variables.is_empty() {
        ctx.add_line("<style>");
        ctx.indent();
        ctx.add_line(":root {");
        ctx.indent();
        for (name, value) in &document.css_variables {
            ctx.add_line(&format!("{}: {};", name, escape_css(value)));
        }
        ctx.dedent();
        ctx.add_line("}");
        ctx.dedent();
        ctx.add_line("</style>");
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_font_links(fonts: &[FontResource], ctx: &mut Context) {
    if fonts.iter().any(|font| font.kind == FontKind::GoogleFonts) {
        ctx.add_line("<link rel=\"preconnect\" href=\"https://fonts.googleapis.com\">");
        ctx.add_line("<link rel=\"preconnect\" href=\"https://fonts.gstatic.com\" crossorigin>");
    }

    for font in fonts {
        let href = escape_html(&font.url);
        ctx.add_line(&format!("<link rel=\"preload\" as=\"style\" href=\"{}\">", href));
        ctx.add_line(&format!("<link rel=\"stylesheet\" href=\"{}\">", href));
    }
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            key: _,
        } => compile_tag(tag, attributes, styles, children, ctx),

        VNode::Text { content } => {
            let text = escape_html(content);
            ctx.add_line(&text);
            Ok(())
        }

        VNode::Error { message, block_id } => {
            let mut open = String::from("<div class=\"se2-error\" role=\"alert\"");
            if let Some(id) = block_id {
                open.push_str(&format!(" data-block-id=\"{}\"", escape_html(id)));
            }
            ctx.add_line(&format!("{}>{}</div>", open, escape_html(message)));
            Ok(())
        }
    }
}

fn compile_tag(
    tag: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(tag) {
        return Err(CompileError::InvalidTag(tag.to_string()));
    }

    let mut open = format!("<{}", tag);
    for (name, value) in attributes {
        if !is_valid_name(name) {
            return Err(CompileError::InvalidAttribute {
                tag: tag.to_string(),
                name: name.clone(),
            });
        }
        open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if !styles.is_empty() {
        let declarations: Vec<String> = styles
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect();
        open.push_str(&format!(" style=\"{}\"", escape_html(&declarations.join("; "))));
    }

    if is_self_closing(tag) {
        ctx.add_line(&format!("{} />", open));
        return Ok(());
    }
    open.push('>');

    // Text-only elements stay on one line
    if !has_element_children(children) {
        let text: String = children
            .iter()
            .filter_map(|child| match child {
                VNode::Text { content } => Some(escape_html(content)),
                _ => None,
            })
            .collect();
        ctx.add_line(&format!("{}{}</{}>", open, text, tag));
        return Ok(());
    }

    ctx.add_line(&open);
    ctx.indent();
    for child in children {
        compile_node(child, ctx)?;
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));

    Ok(())
}

/// Escape text for both element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keep values from closing the `<style>` element
fn escape_css(value: &str) -> String {
    value.replace("</", "<\\/")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}
