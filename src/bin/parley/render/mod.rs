mod styles;

use crossterm::style::ContentStyle;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

pub use styles::{MarkdownStyles, Theme};

mod code_block {
    pub const TOP_LEFT: &str = "┌";
    pub const TOP_RIGHT: &str = "┐";
    pub const BOTTOM_LEFT: &str = "└";
    pub const BOTTOM_RIGHT: &str = "┘";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
}

/// Renders markdown into text decorated with ANSI escape sequences.
pub fn render_markdown(input: &str, styles: &MarkdownStyles) -> String {
    let mut renderer = Renderer::new(*styles);
    renderer.run(input);
    renderer.finish()
}

struct Renderer {
    lines: Vec<String>,
    current: String,
    styles: MarkdownStyles,
    inline_styles: Vec<ContentStyle>,
    list_stack: Vec<Option<u64>>,
    pending_marker: Option<String>,
    in_code_block: bool,
    code_block_lang: Option<String>,
    code_block_buf: String,
}

impl Renderer {
    fn new(styles: MarkdownStyles) -> Self {
        Self {
            lines: Vec::new(),
            current: String::new(),
            styles,
            inline_styles: Vec::new(),
            list_stack: Vec::new(),
            pending_marker: None,
            in_code_block: false,
            code_block_lang: None,
            code_block_buf: String::new(),
        }
    }

    fn run(&mut self, input: &str) {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(input, options);
        for event in parser {
            self.handle_event(event);
        }
        self.flush_line();
    }

    fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }

    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_inline_code(&code),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => self.flush_line(),
            Event::Rule => self.rule(),
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.push_heading_style(level),
            Tag::Emphasis => self.inline_styles.push(self.styles.emphasis),
            Tag::Strong => self.inline_styles.push(self.styles.strong),
            Tag::Strikethrough => self.inline_styles.push(self.styles.strikethrough),
            Tag::BlockQuote(_) => self.inline_styles.push(self.styles.blockquote),
            Tag::List(start) => {
                self.flush_line();
                self.list_stack.push(start);
            }
            Tag::Item => self.push_list_marker(),
            Tag::CodeBlock(kind) => self.start_code_block(kind),
            Tag::Link { .. } => self.inline_styles.push(self.styles.link),
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.lines.push(String::new());
                }
            }
            TagEnd::Heading(_) => {
                self.inline_styles.pop();
                self.flush_line();
                self.lines.push(String::new());
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::BlockQuote(_)
            | TagEnd::Link => {
                self.inline_styles.pop();
            }
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.lines.push(String::new());
                }
            }
            TagEnd::Item => {
                self.flush_line();
                if let Some(Some(next)) = self.list_stack.last_mut() {
                    *next += 1;
                }
            }
            TagEnd::CodeBlock => self.end_code_block(),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            self.code_block_buf.push_str(text);
            return;
        }
        let styled = self.styled(text);
        self.current.push_str(&styled);
    }

    fn push_inline_code(&mut self, code: &str) {
        let styled = self.styles.code.apply(code).to_string();
        self.current.push_str(&styled);
    }

    fn push_heading_style(&mut self, level: HeadingLevel) {
        let style = match level {
            HeadingLevel::H1 => self.styles.h1,
            HeadingLevel::H2 => self.styles.h2,
            _ => self.styles.h3,
        };
        self.inline_styles.push(style);
    }

    fn push_list_marker(&mut self) {
        let depth = self.list_stack.len().saturating_sub(1);
        let marker = match self.list_stack.last().copied().flatten() {
            Some(num) => format!("{num}. "),
            None => "• ".to_string(),
        };
        let indent = "  ".repeat(depth);
        self.pending_marker = Some(format!(
            "{indent}{}",
            self.styles.list_marker.apply(marker)
        ));
    }

    fn start_code_block(&mut self, kind: CodeBlockKind<'_>) {
        self.flush_line();
        self.in_code_block = true;
        self.code_block_buf.clear();
        self.code_block_lang = match kind {
            CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
            _ => None,
        };
    }

    fn end_code_block(&mut self) {
        let lang = self.code_block_lang.take();
        let code = std::mem::take(&mut self.code_block_buf);
        let code_lines: Vec<&str> = code.trim_end_matches('\n').lines().collect();
        self.render_code_block(&code_lines, lang.as_deref().unwrap_or("code"));
        self.in_code_block = false;
    }

    fn render_code_block(&mut self, code_lines: &[&str], lang: &str) {
        let border = self.styles.code_border;
        let content_width = code_lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(20);
        // "│ " prefix plus " │" suffix
        let box_width = content_width + 4;

        let label = format!(" {lang} ");
        let right = code_block::HORIZONTAL
            .repeat(box_width.saturating_sub(3 + label.chars().count()));
        self.lines.push(format!(
            "{}{}{}",
            border.apply(format!("{}{}", code_block::TOP_LEFT, code_block::HORIZONTAL)),
            self.styles.code_header.apply(label),
            border.apply(format!("{right}{}", code_block::TOP_RIGHT)),
        ));

        for line in code_lines {
            self.lines.push(format!(
                "{}{}",
                border.apply(format!("{} ", code_block::VERTICAL)),
                self.styles.code.apply(line),
            ));
        }

        let bottom = code_block::HORIZONTAL.repeat(box_width.saturating_sub(2));
        self.lines.push(
            border
                .apply(format!(
                    "{}{bottom}{}",
                    code_block::BOTTOM_LEFT,
                    code_block::BOTTOM_RIGHT
                ))
                .to_string(),
        );
        self.lines.push(String::new());
    }

    fn soft_break(&mut self) {
        let styled = self.styled(" ");
        self.current.push_str(&styled);
    }

    fn rule(&mut self) {
        self.flush_line();
        self.lines.push(code_block::HORIZONTAL.repeat(24));
        self.lines.push(String::new());
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() && self.pending_marker.is_none() {
            return;
        }
        let mut line = self.pending_marker.take().unwrap_or_default();
        line.push_str(&self.current);
        self.current.clear();
        self.lines.push(line);
    }

    fn styled(&self, text: &str) -> String {
        match self.current_style() {
            Some(style) => style.apply(text).to_string(),
            None => text.to_string(),
        }
    }

    /// All open inline styles merged, inner colors winning.
    fn current_style(&self) -> Option<ContentStyle> {
        let (first, rest) = self.inline_styles.split_first()?;
        Some(rest.iter().fold(*first, |mut merged, style| {
            merged.foreground_color = style.foreground_color.or(merged.foreground_color);
            merged.background_color = style.background_color.or(merged.background_color);
            merged.attributes.extend(style.attributes);
            merged
        }))
    }
}
