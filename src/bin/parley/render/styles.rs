use crossterm::style::{Attribute, Color, ContentStyle};

#[derive(Debug, Clone, Copy)]
pub struct MarkdownStyles {
    pub h1: ContentStyle,
    pub h2: ContentStyle,
    pub h3: ContentStyle,
    pub code: ContentStyle,
    pub emphasis: ContentStyle,
    pub strong: ContentStyle,
    pub strikethrough: ContentStyle,
    pub list_marker: ContentStyle,
    pub link: ContentStyle,
    pub blockquote: ContentStyle,
    pub code_border: ContentStyle,
    pub code_header: ContentStyle,
}

impl MarkdownStyles {
    /// Styles that emit no escape sequences, for output that is not a terminal.
    pub fn plain() -> Self {
        let none = ContentStyle::new();
        Self {
            h1: none,
            h2: none,
            h3: none,
            code: none,
            emphasis: none,
            strong: none,
            strikethrough: none,
            list_marker: none,
            link: none,
            blockquote: none,
            code_border: none,
            code_header: none,
        }
    }
}

impl Default for MarkdownStyles {
    fn default() -> Self {
        let orange = Color::AnsiValue(173);
        let dim_gray = Color::AnsiValue(242);
        let muted_gray = Color::AnsiValue(246);

        Self {
            h1: style(None, &[Attribute::Bold, Attribute::Underlined]),
            h2: style(None, &[Attribute::Bold]),
            h3: style(None, &[Attribute::Bold, Attribute::Italic]),
            code: style(Some(orange), &[Attribute::Bold]),
            emphasis: style(None, &[Attribute::Italic]),
            strong: style(None, &[Attribute::Bold]),
            strikethrough: style(None, &[Attribute::CrossedOut]),
            list_marker: style(Some(orange), &[]),
            link: style(Some(orange), &[Attribute::Underlined]),
            blockquote: style(Some(muted_gray), &[Attribute::Italic]),
            code_border: style(Some(dim_gray), &[]),
            code_header: style(Some(muted_gray), &[Attribute::Dim]),
        }
    }
}

/// Colors for the labels and notices printed around rendered answers.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub you: ContentStyle,
    pub ai: ContentStyle,
    pub error: ContentStyle,
    pub markdown: MarkdownStyles,
}

impl Theme {
    pub fn plain() -> Self {
        let none = ContentStyle::new();
        Self {
            you: none,
            ai: none,
            error: none,
            markdown: MarkdownStyles::plain(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            you: style(Some(Color::AnsiValue(5)), &[Attribute::Bold]),
            ai: style(Some(Color::AnsiValue(202)), &[Attribute::Bold]),
            error: style(Some(Color::AnsiValue(9)), &[]),
            markdown: MarkdownStyles::default(),
        }
    }
}

pub fn style(foreground: Option<Color>, attributes: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = foreground;
    for attribute in attributes {
        style.attributes.set(*attribute);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_are_styled() {
        let styles = MarkdownStyles::default();
        assert!(styles.code.foreground_color.is_some());
        assert!(styles.strong.attributes.has(Attribute::Bold));
    }

    #[test]
    fn plain_styles_emit_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(theme.error.apply("oops").to_string(), "oops");
        assert_eq!(theme.markdown.h1.apply("Title").to_string(), "Title");
    }
}
