use lazy_static::lazy_static;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntaxTheme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Display options for one code listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeOptions {
    pub show_line_numbers: bool,
    pub file_name: Option<String>,
}

impl Default for CodeOptions {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            file_name: None,
        }
    }
}

impl CodeOptions {
    /// Split a fence info string like `dart file=main.dart nolinenums`
    /// into the language token and the options that follow it.
    pub fn from_info_string(info: &str, defaults: &CodeOptions) -> (String, CodeOptions) {
        let mut words = info.split_whitespace();
        let language = words.next().unwrap_or("").to_string();
        let mut options = defaults.clone();

        for word in words {
            match word {
                "nolinenums" => options.show_line_numbers = false,
                "linenums" => options.show_line_numbers = true,
                _ => {
                    if let Some(name) = word.strip_prefix("file=") {
                        options.file_name = Some(name.to_string());
                    } else {
                        log::debug!("code_block: ignoring fence option {:?}", word);
                    }
                }
            }
        }

        (language, options)
    }
}

fn find_syntax(language: &str) -> &'static SyntaxReference {
    if language.is_empty() {
        return SYNTAX_SET.find_syntax_plain_text();
    }
    SYNTAX_SET
        .find_syntax_by_token(language)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}

fn find_theme(name: &str) -> Option<&'static SyntaxTheme> {
    THEME_SET
        .themes
        .get(name)
        .or_else(|| THEME_SET.themes.get(DEFAULT_THEME))
}

/// Render `source` as highlighted lines.
///
/// Unknown languages fall back to plain text. Tabs become four spaces
/// because ratatui draws `\t` with zero width.
pub fn highlight(
    language: &str,
    source: &str,
    options: &CodeOptions,
    theme_name: &str,
) -> Vec<Line<'static>> {
    let border = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    match &options.file_name {
        Some(name) => lines.push(Line::from(vec![
            Span::styled("╭─ ", border),
            Span::styled(
                name.clone(),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ─", border),
        ])),
        None => lines.push(Line::from(Span::styled("╭──", border))),
    }

    let syntax = find_syntax(language);
    let mut highlighter = find_theme(theme_name).map(|theme| HighlightLines::new(syntax, theme));
    let total = source.lines().count().max(1);
    let number_width = total.to_string().len();

    for (index, line) in LinesWithEndings::from(source).enumerate() {
        let mut spans = vec![Span::styled("│ ", border)];
        if options.show_line_numbers {
            spans.push(Span::styled(
                format!("{:>width$} ", index + 1, width = number_width),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let highlighted = highlighter
            .as_mut()
            .map(|h| h.highlight_line(line, &SYNTAX_SET));
        match highlighted {
            Some(Ok(ranges)) => {
                for (style, fragment) in ranges {
                    let content = fragment.trim_end_matches('\n').replace('\t', "    ");
                    if content.is_empty() {
                        continue;
                    }
                    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
                    spans.push(Span::styled(content, Style::default().fg(fg)));
                }
            }
            Some(Err(e)) => {
                log::warn!("code_block: highlighting failed: {}", e);
                spans.push(Span::raw(line.trim_end_matches('\n').replace('\t', "    ")));
            }
            None => spans.push(Span::raw(line.trim_end_matches('\n').replace('\t', "    "))),
        }

        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled("╰──", border)));
    lines
}
