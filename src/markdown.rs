//! Markdown → ratatui `Text` renderer for documentation pages.
//!
//! Converts `pulldown_cmark` events into styled lines: headings, emphasis,
//! inline code, lists, block quote callouts, links, tables, and fenced code
//! (handed to [`crate::code_block::highlight`]).

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::code_block::{self, CodeOptions};

/// Settings that apply to every page
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub base_fg: Color,
    pub accent: Color,
    pub code_defaults: CodeOptions,
    pub code_theme: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_fg: Color::Reset,
            accent: Color::Cyan,
            code_defaults: CodeOptions::default(),
            code_theme: code_block::DEFAULT_THEME.to_string(),
        }
    }
}

/// Render a markdown page. Returns owned text.
pub fn render(content: &str, options: &RenderOptions) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut writer = Writer::new(options);
    for event in Parser::new_ext(content, opts) {
        writer.handle(event);
    }
    writer.text
}

struct CodeBuffer {
    info: String,
    source: String,
}

#[derive(Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
    current_cell: String,
    in_head: bool,
}

struct Writer<'o> {
    options: &'o RenderOptions,
    text: Text<'static>,
    styles: Vec<Style>,
    /// Per-line prefix spans (block quote `│`)
    line_prefixes: Vec<Span<'static>>,
    /// None = unordered, Some(n) = ordered at index n
    list_indices: Vec<Option<u64>>,
    /// Per open item: whether a paragraph has already started on its marker line
    item_paragraphs: Vec<bool>,
    code: Option<CodeBuffer>,
    table: Option<TableBuffer>,
    link_url: Option<String>,
    needs_newline: bool,
}

impl<'o> Writer<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            text: Text::default(),
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            item_paragraphs: vec![],
            code: None,
            table: None,
            link_url: None,
            needs_newline: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.options.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for prefix in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, prefix);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        match self.text.lines.last_mut() {
            Some(line) => line.spans.push(span),
            None => self.push_line(Line::from(vec![span])),
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.text(CowStr::Borrowed(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            Event::Rule => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => match self.item_paragraphs.last_mut() {
                // The first paragraph of an item sits on the marker line
                Some(started) if !*started => *started = true,
                Some(_) => {
                    self.needs_newline = false;
                    let indent = "  ".repeat(self.list_indices.len());
                    self.push_line(Line::from(Span::raw(indent)));
                }
                None => {
                    self.blank_line_if_needed();
                    self.push_line(Line::default());
                }
            },
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                self.push_style(heading_style(self.options.accent, level));
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.line_prefixes.push(Span::styled(
                    "▌ ",
                    Style::default().fg(self.options.accent),
                ));
            }
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(CodeBuffer {
                    info,
                    source: String::new(),
                });
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.item_paragraphs.push(false);
                self.needs_newline = false;
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(index) = self.list_indices.last_mut() {
                    let marker = match index {
                        None => format!("{indent}• "),
                        Some(n) => {
                            let marker = format!("{indent}{}. ", n);
                            *n += 1;
                            marker
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }
            Tag::Table(_) => {
                self.blank_line_if_needed();
                self.table = Some(TableBuffer::default());
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
            }
            Tag::TableRow | Tag::TableCell => {}
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.push_style(
                    Style::default()
                        .fg(self.options.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::BlockQuote(_) => {
                self.line_prefixes.pop();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.blank_line_if_needed();
                    let (language, options) =
                        CodeOptions::from_info_string(&code.info, &self.options.code_defaults);
                    for line in code_block::highlight(
                        &language,
                        &code.source,
                        &options,
                        &self.options.code_theme,
                    ) {
                        self.push_line(line);
                    }
                }
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {
                self.item_paragraphs.pop();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.current_cell);
                    table.current_row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    if !table.current_row.is_empty() {
                        table.header = std::mem::take(&mut table.current_row);
                    }
                    table.in_head = false;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.current_row);
                    if table.in_head {
                        table.header = row;
                    } else {
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    for line in table_lines(&table, self.options) {
                        self.push_line(line);
                    }
                }
                self.needs_newline = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    let target = format!(" → {}", url);
                    match self.table.as_mut() {
                        Some(table) => table.current_cell.push_str(&target),
                        None => {
                            self.push_span(Span::styled(target, Style::default().fg(Color::DarkGray)))
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, cow: CowStr<'_>) {
        if let Some(code) = self.code.as_mut() {
            code.source.push_str(&cow);
            return;
        }
        if let Some(table) = self.table.as_mut() {
            table.current_cell.push_str(&cow);
            return;
        }

        let style = self.style();
        self.push_span(Span::styled(cow.replace('\t', "    "), style));
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        if let Some(table) = self.table.as_mut() {
            table.current_cell.push_str(&cow);
            return;
        }
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        self.push_span(Span::styled(cow.to_string(), style));
    }
}

fn table_lines(table: &TableBuffer, options: &RenderOptions) -> Vec<Line<'static>> {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.header.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let cell_width = |cell: &str| Span::raw(cell.to_string()).width();
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell_width(cell));
        }
    }

    let rule = Style::default().fg(Color::DarkGray);
    let format_row = |row: &[String], style: Style| -> Line<'static> {
        let mut spans = Vec::new();
        for (index, width) in widths.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" │ ", rule));
            }
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            let padding = width.saturating_sub(cell_width(cell));
            spans.push(Span::styled(format!("{}{}", cell, " ".repeat(padding)), style));
        }
        Line::from(spans)
    };

    let mut lines = Vec::new();
    if !table.header.is_empty() {
        lines.push(format_row(
            &table.header,
            Style::default()
                .fg(options.accent)
                .add_modifier(Modifier::BOLD),
        ));
        let separator = widths
            .iter()
            .map(|width| "─".repeat(*width))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(separator, rule)));
    }
    for row in &table.rows {
        lines.push(format_row(row, Style::default().fg(options.base_fg)));
    }
    lines
}

fn heading_style(accent: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default().fg(accent).add_modifier(Modifier::BOLD),
        _ => Style::default().add_modifier(Modifier::BOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_lines(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_heading_is_bold() {
        let text = render("## Prerequisites", &RenderOptions::default());
        let line = &text.lines[0];
        assert_eq!(line.spans[0].content, "Prerequisites");
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_inline_code_styled() {
        let text = render("Edit `pubspec.yaml` first", &RenderOptions::default());
        let code = text.lines[0]
            .spans
            .iter()
            .find(|s| s.content == "pubspec.yaml")
            .unwrap();
        assert_eq!(code.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn test_fenced_code_uses_code_block() {
        let text = render(
            "```yaml file=pubspec.yaml\ndependencies:\n  serverpod_swagger: ^0.1.5\n```",
            &RenderOptions::default(),
        );
        let lines = plain_lines(&text);
        assert!(lines[0].contains("pubspec.yaml"));
        assert!(lines[1].contains("1 dependencies:"));
        assert!(lines.last().unwrap().starts_with('╰'));
    }

    #[test]
    fn test_unordered_and_ordered_lists() {
        let text = render("- one\n- two\n\n1. first\n2. second", &RenderOptions::default());
        let lines = plain_lines(&text);
        assert!(lines.contains(&"• one".to_string()));
        assert!(lines.contains(&"• two".to_string()));
        assert!(lines.contains(&"1. first".to_string()));
        assert!(lines.contains(&"2. second".to_string()));
    }

    #[test]
    fn test_table_columns_align() {
        let source = "| Option | Default |\n|---|---|\n| `--output` | `apispec.json` |\n| `--title` | name |";
        let text = render(source, &RenderOptions::default());
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "Option   │ Default     ");
        assert_eq!(lines[1], "─────────┼─────────────");
        assert_eq!(lines[2], "--output │ apispec.json");
        assert_eq!(lines[3], "--title  │ name        ");
    }

    #[test]
    fn test_link_shows_target() {
        let text = render(
            "[Examples](/examples)",
            &RenderOptions::default(),
        );
        let lines = plain_lines(&text);
        assert_eq!(lines[0], "Examples → /examples");
    }

    #[test]
    fn test_link_inside_table_stays_in_its_cell() {
        let source = "Intro\n\n| A | B |\n|---|---|\n| [x](/examples) | y |";
        let lines = plain_lines(&render(source, &RenderOptions::default()));
        assert_eq!(lines[0], "Intro");
        assert!(!lines.iter().any(|l| l.starts_with(" → ")));
        assert_eq!(lines.last().unwrap(), "x → /examples │ y");
    }

    #[test]
    fn test_later_item_paragraphs_get_their_own_line() {
        let lines = plain_lines(&render(
            "- first para\n\n  second para\n\n- next",
            &RenderOptions::default(),
        ));
        assert_eq!(lines, vec!["• first para", "  second para", "• next"]);
    }

    #[test]
    fn test_block_quote_prefix() {
        let text = render("> **Note:** trailing slash", &RenderOptions::default());
        let lines = plain_lines(&text);
        assert!(lines.iter().any(|l| l.starts_with("▌ Note:")));
    }
}
