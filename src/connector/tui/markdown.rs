//! Markdown to terminal lines.
//!
//! Every structural element maps to a [`Presentation`] through
//! [`presentation`]; the renderer walks the `pulldown-cmark` event stream
//! once and applies whatever the table says. Elements missing from the
//! table (links, tables, images...) render as their text in the enclosing
//! style.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Paragraph,
    Heading,
    Strong,
    Emphasis,
    Code,
    CodeBlock,
    BulletList,
    OrderedList,
    ListItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub style: Style,
    /// Starts on a fresh line.
    pub block: bool,
}

pub const BODY_STYLE: Style = Style::new().fg(Color::Gray);
const INDIGO: Color = Color::Rgb(165, 180, 252);

pub fn presentation(element: Element) -> Presentation {
    let (style, block) = match element {
        Element::Paragraph => (Style::new(), true),
        Element::Heading => (
            Style::new()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            true,
        ),
        Element::Strong => (
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            false,
        ),
        Element::Emphasis => (Style::new().fg(INDIGO).add_modifier(Modifier::ITALIC), false),
        Element::Code => (Style::new().fg(Color::Gray).bg(Color::DarkGray), false),
        Element::CodeBlock => (Style::new().fg(Color::Gray).bg(Color::DarkGray), true),
        Element::BulletList | Element::OrderedList => (Style::new(), true),
        Element::ListItem => (Style::new(), true),
    };
    Presentation { style, block }
}

impl Element {
    fn from_tag(tag: &Tag<'_>) -> Option<Self> {
        match tag {
            Tag::Paragraph => Some(Element::Paragraph),
            Tag::Heading { .. } => Some(Element::Heading),
            Tag::Strong => Some(Element::Strong),
            Tag::Emphasis => Some(Element::Emphasis),
            Tag::CodeBlock(_) => Some(Element::CodeBlock),
            Tag::List(None) => Some(Element::BulletList),
            Tag::List(Some(_)) => Some(Element::OrderedList),
            Tag::Item => Some(Element::ListItem),
            _ => None,
        }
    }

    fn from_tag_end(tag: &TagEnd) -> Option<Self> {
        match tag {
            TagEnd::Paragraph => Some(Element::Paragraph),
            TagEnd::Heading(_) => Some(Element::Heading),
            TagEnd::Strong => Some(Element::Strong),
            TagEnd::Emphasis => Some(Element::Emphasis),
            TagEnd::CodeBlock => Some(Element::CodeBlock),
            TagEnd::List(false) => Some(Element::BulletList),
            TagEnd::List(true) => Some(Element::OrderedList),
            TagEnd::Item => Some(Element::ListItem),
            _ => None,
        }
    }
}

/// Render markdown `text` into styled lines.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut renderer = Renderer::new();
    for event in Parser::new(text) {
        renderer.handle(event);
    }
    renderer.finish()
}

struct Renderer {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// Next number per open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    /// Right after an item marker, so its first paragraph stays inline.
    item_lead: bool,
}

impl Renderer {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            styles: vec![BODY_STYLE],
            lists: Vec::new(),
            item_lead: false,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(BODY_STYLE)
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let style = self.style().patch(presentation(Element::Code).style);
                self.current.push(Span::styled(code.to_string(), style));
                self.item_lead = false;
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.blank_line();
                self.lines
                    .push(Line::styled("─".repeat(24), Style::new().fg(Color::DarkGray)));
                self.blank_line();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let list_start = match &tag {
            Tag::List(start) => Some(*start),
            _ => None,
        };

        let Some(element) = Element::from_tag(&tag) else {
            return;
        };
        let rule = presentation(element);

        if rule.block && !(element == Element::Paragraph && self.item_lead) {
            self.flush();
            if self.lists.is_empty() && element != Element::ListItem {
                self.blank_line();
            }
        }

        self.styles.push(self.style().patch(rule.style));

        if let Some(start) = list_start {
            self.lists.push(start);
        }

        if element == Element::ListItem {
            let depth = self.lists.len().saturating_sub(1);
            let marker = match self.lists.last_mut() {
                Some(Some(next)) => {
                    let marker = format!("{next}. ");
                    *next += 1;
                    marker
                }
                _ => "• ".to_string(),
            };
            self.current
                .push(Span::styled(format!("{}{}", "  ".repeat(depth), marker), BODY_STYLE));
            self.item_lead = true;
        }
    }

    fn end(&mut self, tag: TagEnd) {
        let Some(element) = Element::from_tag_end(&tag) else {
            return;
        };

        if presentation(element).block {
            self.flush();
        }

        self.styles.pop();

        if matches!(element, Element::BulletList | Element::OrderedList) {
            self.lists.pop();
        }
        self.item_lead = false;
    }

    fn text(&mut self, text: &str) {
        let style = self.style();
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush();
            }
            if !segment.is_empty() {
                self.current.push(Span::styled(segment.to_string(), style));
            }
        }
        self.item_lead = false;
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|line| line.spans.is_empty()) || self.lines.is_empty() {
            return;
        }
        self.lines.push(Line::default());
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }
}
