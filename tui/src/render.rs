use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use shopchat_core::render::{icon_glyph, BlockRenderer};
use shopchat_core::{Availability, DisplayBlock, SectionIcon};

const INDENT: &str = "   ";

/// Renders display blocks as styled ratatui lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineRenderer;

fn badge(text: &str, style: Style) -> Span<'static> {
    Span::styled(format!(" {text} "), style)
}

fn availability_badge(availability: Availability) -> Span<'static> {
    let bg = match availability {
        Availability::InStock => Color::Green,
        Availability::OutOfStock => Color::Red,
    };
    badge(
        availability.label(),
        Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
    )
}

fn dim(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

impl LineRenderer {
    fn render_block(block: &DisplayBlock, out: &mut Vec<Line<'static>>) {
        match block {
            DisplayBlock::PlainText { text } => {
                out.extend(text.lines().map(|l| Line::from(l.to_string())));
            }
            DisplayBlock::SectionHeader { title, icon } => {
                let style = Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                let mut spans = Vec::new();
                if let Some(icon) = icon {
                    spans.push(Span::styled(format!("{} ", icon_glyph(*icon)), style));
                }
                spans.push(Span::styled(title.clone(), style));
                out.push(Line::from(spans));
            }
            DisplayBlock::ProductCard { name, price, availability, category, brand } => {
                out.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", icon_glyph(SectionIcon::Cart)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ]));

                let mut details: Vec<Span<'static>> = Vec::new();
                if !price.is_empty() {
                    details.push(badge(price, Style::default().fg(Color::Yellow)));
                }
                if let Some(availability) = availability {
                    details.push(availability_badge(*availability));
                }
                if !category.is_empty() {
                    details.push(dim(format!(" Category: {category}")));
                }
                if !brand.is_empty() {
                    details.push(dim(format!(" Brand: {brand}")));
                }
                if !details.is_empty() {
                    details.insert(0, Span::raw(INDENT));
                    out.push(Line::from(details));
                }
            }
            DisplayBlock::CategoryOrBrandEntry { name, count, description } => {
                out.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", icon_glyph(SectionIcon::Package)),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    badge(&format!("{count} products"), Style::default().fg(Color::Magenta)),
                ]));
                if !description.is_empty() {
                    out.push(Line::from(vec![Span::raw(INDENT), dim(description.clone())]));
                }
            }
            DisplayBlock::Recommendation { name, price, description } => {
                let mut spans = vec![
                    Span::styled("★ ", Style::default().fg(Color::Yellow)),
                    Span::styled(name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                ];
                if !price.is_empty() {
                    spans.push(Span::raw(" "));
                    spans.push(badge(price, Style::default().fg(Color::Black).bg(Color::Yellow)));
                }
                out.push(Line::from(spans));
                if !description.is_empty() {
                    out.push(Line::from(vec![Span::raw(INDENT), dim(description.clone())]));
                }
            }
            DisplayBlock::BulletItem { text } => {
                out.push(Line::from(vec![
                    Span::styled("  • ", Style::default().fg(Color::Cyan)),
                    Span::raw(text.clone()),
                ]));
            }
        }
    }
}

impl BlockRenderer for LineRenderer {
    type Output = Vec<Line<'static>>;

    fn render_blocks(&self, blocks: &[DisplayBlock]) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(blocks.len() * 2);
        for block in blocks {
            Self::render_block(block, &mut lines);
        }
        lines
    }
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
