use crate::blocks::{DisplayBlock, SectionIcon};

/// Consumer of formatted replies. One implementation per output surface.
pub trait BlockRenderer {
    type Output;

    fn render_blocks(&self, blocks: &[DisplayBlock]) -> Self::Output;
}

pub fn icon_glyph(icon: SectionIcon) -> &'static str {
    match icon {
        SectionIcon::Cart => "🛒",
        SectionIcon::Package => "📦",
        SectionIcon::Tag => "🏷",
    }
}

/// Renders blocks as plain text for non-interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl PlainRenderer {
    fn render_block(block: &DisplayBlock, out: &mut Vec<String>) {
        match block {
            DisplayBlock::PlainText { text } => {
                out.extend(text.lines().map(str::to_string));
            }
            DisplayBlock::SectionHeader { title, icon } => {
                let heading = match icon {
                    Some(icon) => format!("{} {title}", icon_glyph(*icon)),
                    None => title.clone(),
                };
                let rule = "─".repeat(heading.chars().count());
                out.push(heading);
                out.push(rule);
            }
            DisplayBlock::ProductCard { name, price, availability, category, brand } => {
                out.push(format!("{} {name}", icon_glyph(SectionIcon::Cart)));
                let mut details = Vec::new();
                if !price.is_empty() {
                    details.push(format!("[{price}]"));
                }
                if let Some(availability) = availability {
                    details.push(format!("[{}]", availability.label()));
                }
                if !category.is_empty() {
                    details.push(format!("Category: {category}"));
                }
                if !brand.is_empty() {
                    details.push(format!("Brand: {brand}"));
                }
                if !details.is_empty() {
                    out.push(format!("   {}", details.join("  ")));
                }
            }
            DisplayBlock::CategoryOrBrandEntry { name, count, description } => {
                out.push(format!("{} {name}  ({count} products)", icon_glyph(SectionIcon::Package)));
                if !description.is_empty() {
                    out.push(format!("   {description}"));
                }
            }
            DisplayBlock::Recommendation { name, price, description } => {
                if price.is_empty() {
                    out.push(format!("★ {name}"));
                } else {
                    out.push(format!("★ {name}  [{price}]"));
                }
                if !description.is_empty() {
                    out.push(format!("   {description}"));
                }
            }
            DisplayBlock::BulletItem { text } => out.push(format!("  • {text}")),
        }
    }
}

impl BlockRenderer for PlainRenderer {
    type Output = String;

    fn render_blocks(&self, blocks: &[DisplayBlock]) -> String {
        let mut lines = Vec::with_capacity(blocks.len() * 2);
        for block in blocks {
            Self::render_block(block, &mut lines);
        }
        lines.join("\n")
    }
}
