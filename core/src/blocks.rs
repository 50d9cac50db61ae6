use serde::{Deserialize, Serialize};

/// Icon shown next to a section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionIcon {
    Cart,
    Package,
    Tag,
}

impl SectionIcon {
    /// Picks the icon by substring match on a section title.
    pub fn for_title(title: &str) -> Option<Self> {
        if title.contains("Product") {
            Some(Self::Cart)
        } else if title.contains("Categor") {
            Some(Self::Package)
        } else if title.contains("Brand") {
            Some(Self::Tag)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    /// `In Stock` wins over `Out of Stock`; anything else carries no tag.
    pub fn from_label(label: &str) -> Option<Self> {
        if label.contains("In Stock") {
            Some(Self::InStock)
        } else if label.contains("Out of Stock") {
            Some(Self::OutOfStock)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

/// One structured unit of a formatted bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayBlock {
    PlainText {
        text: String,
    },
    SectionHeader {
        title: String,
        icon: Option<SectionIcon>,
    },
    ProductCard {
        name: String,
        price: String,
        availability: Option<Availability>,
        category: String,
        brand: String,
    },
    CategoryOrBrandEntry {
        name: String,
        count: String,
        description: String,
    },
    Recommendation {
        name: String,
        price: String,
        description: String,
    },
    BulletItem {
        text: String,
    },
}

impl DisplayBlock {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::BulletItem { text: text.into() }
    }

    pub fn header(title: impl Into<String>) -> Self {
        let title = title.into();
        let icon = SectionIcon::for_title(&title);
        Self::SectionHeader { title, icon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_for_title() {
        assert_eq!(SectionIcon::for_title("Products"), Some(SectionIcon::Cart));
        assert_eq!(SectionIcon::for_title("Available Categories"), Some(SectionIcon::Package));
        assert_eq!(SectionIcon::for_title("Category"), Some(SectionIcon::Package));
        assert_eq!(SectionIcon::for_title("Our Brands"), Some(SectionIcon::Tag));
        assert_eq!(SectionIcon::for_title("Recommendations"), None);
        // case sensitive, like the markers themselves
        assert_eq!(SectionIcon::for_title("products"), None);
    }

    #[test]
    fn test_availability_from_label() {
        assert_eq!(Availability::from_label("In Stock (5 units)"), Some(Availability::InStock));
        assert_eq!(Availability::from_label("Out of Stock"), Some(Availability::OutOfStock));
        assert_eq!(Availability::from_label("Limited"), None);
        assert_eq!(Availability::from_label(""), None);
    }

    #[test]
    fn serialize_block() {
        let block = DisplayBlock::header("Products");
        let serialized = serde_json::to_string(&block).unwrap();
        assert_eq!(
            serialized,
            r#"{"kind":"section_header","title":"Products","icon":"cart"}"#
        );
        let plain = serde_json::to_string(&DisplayBlock::plain("hi")).unwrap();
        assert_eq!(plain, r#"{"kind":"plain_text","text":"hi"}"#);
    }
}
