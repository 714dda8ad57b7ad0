// Field-level edits of a comparison article (the press room form).

use pressroom_canvas::split_lines;

use crate::article::{ComparisonData, ProductDetails};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Subtitle,
    Summary,
    Verdict,
    Author,
    Category,
    Date,
}

impl ArticleField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "title" | "headline" => Some(Self::Title),
            "subtitle" => Some(Self::Subtitle),
            "summary" => Some(Self::Summary),
            "verdict" => Some(Self::Verdict),
            "author" | "byline" => Some(Self::Author),
            "category" => Some(Self::Category),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSlot {
    A,
    B,
}

impl ProductSlot {
    /// Name shown while the product is unnamed.
    pub fn fallback_name(&self) -> &'static str {
        match self {
            ProductSlot::A => "Product A",
            ProductSlot::B => "Product B",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductField {
    Name(String),
    PriceRange(String),
    AffiliateUrl(String),
    /// Empty string clears the image
    ImageUrl(String),
    Rating(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Pros,
    Cons,
}

impl ComparisonData {
    pub fn set_field(&mut self, field: ArticleField, value: impl Into<String>) {
        let value = value.into();
        let target = match field {
            ArticleField::Title => &mut self.title,
            ArticleField::Subtitle => &mut self.subtitle,
            ArticleField::Summary => &mut self.summary,
            ArticleField::Verdict => &mut self.verdict,
            ArticleField::Author => &mut self.author,
            ArticleField::Category => &mut self.category,
            ArticleField::Date => &mut self.date,
        };
        *target = value;
    }

    pub fn product(&self, slot: ProductSlot) -> &ProductDetails {
        match slot {
            ProductSlot::A => &self.product_a,
            ProductSlot::B => &self.product_b,
        }
    }

    pub fn product_mut(&mut self, slot: ProductSlot) -> &mut ProductDetails {
        match slot {
            ProductSlot::A => &mut self.product_a,
            ProductSlot::B => &mut self.product_b,
        }
    }

    pub fn set_product_field(&mut self, slot: ProductSlot, field: ProductField) {
        let product = self.product_mut(slot);
        match field {
            ProductField::Name(v) => product.name = v,
            ProductField::PriceRange(v) => product.price_range = v,
            ProductField::AffiliateUrl(v) => product.affiliate_url = v,
            ProductField::ImageUrl(v) => product.image_url = Some(v),
            ProductField::Rating(v) => product.rating = v.clamp(0.0, 5.0),
        }
    }

    /// Replace one existing list item. Out-of-range indexes are ignored.
    pub fn set_list_item(&mut self, slot: ProductSlot, list: ListKind, index: usize, value: impl Into<String>) {
        if let Some(item) = self.list_mut(slot, list).get_mut(index) {
            *item = value.into();
        }
    }

    /// Replace the whole list from newline-delimited text.
    pub fn set_list_text(&mut self, slot: ProductSlot, list: ListKind, text: &str) {
        *self.list_mut(slot, list) = split_lines(text);
    }

    fn list_mut(&mut self, slot: ProductSlot, list: ListKind) -> &mut Vec<String> {
        let product = self.product_mut(slot);
        match list {
            ListKind::Pros => &mut product.pros,
            ListKind::Cons => &mut product.cons,
        }
    }
}
