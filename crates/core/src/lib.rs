//! Pressroom core: the comparison article, the editorial desk, and the
//! seam to article generators.

pub mod article;
pub mod desk;
pub mod edit;
pub mod generate;
pub mod page;

pub use article::{format_dateline, ComparisonData, GroundingSource, ProductDetails};
pub use desk::{Desk, SubmitTicket, Tab};
pub use edit::{ArticleField, ListKind, ProductField, ProductSlot};
pub use generate::{
    GenerateError, Generated, Generator, FORMAT_FAILURE_MESSAGE, GENERIC_FAILURE_MESSAGE,
};
pub use page::render_page;
