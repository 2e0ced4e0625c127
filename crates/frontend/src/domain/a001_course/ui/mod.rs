pub mod card;
pub mod category_page;
