//! The data held for a session: events, categories and the store that owns
//! them.

pub mod category;
pub mod event;
pub mod store;
pub mod time;
pub mod transaction;

pub use category::{
    builtin_category, Appearance, CategoriesTable, Category, CategoryKey, Color, Icon,
    BUILTIN_CATEGORIES, DEFAULT_APPEARANCE,
};
pub use event::{EventId, EventRecord};
pub use store::{EventStore, StoreAction};
pub use time::YearMonth;
