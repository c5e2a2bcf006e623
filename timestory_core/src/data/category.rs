use std::{borrow::Cow, fmt};

use log::info;

use crate::error::{TimestoryError, TimestoryResult};

/// The unique slug under which a category is stored, e.g. "work" or
/// "road-trip".
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct CategoryKey(Cow<'static, str>);

impl CategoryKey {
    pub const fn from_static(key: &'static str) -> Self {
        CategoryKey(Cow::Borrowed(key))
    }

    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(Cow::Owned(key.into()))
    }

    /// Derives the key for a category from its label: the label is trimmed
    /// and lowercased, and every run of whitespace becomes a single `-`.
    /// Returns `None` if the label is blank.
    ///
    /// Different labels can derive the same key ("Road Trip" and "road
    /// trip"); `CategoriesTable::insert` rejects the second one.
    pub fn from_label(label: &str) -> Option<Self> {
        let words: Vec<_> = label.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        Some(CategoryKey::new(words.join("-").to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        CategoryKey::new(key)
    }
}

/// A CSS color, e.g. "#3b82f6".
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const fn from_static(color: &'static str) -> Self {
        Color(Cow::Borrowed(color))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The glyph shown on pins and in the category dropdown.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Icon(Cow<'static, str>);

impl Icon {
    pub const fn from_static(icon: &'static str) -> Self {
        Icon(Cow::Borrowed(icon))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How a category is drawn.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Appearance {
    pub color: Color,
    pub icon: Icon,
}

pub const DEFAULT_COLOR: Color = Color::from_static("#64748b");
pub const DEFAULT_ICON: Icon = Icon::from_static("📝");
pub const DEFAULT_APPEARANCE: Appearance = Appearance { color: DEFAULT_COLOR, icon: DEFAULT_ICON };

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Category {
    pub key: CategoryKey,
    /// A short name for the category, e.g. "Work"
    pub label: Cow<'static, str>,
    pub color: Color,
    pub icon: Icon,
}

impl Category {
    /// Creates a user-defined category from a label typed by the user. The
    /// key is derived from the label and the category gets the default color
    /// and icon. Returns `None` if the label is blank.
    pub fn custom(label: &str) -> Option<Self> {
        let key = CategoryKey::from_label(label)?;
        Some(Category {
            key,
            label: Cow::Owned(label.trim().to_string()),
            color: DEFAULT_COLOR,
            icon: DEFAULT_ICON,
        })
    }

    pub fn appearance(&self) -> Appearance {
        Appearance { color: self.color.clone(), icon: self.icon.clone() }
    }

    // surrounding whitespace never counts, as labels are stored trimmed
    fn label_matches(&self, text: &str) -> bool {
        self.label.to_lowercase() == text.trim().to_lowercase()
    }
}

const fn builtin(
    key: &'static str,
    label: &'static str,
    color: &'static str,
    icon: &'static str,
) -> Category {
    Category {
        key: CategoryKey::from_static(key),
        label: Cow::Borrowed(label),
        color: Color::from_static(color),
        icon: Icon::from_static(icon),
    }
}

pub const WORK: Category = builtin("work", "Work", "#3b82f6", "💼");
pub const PERSONAL: Category = builtin("personal", "Personal", "#10b981", "👤");
pub const HOLIDAY: Category = builtin("holiday", "Holiday", "#f59e0b", "🎉");
pub const MILESTONE: Category = builtin("milestone", "Milestone", "#8b5cf6", "🏆");

pub static BUILTIN_CATEGORIES: [Category; 4] = [WORK, PERSONAL, HOLIDAY, MILESTONE];

pub fn builtin_category(key: &CategoryKey) -> Option<&'static Category> {
    BUILTIN_CATEGORIES.iter().find(|category| &category.key == key)
}

/// The built-in categories together with the categories that the user has
/// created. Custom categories keep their creation order and are never
/// removed by the user.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct CategoriesTable {
    custom: Vec<Category>,
}

impl CategoriesTable {
    pub fn new() -> Self {
        CategoriesTable::default()
    }

    /// Adds a custom category. Fails if the label is blank or if the key is
    /// already used by a built-in or custom category.
    pub fn insert(&mut self, category: Category) -> TimestoryResult<()> {
        if category.label.trim().is_empty() {
            return Err(TimestoryError::EmptyCategoryLabel);
        }
        if let Some(existing) = self.get(&category.key) {
            return Err(TimestoryError::CategoryKeyCollision {
                key: category.key.clone(),
                existing: existing.label.to_string(),
                requested: category.label.to_string(),
            });
        }
        info!("creating custom category \"{}\" ({})", category.label, category.key);
        self.custom.push(category);
        Ok(())
    }

    /// Only used to undo an insertion.
    pub(crate) fn remove_custom(&mut self, key: &CategoryKey) -> Option<Category> {
        let index = self.custom.iter().position(|category| &category.key == key)?;
        Some(self.custom.remove(index))
    }

    pub fn custom(&self) -> &[Category] {
        &self.custom
    }

    /// Looks up a category by key, built-ins first.
    pub fn get(&self, key: &CategoryKey) -> Option<&Category> {
        builtin_category(key).or_else(|| self.custom.iter().find(|category| &category.key == key))
    }

    pub fn contains(&self, key: &CategoryKey) -> bool {
        self.get(key).is_some()
    }

    /// All categories, built-ins followed by custom categories in creation
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        BUILTIN_CATEGORIES.iter().chain(self.custom.iter())
    }

    /// Returns the category whose label equals `text`, ignoring case.
    pub fn find_by_label(&self, text: &str) -> Option<&Category> {
        self.iter().find(|category| category.label_matches(text))
    }

    /// Returns the categories whose label contains `text`, ignoring case. An
    /// empty `text` matches every category.
    pub fn search<'s>(&'s self, text: &str) -> impl Iterator<Item = &'s Category> + 's {
        let needle = text.to_lowercase();
        self.iter().filter(move |category| category.label.to_lowercase().contains(&needle))
    }

    /// Resolves how events of the given category are drawn. The built-in
    /// table is consulted first, then the custom categories, and if the key
    /// is in neither, the default appearance is used.
    pub fn resolve_appearance(&self, key: &CategoryKey) -> Appearance {
        if let Some(category) = builtin_category(key) {
            return category.appearance();
        }
        if let Some(category) = self.custom.iter().find(|category| &category.key == key) {
            return category.appearance();
        }
        DEFAULT_APPEARANCE
    }
}
