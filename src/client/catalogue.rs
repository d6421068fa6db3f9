//! The closed lists of categories, sub-categories and people that the client form offers.
//!
//! These lists are a convenience for the form only, the API accepts any
//! category or payer.

use serde::Serialize;

/// The people who pay for things when no list is configured.
pub const DEFAULT_SPENDERS: &[&str] = &["Rajkumar", "Ramesh"];

/// The categories and their sub-categories, in the order the form lists them.
const CATEGORIES: &[(&str, &[&str])] = &[
    ("Food", &["Breakfast", "Lunch", "Dinner", "Snacks", "Drinks"]),
    (
        "Transport",
        &["Fuel", "Taxi", "Bus", "Train", "Flight", "Tolls & Parking"],
    ),
    ("Accommodation", &["Hotel", "Homestay", "Camping"]),
    ("Entertainments", &["Tickets", "Activities", "Shopping"]),
    ("Others", &["Miscellaneous", "Medical", "Tips"]),
];

/// A category and the sub-categories that may be chosen with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptions {
    /// The category name.
    pub name: String,
    /// The sub-categories, the first one is the default.
    pub sub_categories: Vec<String>,
}

/// The choices offered by the client's expense form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalogue {
    /// The categories, the first one is the default.
    pub categories: Vec<CategoryOptions>,
    /// The people who may have paid for an expense.
    pub spenders: Vec<String>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::new(DEFAULT_SPENDERS)
    }
}

impl Catalogue {
    /// Create the catalogue with the built-in categories and the given `spenders`.
    ///
    /// Names are trimmed, blank names and duplicates are dropped. If no names
    /// are left, [DEFAULT_SPENDERS] is used.
    pub fn new<S: AsRef<str>>(spenders: &[S]) -> Self {
        let mut names: Vec<String> = Vec::new();

        for name in spenders {
            let name = name.as_ref().trim();

            if !name.is_empty() && !names.iter().any(|existing| existing == name) {
                names.push(name.to_owned());
            }
        }

        if names.is_empty() {
            names = DEFAULT_SPENDERS.iter().map(|name| name.to_string()).collect();
        }

        Self {
            categories: CATEGORIES
                .iter()
                .map(|(name, sub_categories)| CategoryOptions {
                    name: name.to_string(),
                    sub_categories: sub_categories.iter().map(|sub| sub.to_string()).collect(),
                })
                .collect(),
            spenders: names,
        }
    }

    /// The category selected when the form is empty.
    pub fn default_category(&self) -> &str {
        self.categories
            .first()
            .map(|category| category.name.as_str())
            .unwrap_or_default()
    }

    /// The sub-categories allowed for `category`, empty for an unknown category.
    pub fn sub_categories(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|options| options.name == category)
            .map(|options| options.sub_categories.as_slice())
            .unwrap_or_default()
    }

    /// The sub-category selected after `category` is chosen in the form.
    pub fn default_sub_category(&self, category: &str) -> Option<&str> {
        self.sub_categories(category).first().map(String::as_str)
    }
}
