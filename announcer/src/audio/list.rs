//! English list rendering for clip sequences.
//!
//! Turns `[a, b, c]` into `a, b, and, c` with the pauses a human announcer
//! would leave between items.

use super::item::{AudioItem, clip};

/// How to render a list of clip ids.
///
/// All fields are optional; an absent delay produces a bare clip and an
/// absent prefix leaves the item unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStyle {
    /// Prepended to every item except the last.
    pub prefix: Option<String>,
    /// Prepended to the last item; falls back to `prefix`.
    pub final_prefix: Option<String>,
    /// Conjunction clip placed before the last item.
    pub and_id: String,
    /// Delay before the first item.
    pub first_item_delay: Option<u32>,
    /// Delay before the conjunction.
    pub before_and_delay: Option<u32>,
    /// Delay before the last item.
    pub after_and_delay: Option<u32>,
    /// Delay before each middle item.
    pub before_item_delay: Option<u32>,
}

impl Default for ListStyle {
    fn default() -> Self {
        Self {
            prefix: None,
            final_prefix: None,
            and_id: clip::AND.to_string(),
            first_item_delay: None,
            before_and_delay: None,
            after_and_delay: None,
            before_item_delay: None,
        }
    }
}

impl ListStyle {
    /// Style with the pauses used between calling points.
    ///
    /// `item_delay` precedes each middle item; `and_delay` surrounds the
    /// conjunction.
    pub fn calling_points(item_delay: u32, and_delay: u32) -> Self {
        Self {
            before_item_delay: Some(item_delay),
            before_and_delay: Some(and_delay),
            after_and_delay: Some(and_delay),
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_final_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.final_prefix = Some(prefix.into());
        self
    }

    pub fn with_conjunction(mut self, and_id: impl Into<String>) -> Self {
        self.and_id = and_id.into();
        self
    }

    pub fn with_first_item_delay(mut self, ms: u32) -> Self {
        self.first_item_delay = Some(ms);
        self
    }

    pub fn with_before_and_delay(mut self, ms: u32) -> Self {
        self.before_and_delay = Some(ms);
        self
    }

    pub fn with_before_item_delay(mut self, ms: u32) -> Self {
        self.before_item_delay = Some(ms);
        self
    }

    fn item(&self, item: &str) -> String {
        format!("{}{}", self.prefix.as_deref().unwrap_or(""), item)
    }

    fn final_item(&self, item: &str) -> String {
        let prefix = self
            .final_prefix
            .as_deref()
            .or(self.prefix.as_deref())
            .unwrap_or("");
        format!("{prefix}{item}")
    }
}

/// Render `items` as a spoken English list.
///
/// # Examples
///
/// ```
/// use station_announcer::audio::{ListStyle, pluralise};
///
/// let ids = |items: Vec<station_announcer::audio::AudioItem>| {
///     items.iter().map(|i| i.id().to_string()).collect::<Vec<_>>()
/// };
///
/// let style = ListStyle::default()
///     .with_prefix("station.m.")
///     .with_final_prefix("station.e.");
///
/// assert!(pluralise(&[] as &[&str], &style).is_empty());
/// assert_eq!(ids(pluralise(&["LIT"], &style)), ["station.e.LIT"]);
/// assert_eq!(
///     ids(pluralise(&["HSK", "PRP", "LIT"], &style)),
///     ["station.m.HSK", "station.m.PRP", "m.and", "station.e.LIT"]
/// );
/// ```
pub fn pluralise<S: AsRef<str>>(items: &[S], style: &ListStyle) -> Vec<AudioItem> {
    match items {
        [] => Vec::new(),
        [only] => vec![AudioItem::with_delay(
            style.final_item(only.as_ref()),
            style.first_item_delay,
        )],
        [first, middle @ .., last] => {
            let mut files = Vec::with_capacity(items.len() + 1);

            files.push(AudioItem::with_delay(
                style.item(first.as_ref()),
                style.first_item_delay,
            ));
            files.extend(middle.iter().map(|item| {
                AudioItem::with_delay(style.item(item.as_ref()), style.before_item_delay)
            }));
            files.push(AudioItem::with_delay(
                style.and_id.clone(),
                style.before_and_delay,
            ));
            files.push(AudioItem::with_delay(
                style.final_item(last.as_ref()),
                style.after_and_delay,
            ));

            files
        }
    }
}
