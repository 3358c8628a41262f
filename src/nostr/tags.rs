//! Tag builders and lookups for Nostr events.
//!
//! - `p` tag: referenced pubkey, with optional relay hint
//! - `e` tag: referenced event, with relay hint and `mention` marker (NIP-10)
//! - `t` tag: hashtag / category
//! - `d` tag: identifier of an addressable event
//! - `title`, `alt`: human-readable metadata

/// Marker placed on `e` tags that reference an event inline.
pub const MENTION_MARKER: &str = "mention";

/// Builder for Nostr event tags.
///
/// # Example
///
/// ```
/// use nostr_id_core::nostr::TagBuilder;
///
/// let p_tag = TagBuilder::p_tag("abc123", Some("wss://relay.example.com"));
/// assert_eq!(p_tag, vec!["p", "abc123", "wss://relay.example.com"]);
///
/// let t_tag = TagBuilder::t_tag("nostr");
/// assert_eq!(t_tag, vec!["t", "nostr"]);
/// ```
pub struct TagBuilder;

impl TagBuilder {
    /// Builds a `p` tag referencing a pubkey (hex).
    ///
    /// The relay hint is appended only when present.
    #[must_use]
    pub fn p_tag(pubkey_hex: &str, relay: Option<&str>) -> Vec<String> {
        let mut tag = vec!["p".to_string(), pubkey_hex.to_string()];
        if let Some(relay) = relay {
            tag.push(relay.to_string());
        }
        tag
    }

    /// Builds an `e` tag marking an inline mention of an event.
    ///
    /// The relay slot is always present (empty when unknown) so the marker
    /// stays in position 3; the author pubkey follows when known.
    ///
    /// # Example
    ///
    /// ```
    /// use nostr_id_core::nostr::TagBuilder;
    ///
    /// let tag = TagBuilder::e_mention_tag("ee11", "", None);
    /// assert_eq!(tag, vec!["e", "ee11", "", "mention"]);
    /// ```
    #[must_use]
    pub fn e_mention_tag(event_id_hex: &str, relay: &str, author_hex: Option<&str>) -> Vec<String> {
        let mut tag = vec![
            "e".to_string(),
            event_id_hex.to_string(),
            relay.to_string(),
            MENTION_MARKER.to_string(),
        ];
        if let Some(author) = author_hex {
            tag.push(author.to_string());
        }
        tag
    }

    /// Builds a `t` tag for a hashtag or category.
    #[must_use]
    pub fn t_tag(value: &str) -> Vec<String> {
        vec!["t".to_string(), value.to_string()]
    }

    /// Builds the `d` tag for addressable events.
    ///
    /// Publishing a new event with the same kind, author and `d` value
    /// replaces the previous one.
    #[must_use]
    pub fn d_tag(identifier: &str) -> Vec<String> {
        vec!["d".to_string(), identifier.to_string()]
    }

    /// Builds a `title` tag.
    #[must_use]
    pub fn title_tag(title: &str) -> Vec<String> {
        vec!["title".to_string(), title.to_string()]
    }

    /// Builds the `alt` tag for NIP-31 human-readable descriptions.
    #[must_use]
    pub fn alt_tag(description: &str) -> Vec<String> {
        vec!["alt".to_string(), description.to_string()]
    }
}

/// Returns the fields after the name of the `index`-th tag called `name`.
///
/// # Example
///
/// ```
/// use nostr_id_core::nostr::find_tag;
///
/// let tags = vec![
///     vec!["t".to_string(), "a".to_string()],
///     vec!["d".to_string(), "x".to_string()],
///     vec!["t".to_string(), "b".to_string()],
/// ];
/// assert_eq!(find_tag(&tags, "t", 1), Some(&["b".to_string()][..]));
/// assert_eq!(find_tag(&tags, "t", 2), None);
/// ```
#[must_use]
pub fn find_tag<'a>(tags: &'a [Vec<String>], name: &str, index: usize) -> Option<&'a [String]> {
    tags.iter()
        .filter(|tag| tag.first().map(String::as_str) == Some(name))
        .nth(index)
        .map(|tag| &tag[1..])
}
