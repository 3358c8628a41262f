//! Inline `nostr:` references in free text (NIP-21/NIP-27).
//!
//! Content is scanned for `nostr:<bech32>` candidates. Each one that decodes
//! to an entity becomes a tag on the event that carries the content:
//!
//! | Entity     | Tag                                             |
//! |------------|-------------------------------------------------|
//! | `npub`     | `["p", pubkey]`                                 |
//! | `nprofile` | `["p", pubkey, relay?]`                         |
//! | `note`     | `["e", id, "", "mention"]`                      |
//! | `nevent`   | `["e", id, relay or "", "mention", author?]`    |
//! | `naddr`    | none; only its relays are collected             |
//!
//! Candidates that fail to decode are skipped: prose can contain text that
//! happens to match the pattern.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use indexmap::map::Entry;
use indexmap::IndexMap;
use regex::Regex;
use tracing::debug;

use crate::config::CoreConfig;
use crate::nostr::nip19::Nip19Entity;
use crate::nostr::tags::TagBuilder;

/// Matches `nostr:` followed by a candidate bech32 string.
pub static EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"nostr:([0-9a-z]+)").expect("embed pattern is valid"));

/// Which tag an embedded entity contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `p` tag (`npub`, `nprofile`)
    Pubkey,
    /// `e` tag (`note`, `nevent`)
    Event,
}

impl TagKind {
    /// The tag name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pubkey => "p",
            Self::Event => "e",
        }
    }

    /// The kind whose tag is named `name`, if any.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Pubkey, Self::Event]
            .into_iter()
            .find(|kind| kind.name() == name)
    }
}

/// Tags and relay hints extracted from content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embeds {
    /// One tag per referenced pubkey or event, in first-seen order.
    pub tags: Vec<Vec<String>>,
    /// Every relay hint seen in any decoded reference.
    pub relays: BTreeSet<String>,
}

impl Embeds {
    /// Returns true if nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.relays.is_empty()
    }
}

/// Scans content for inline references.
///
/// # Example
///
/// ```
/// use nostr_id_core::nostr::EmbedExtractor;
/// use nostr_id_core::CoreConfig;
///
/// let extractor = EmbedExtractor::new(&CoreConfig::default());
/// let embeds = extractor.extract(
///     "thanks nostr:npub1k76wu9z54an0q9l0vukvu6qlx7a04mjh4vdcnxkvgqtkk26n0qtqu0nnlk!",
/// );
/// assert_eq!(embeds.tags.len(), 1);
/// assert_eq!(embeds.tags[0][0], "p");
/// ```
#[derive(Debug, Clone)]
pub struct EmbedExtractor {
    max_length: usize,
    relay_hints: bool,
}

impl Default for EmbedExtractor {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}

impl EmbedExtractor {
    /// Creates an extractor using the limits in `config`.
    #[must_use]
    pub const fn new(config: &CoreConfig) -> Self {
        Self {
            max_length: config.max_bech32_length,
            relay_hints: config.embed_relay_hints,
        }
    }

    /// Extracts tags and relay hints from `content`.
    #[must_use]
    pub fn extract(&self, content: &str) -> Embeds {
        let mut found = Accumulator::default();

        for captures in EMBED_RE.captures_iter(content) {
            let Some(candidate) = captures.get(1).map(|m| m.as_str()) else {
                continue;
            };
            match Nip19Entity::decode_with_limit(candidate, self.max_length) {
                Ok(entity) => self.collect(&mut found, &entity),
                Err(error) => debug!(candidate, %error, "skipping undecodable embed"),
            }
        }

        found.finish()
    }

    fn collect(&self, found: &mut Accumulator, entity: &Nip19Entity) {
        let hint = |relays: &[String]| {
            if self.relay_hints {
                relays.first().cloned()
            } else {
                None
            }
        };

        match entity {
            Nip19Entity::Pubkey(pubkey) => {
                found.offer(TagBuilder::p_tag(&hex::encode(pubkey), None));
            }
            Nip19Entity::Profile(profile) => {
                let relay = hint(&profile.relays);
                found.offer(TagBuilder::p_tag(
                    &hex::encode(profile.pubkey),
                    relay.as_deref(),
                ));
            }
            Nip19Entity::Note(id) => {
                found.offer(TagBuilder::e_mention_tag(&hex::encode(id), "", None));
            }
            Nip19Entity::Event(event) => {
                let relay = hint(&event.relays).unwrap_or_default();
                let author = event.author.map(hex::encode);
                found.offer(TagBuilder::e_mention_tag(
                    &hex::encode(event.id),
                    &relay,
                    author.as_deref(),
                ));
            }
            Nip19Entity::Address(_) => {}
        }

        found.relays.extend(entity.relays().iter().cloned());
    }
}

/// Extracts embeds from `content` with the default configuration.
#[must_use]
pub fn embeds_to_tags(content: &str) -> Embeds {
    EmbedExtractor::default().extract(content)
}

/// Tags keyed by `(kind, id)`, merged so that an entry never loses detail.
/// The kind is read back from the tag name, so key and tag always agree.
#[derive(Default)]
struct Accumulator {
    tags: IndexMap<(TagKind, String), Vec<String>>,
    relays: BTreeSet<String>,
}

impl Accumulator {
    fn offer(&mut self, tag: Vec<String>) {
        let kind = tag.first().and_then(|name| TagKind::from_name(name));
        let (Some(kind), Some(id)) = (kind, tag.get(1).cloned()) else {
            return;
        };
        match self.tags.entry((kind, id)) {
            Entry::Vacant(slot) => {
                slot.insert(tag);
            }
            Entry::Occupied(mut slot) => {
                if supersedes(&tag, slot.get()) {
                    slot.insert(tag);
                }
            }
        }
    }

    fn finish(self) -> Embeds {
        Embeds {
            tags: self.tags.into_values().collect(),
            relays: self.relays,
        }
    }
}

/// A tag with a relay hint always wins; otherwise only a strictly richer
/// tag replaces the current one.
fn supersedes(incoming: &[String], current: &[String]) -> bool {
    has_relay(incoming) || rank(incoming) > rank(current)
}

fn has_relay(tag: &[String]) -> bool {
    tag.get(2).is_some_and(|relay| !relay.is_empty())
}

fn rank(tag: &[String]) -> (bool, usize) {
    (has_relay(tag), tag.len())
}
