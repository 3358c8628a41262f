//! Integration tests for turning inline references into event tags.
//!
//! These follow the publishing flow end to end: build content with
//! `nostr:` references, extract tags and relays, sign the event, and check
//! the tags survive verification.

mod helpers;

use std::collections::BTreeSet;

use helpers::{generator_keys, signed_note, tag, REFERENCED_EVENT_ID, RELAY, VECTOR_PUBKEY};
use nostr_id_core::nostr::{
    embeds_to_tags, verify_event, EmbedExtractor, Nip19Entity, MENTION_MARKER,
};
use nostr_id_core::CoreConfig;

#[test]
fn published_nevent_becomes_mention_with_author() {
    let nevent = "nevent1qqsx4e0dsr3srcf0k45pgryhvdgu47wld0f7ylg5lg3tqfs7snmfs9cpzdmhxue69uhkummnw3ezu7psvchx7un8qgst0d8wz3227ehszlhkwtxwdq0n0wh6aet6kxufntxyq9mt9dfhs9srqsqqqqqprz43x5";
    let embeds = embeds_to_tags(&format!("see nostr:{nevent}."));

    assert_eq!(
        embeds.tags,
        vec![tag(&["e", REFERENCED_EVENT_ID, RELAY, MENTION_MARKER, VECTOR_PUBKEY])]
    );
    assert_eq!(embeds.relays, BTreeSet::from([RELAY.to_string()]));
}

#[test]
fn published_naddr_only_adds_relays() {
    let naddr = "naddr1qq8k2m3dwfjkcetpwdjj6v3c9ccqzymhwden5te0dehhxarj9eurqe3wdaexwq3qk76wu9z54an0q9l0vukvu6qlx7a04mjh4vdcnxkvgqtkk26n0qtqxpqqqp65w02s7av";
    let embeds = embeds_to_tags(&format!("Release notes: nostr:{naddr}"));

    assert!(embeds.tags.is_empty());
    assert_eq!(embeds.relays, BTreeSet::from([RELAY.to_string()]));
}

#[test]
fn mixed_references_keep_first_seen_order() {
    let first = Nip19Entity::npub_from_hex(VECTOR_PUBKEY).unwrap();
    let second = Nip19Entity::note_from_hex(REFERENCED_EVENT_ID).unwrap();
    let first_again = Nip19Entity::nprofile_from_hex(VECTOR_PUBKEY, &[RELAY.to_string()]).unwrap();

    let content = format!(
        "{} wrote {} ({})",
        first.to_nostr_uri().unwrap(),
        second.to_nostr_uri().unwrap(),
        first_again.to_nostr_uri().unwrap()
    );
    let embeds = embeds_to_tags(&content);

    assert_eq!(
        embeds.tags,
        vec![
            tag(&["p", VECTOR_PUBKEY, RELAY]),
            tag(&["e", REFERENCED_EVENT_ID, "", MENTION_MARKER]),
        ]
    );
}

#[test]
fn relay_hints_stay_out_of_tags_when_disabled() {
    let config = CoreConfig::from_json(r#"{"embed_relay_hints": false}"#).unwrap();
    let extractor = EmbedExtractor::new(&config);
    let profile = Nip19Entity::nprofile_from_hex(VECTOR_PUBKEY, &[RELAY.to_string()]).unwrap();

    let embeds = extractor.extract(&profile.to_nostr_uri().unwrap());

    assert_eq!(embeds.tags, vec![tag(&["p", VECTOR_PUBKEY])]);
    assert_eq!(embeds.relays, BTreeSet::from([RELAY.to_string()]));
}

#[test]
fn extracted_tags_are_signed_into_event() {
    let keys = generator_keys();
    let mention = Nip19Entity::npub_from_hex(VECTOR_PUBKEY).unwrap();
    let content = format!("thanks {}", mention.to_nostr_uri().unwrap());

    let embeds = embeds_to_tags(&content);
    let event = signed_note(&keys, embeds.tags, &content);

    assert!(verify_event(&event));
    assert_eq!(event.find_tag("p", 0), Some(&[VECTOR_PUBKEY.to_string()][..]));
}

#[test]
fn garbage_references_are_ignored() {
    let content = "nostr:npub1 nostr:nsec1qqqq nostr:note1zzzzzzzz nostr: nostr:NPUB1abc";
    let embeds = embeds_to_tags(content);
    assert!(embeds.is_empty());
}
