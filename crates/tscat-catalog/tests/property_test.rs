//! Property-based tests for parsing, writing and lookup.

use proptest::prelude::*;
use std::collections::BTreeMap;
use tscat_catalog::{parse_str, Catalog, Message, MessageStatus, Resolution};
use tscat_common::test_utils::property_testing::{
    comment_strategy, context_name_strategy, language_strategy, text_strategy,
};
use tscat_common::LanguageCode;

fn status_strategy() -> impl Strategy<Value = MessageStatus> {
    prop_oneof![
        3 => Just(MessageStatus::Final),
        1 => Just(MessageStatus::Unfinished),
        1 => Just(MessageStatus::Obsolete),
    ]
}

fn message_strategy() -> impl Strategy<Value = (String, Option<String>, MessageStatus, Vec<String>)> {
    (
        text_strategy(),
        comment_strategy(),
        status_strategy(),
        prop::collection::vec(text_strategy(), 0..4),
    )
}

type Key = (String, String, String);

/// Builds a catalog, keeping the first message of every duplicate key.
fn catalog_strategy() -> impl Strategy<Value = (Catalog, BTreeMap<Key, Message>)> {
    (
        language_strategy(),
        prop::collection::vec((context_name_strategy(), message_strategy()), 0..24),
    )
        .prop_map(|(language, entries)| {
            let mut builder = Catalog::builder(LanguageCode::parse(&language).unwrap());
            let mut expected = BTreeMap::new();

            for (context, (source, comment, status, forms)) in entries {
                let key = (context.clone(), source.clone(), comment.clone().unwrap_or_default());
                if expected.contains_key(&key) {
                    continue;
                }
                // Zero forms means a single translation.
                let message = match forms.as_slice() {
                    [] => Message::new(source.clone(), format!("{source} (hu)")),
                    _ => Message::plural(source, forms),
                }
                .comment(comment)
                .status(status);

                builder.add_message(&context, message.clone()).unwrap();
                expected.insert(key, message);
            }

            (builder.build(), expected)
        })
}

proptest! {
    #[test]
    fn test_property_round_trip((catalog, _) in catalog_strategy()) {
        let written = catalog.to_ts_string().unwrap();
        let reparsed = parse_str(&written).unwrap();
        prop_assert_eq!(&reparsed, &catalog);
        prop_assert_eq!(reparsed.to_ts_string().unwrap(), written);
    }

    #[test]
    fn test_property_keys_unique_and_owned((catalog, expected) in catalog_strategy()) {
        let mut seen = BTreeMap::new();
        for (context, message) in catalog.messages() {
            let key = (
                context.name().to_string(),
                message.source_text().to_string(),
                message.comment_or_empty().to_string(),
            );
            prop_assert!(seen.insert(key, message.clone()).is_none());
        }
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn test_property_resolve_idempotent((catalog, expected) in catalog_strategy()) {
        for (context, source, comment) in expected.keys() {
            let comment = Some(comment.as_str());
            let first = catalog.resolve(context, source, comment);
            let second = catalog.resolve(context, source, comment);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn test_property_obsolete_never_returned((catalog, expected) in catalog_strategy()) {
        for ((context, source, comment), message) in &expected {
            if message.message_status() != MessageStatus::Obsolete {
                continue;
            }
            let resolution = catalog.resolve(context, source, Some(comment)).unwrap();
            prop_assert_eq!(resolution, Resolution::Fallback(source.as_str()));
            for count in [0, 1, 2, 5] {
                let plural = catalog
                    .resolve_plural(context, source, count, Some(comment))
                    .unwrap();
                prop_assert_eq!(plural, Resolution::Fallback(source.as_str()));
            }
        }
    }

    #[test]
    fn test_property_unmatched_returns_source(
        (catalog, _) in catalog_strategy(),
        context in context_name_strategy(),
        source in text_strategy(),
    ) {
        // No generated source text contains a tab.
        let source = format!("{source}\t");
        let resolution = catalog.resolve(&context, &source, None).unwrap();
        prop_assert_eq!(resolution, Resolution::Fallback(source.as_str()));
        prop_assert_eq!(resolution.as_str().as_bytes(), source.as_bytes());
    }
}
