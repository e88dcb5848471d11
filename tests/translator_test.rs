//! Translator behaviour over in-memory catalogs

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use assert_matches::assert_matches;
use convo_i18n::i18n::{apply_context, MemoryLoader, Utterance};
use convo_i18n::{Context, I18nError, I18nOptions, LookupFlavor, Translation, Translator};
use helpers::*;
use serde_json::json;

#[test]
fn test_default_locale_resolves_lowercase() {
    let translator = memory_translator(1);
    assert_eq!(translator.resolve_locale(None).unwrap(), "en-us");
}

#[test]
fn test_string_entry_is_templated() {
    let translator = memory_translator(1);
    let context = Context::new().with("name", "Ada");

    assert_eq!(
        translator.translate(None, "greeting", &context).unwrap(),
        Translation::Text("Hello Ada!".to_string())
    );
    assert_eq!(
        translator.translate(Some("fr-FR"), "greeting", &context).unwrap(),
        Translation::Text("Bonjour Ada !".to_string())
    );
}

#[test]
fn test_nested_keys_are_dotted() {
    let translator = memory_translator(1);
    let context = Context::new().with("topic", "dancing");

    assert_eq!(
        translator.translate(None, "menu.help.body", &context).unwrap().to_string(),
        "Ask me about dancing."
    );
    assert_eq!(translator.translate(None, "menu.limit", &context).unwrap(), Translation::Value(json!(10)));
    assert_matches!(
        translator.translate(None, "menu.help", &context),
        Err(I18nError::MissingKey { .. })
    );
}

#[test]
fn test_string_array_is_never_randomized() {
    let lookup = memory_translator(9).bind(None, LookupFlavor::Full).unwrap();
    let expected = Translation::Suggestions(vec!["Yes".into(), "No".into(), "Maybe".into()]);

    for _ in 0..50 {
        assert_eq!(lookup.get("suggestions").unwrap(), expected);
    }
}

#[test]
fn test_variant_list_picks_each_element() {
    let lookup = memory_translator(42).bind(None, LookupFlavor::Full).unwrap();
    let context = Context::new().with("name", "Ada");

    let mut seen = HashSet::new();
    for _ in 0..200 {
        match lookup.call("welcome", &context).unwrap() {
            Translation::Utterance(Utterance { text: Some(text), speech: Some(speech) }) => {
                assert!(speech.contains("Ada"));
                seen.insert(text);
            }
            other => panic!("expected a structured utterance, got {:?}", other),
        }
    }

    let expected: HashSet<String> = ["Hi Ada".to_string(), "Hey Ada".to_string()].into_iter().collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_same_seed_same_picks() {
    let picks = |seed: u64| -> Vec<String> {
        let lookup = memory_translator(seed).bind(None, LookupFlavor::Raw).unwrap();
        (0..30)
            .map(|_| lookup.call("welcome", &Context::new()).unwrap().to_string())
            .collect()
    };

    assert_eq!(picks(5), picks(5));
}

#[test]
fn test_raw_and_all_flavors() {
    let translator = memory_translator(3);
    let context = Context::new().with("name", "Ada");

    let raw = translator.bind(None, LookupFlavor::Raw).unwrap();
    assert_matches!(raw.call("welcome", &context).unwrap(), Translation::Text(text) if text.starts_with("H"));

    let all = translator.bind(None, LookupFlavor::All).unwrap();
    assert_eq!(
        all.call("greeting", &context).unwrap(),
        Translation::Value(json!("Hello {name}!"))
    );
    assert_eq!(all.call("welcome", &context).unwrap(), Translation::Value(english_catalog()["welcome"].clone()));
}

#[test]
fn test_missing_key_error() {
    let translator = memory_translator(1);
    let err = translator.translate(None, "nope", &Context::new()).unwrap_err();

    assert_matches!(err, I18nError::MissingKey { ref key, .. } if key == "nope");
    assert!(err.to_string().contains("greeting"));
    assert!(err.to_string().contains("menu.help.title"));
}

#[test]
fn test_invalid_structured_entry() {
    let translator = memory_translator(1);
    assert_matches!(
        translator.translate(None, "broken", &Context::new()),
        Err(I18nError::InvalidEntry { key }) if key == "broken"
    );
}

#[test]
fn test_first_placeholder_only() {
    let context = Context::new().with("name", "Al");
    assert_eq!(apply_context("Hello {name}, {name}!", &context), "Hello Al, {name}!");
}

#[test]
fn test_default_file_overrides_every_locale() {
    let loader = memory_loader().with_resource("/srv/bot/shared.json", json!({ "greeting": "Howdy {name}" }));
    let mut translator = Translator::new(Arc::new(loader));
    translator
        .configure(
            I18nOptions::default()
                .with_directory(LOCALES_DIR)
                .with_default_file("/srv/bot/shared.json"),
        )
        .unwrap();

    let context = Context::new().with("name", "Ada");
    let french = translator.translate(Some("fr-fr"), "greeting", &context).unwrap();
    let german = translator.translate(Some("de-de"), "greeting", &context).unwrap();

    assert_eq!(french, german);
    assert_eq!(french.to_string(), "Howdy Ada");
    // No japanese catalog exists, the override still serves it
    assert!(translator.translate(Some("ja-jp"), "greeting", &context).is_ok());
}

#[test]
fn test_implicit_default_file_is_not_an_override() {
    let loader = memory_loader().with_resource("/srv/bot/src/locales/index.json", json!({ "greeting": "Index" }));
    let mut translator = Translator::new(Arc::new(loader)).with_project_root("/srv/bot");
    translator
        .configure(I18nOptions::default().with_directory(LOCALES_DIR))
        .unwrap();

    assert_eq!(
        translator.translate(Some("de-DE"), "greeting", &Context::new().with("name", "Ada")).unwrap().to_string(),
        "Hallo Ada!"
    );
}

#[test]
fn test_forced_extension_path() {
    let loader = MemoryLoader::new()
        .with_resource("/i18n/en-us.js", json!({ "greeting": "from js" }))
        .with_resource("/i18n/en-us.json", json!({ "greeting": "from json" }));
    let mut translator = Translator::new(Arc::new(loader));

    translator
        .configure(I18nOptions::default().with_directory("/i18n").with_default_extension("json"))
        .unwrap();
    assert_eq!(translator.translate(None, "greeting", &Context::new()).unwrap().to_string(), "from json");

    translator
        .configure(I18nOptions::default().with_directory("/i18n").with_default_extension("js"))
        .unwrap();
    assert_eq!(translator.translate(None, "greeting", &Context::new()).unwrap().to_string(), "from js");
}

#[test]
fn test_unknown_locale_has_no_catalog() {
    let translator = memory_translator(1);
    assert_matches!(
        translator.load_catalog(Some("pt-BR")),
        Err(I18nError::CatalogNotFound { path }) if path.ends_with("pt-br")
    );
}

#[test]
fn test_all_flavor_returns_catalog_json_untouched() {
    let loader = MemoryLoader::new().with_resource(
        "/srv/bot/locales/en-us.json",
        json!({ "welcome": [{ "text": "Hi {name}", "image": "wave.png" }, 1] }),
    );
    let mut translator = Translator::new(Arc::new(loader)).with_project_root("/srv/bot");
    translator
        .configure(I18nOptions::default().with_directory(LOCALES_DIR))
        .unwrap();

    let all = translator.bind(None, LookupFlavor::All).unwrap();
    assert_eq!(
        all.call("welcome", &Context::new().with("name", "Ada")).unwrap(),
        Translation::Value(json!([{ "text": "Hi {name}", "image": "wave.png" }, 1]))
    );
}
