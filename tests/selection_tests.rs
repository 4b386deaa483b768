// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use proptest::prelude::*;

use languagemodels::error::LmError;
use languagemodels::models::{
    select, select_name, Architecture, Catalog, LicenseFilter, ModelDescriptor, Purpose,
};

fn filter(pattern: &str) -> Option<LicenseFilter> {
    LicenseFilter::new(pattern).unwrap()
}

fn rank(catalog: &Catalog, name: &str) -> usize {
    catalog.iter().position(|m| m.name == name).unwrap()
}

// ==================== Fixed scenarios ====================

#[test]
fn test_instruct_by_budget() {
    let catalog = Catalog::builtin();
    let cases = [
        (0.40, "LaMini-Flan-T5-248M-ct2-int8"),
        (1.0, "LaMini-Flan-T5-783M-ct2-int8"),
        (0.1, "LaMini-Flan-T5-77M-ct2-int8"),
        (4.0, "flan-alpaca-xl-ct2-int8"),
    ];
    for (budget, expected) in cases {
        let name = select_name(&catalog, Purpose::Instruct, budget, None, None).unwrap();
        assert_eq!(name, expected, "budget {}", budget);
    }
}

#[test]
fn test_footprint_equal_to_budget_is_rejected() {
    let catalog = Catalog::builtin();
    let name = select_name(&catalog, Purpose::Instruct, 3.0, None, None).unwrap();
    assert_eq!(name, "LaMini-Flan-T5-783M-ct2-int8");
}

#[test]
fn test_license_prefix_filters() {
    let catalog = Catalog::builtin();

    let apache = filter("apache*");
    let name = select_name(&catalog, Purpose::Instruct, 1.0, apache.as_ref(), None).unwrap();
    assert_eq!(name, "flan-t5-large-ct2-int8");

    let mit = filter("mit");
    let name = select_name(&catalog, Purpose::Instruct, 1.0, mit.as_ref(), None).unwrap();
    assert_eq!(name, "LaMini-GPT-774M-ct2-int8");

    // Anchored at the start only: "pache" does not match "apache-2.0"
    let inner = filter("pache");
    let err = select(&catalog, Purpose::Instruct, 1.0, inner.as_ref()).unwrap_err();
    assert!(matches!(err, LmError::NoModelFound { .. }));
}

#[test]
fn test_embedding_ignores_budget_beyond_minimum() {
    let catalog = Catalog::builtin();
    for budget in [0.03, 0.4, 16.0] {
        let model = select(&catalog, Purpose::Embedding, budget, None).unwrap();
        assert_eq!(model.name, "all-MiniLM-L6-v2-ct2-int8");
    }
    assert!(select(&catalog, Purpose::Embedding, 0.02, None).is_err());
}

#[test]
fn test_no_model_found_carries_context() {
    let catalog = Catalog::builtin();
    let gpl = filter("gpl");
    match select(&catalog, Purpose::Instruct, 0.4, gpl.as_ref()) {
        Err(LmError::NoModelFound {
            purpose,
            budget,
            license,
        }) => {
            assert_eq!(purpose, Purpose::Instruct);
            assert_eq!(budget, 0.4);
            assert_eq!(license.as_deref(), Some("gpl"));
        }
        other => panic!("expected NoModelFound, got {:?}", other),
    }
}

#[test]
fn test_pinned_instruct_model_skips_catalog() {
    let catalog = Catalog::builtin();
    let name = select_name(
        &catalog,
        Purpose::Instruct,
        0.0,
        None,
        Some("custom-model-ct2-int8"),
    )
    .unwrap();
    assert_eq!(name, "custom-model-ct2-int8");

    // Pinning only applies to instruct
    let name = select_name(
        &catalog,
        Purpose::Embedding,
        0.4,
        None,
        Some("custom-model-ct2-int8"),
    )
    .unwrap();
    assert_eq!(name, "all-MiniLM-L6-v2-ct2-int8");
}

#[test]
fn test_invalid_license_pattern() {
    let err = LicenseFilter::new("(apache").unwrap_err();
    assert!(matches!(err, LmError::InvalidLicensePattern { .. }));
    assert!(LicenseFilter::new("").unwrap().is_none());
}

// ==================== Custom catalogs ====================

#[test]
fn test_catalog_from_toml_keeps_order() {
    let catalog = Catalog::from_toml_str(
        r#"
[[models]]
name = "big"
purpose = "instruct"
params = 2e9
architecture = "decoder-only-transformer"
license = "mit"

[[models]]
name = "small"
purpose = "instruct"
params = 1e8
architecture = "encoder-decoder-transformer"
license = "apache-2.0"
"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(
        select_name(&catalog, Purpose::Instruct, 4.0, None, None).unwrap(),
        "big"
    );
    assert_eq!(
        select_name(&catalog, Purpose::Instruct, 1.0, None, None).unwrap(),
        "small"
    );
}

#[test]
fn test_catalog_rejects_duplicate_names() {
    let model = ModelDescriptor::new(
        "dup",
        Purpose::Instruct,
        1e8,
        Architecture::DecoderOnlyTransformer,
        "mit",
    );
    let err = Catalog::from_descriptors(vec![model.clone(), model]).unwrap_err();
    assert!(matches!(err, LmError::Catalog(_)));
}

#[test]
fn test_catalog_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r#"
[[models]]
name = "embedder"
purpose = "embedding"
params = 1e7
architecture = "encoder-only-transformer"
license = "apache-2.0"
"#,
    )
    .unwrap();

    let catalog = Catalog::load_from_file(&path).unwrap();
    let model = select(&catalog, Purpose::Embedding, 0.4, None).unwrap();
    assert_eq!(model.name, "embedder");
}

// ==================== Properties ====================

fn purpose_strategy() -> impl Strategy<Value = Purpose> {
    prop_oneof![Just(Purpose::Instruct), Just(Purpose::Embedding)]
}

fn license_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("apache"), Just("mit"), Just("cc"), Just("gpl")]
}

proptest! {
    #[test]
    fn prop_selection_is_deterministic(
        purpose in purpose_strategy(),
        budget in 0.0f64..20.0,
        license in license_strategy(),
    ) {
        let catalog = Catalog::builtin();
        let filter = filter(license);
        let first = select(&catalog, purpose, budget, filter.as_ref()).map(|m| m.name.clone()).ok();
        let second = select(&catalog, purpose, budget, filter.as_ref()).map(|m| m.name.clone()).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_selection_is_first_eligible(
        purpose in purpose_strategy(),
        budget in 0.0f64..20.0,
        license in license_strategy(),
    ) {
        let catalog = Catalog::builtin();
        let filter = filter(license);
        let eligible = |m: &ModelDescriptor| {
            m.purpose == purpose
                && m.params / 1e9 < budget
                && filter.as_ref().map_or(true, |f| f.matches(&m.license))
        };

        match select(&catalog, purpose, budget, filter.as_ref()) {
            Ok(model) => {
                prop_assert!(eligible(model));
                let index = rank(&catalog, &model.name);
                prop_assert!(!catalog.iter().take(index).any(|m| eligible(m)));
            }
            Err(_) => prop_assert!(!catalog.iter().any(|m| eligible(m))),
        }
    }

    #[test]
    fn prop_larger_budget_never_picks_fewer_params(
        purpose in purpose_strategy(),
        low in 0.0f64..10.0,
        extra in 0.0f64..10.0,
        license in license_strategy(),
    ) {
        let catalog = Catalog::builtin();
        let filter = filter(license);
        let high = low + extra;
        if let Ok(small) = select(&catalog, purpose, low, filter.as_ref()) {
            let large = select(&catalog, purpose, high, filter.as_ref()).unwrap();
            prop_assert!(large.params >= small.params);
            prop_assert!(rank(&catalog, &large.name) <= rank(&catalog, &small.name));
        }
    }
}
