use lunch_picker_rs::catalog::Catalog;
use lunch_picker_rs::engine::{eligible_count, filter, is_eligible};
use lunch_picker_rs::models::{CrowdType, Preferences};

#[test]
fn test_builtin_catalog_shape() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.len(), 30);
    assert_eq!(catalog.tag_labels().len(), 6);
    assert!(catalog.items().iter().all(|i| !i.name.trim().is_empty()));
}

#[test]
fn test_no_preferences_keeps_everything() {
    let catalog = Catalog::builtin();
    let eligible = filter(catalog.items(), &Preferences::default(), None);
    assert_eq!(eligible.len(), catalog.len());
}

#[test]
fn test_filter_preserves_catalog_order() {
    let catalog = Catalog::builtin();
    let prefs = Preferences::new(false, &["spicy"]);
    let eligible = filter(catalog.items(), &prefs, None);

    let expected: Vec<&str> = catalog
        .items()
        .iter()
        .filter(|i| !i.has_tag("spicy"))
        .map(|i| i.name.as_str())
        .collect();
    let actual: Vec<&str> = eligible.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_every_eligible_item_respects_every_exclusion() {
    let catalog = Catalog::builtin();
    let combos: [&[&str]; 4] = [&["spicy"], &["pork", "beef"], &["seafood", "dairy"], &[]];

    for only_vegetarian in [false, true] {
        for tags in combos {
            let prefs = Preferences::new(only_vegetarian, tags);
            for item in filter(catalog.items(), &prefs, None) {
                if only_vegetarian {
                    assert!(item.is_vegetarian, "{} is not vegetarian", item.name);
                }
                for tag in tags {
                    assert!(!item.has_tag(tag), "{} has excluded tag {}", item.name, tag);
                }
            }
        }
    }
}

#[test]
fn test_excluded_items_are_exactly_the_rejected_ones() {
    let catalog = Catalog::builtin();
    let prefs = Preferences::new(true, &["dairy"]);
    let kept = eligible_count(catalog.items(), &prefs, None);
    let rejected = catalog
        .items()
        .iter()
        .filter(|i| !is_eligible(i, &prefs, None))
        .count();
    assert_eq!(kept + rejected, catalog.len());
}

#[test]
fn test_crowd_narrows_but_unrestricted_items_stay() {
    let catalog = Catalog::builtin();
    let prefs = Preferences::default();
    for crowd in CrowdType::ALL {
        let eligible = filter(catalog.items(), &prefs, Some(crowd));
        assert!(!eligible.is_empty());
        assert!(eligible.len() <= catalog.len());
        assert!(eligible.iter().all(|i| i.suits(crowd)));
        assert!(
            catalog
                .items()
                .iter()
                .filter(|i| i.suitable_for.is_none())
                .all(|i| eligible.iter().any(|e| e.name == i.name))
        );
    }
}

#[test]
fn test_excluding_every_tag_still_leaves_untagged_items() {
    let catalog = Catalog::builtin();
    let tags = catalog.tag_vocabulary();
    let prefs = Preferences::new(false, &tags);
    let eligible = filter(catalog.items(), &prefs, None);
    assert!(eligible.iter().all(|i| i.tags.is_empty()));
}
