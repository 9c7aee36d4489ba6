use crate::models::{CrowdType, Item};

use super::TagLabel;

/// Tag identifiers and their display labels, in settings-panel order.
pub const BUILTIN_TAG_LABELS: [(&str, &str); 6] = [
    ("spicy", "Spicy"),
    ("seafood", "Seafood"),
    ("beef", "Beef"),
    ("pork", "Pork"),
    ("chicken", "Chicken"),
    ("dairy", "Dairy"),
];

pub fn builtin_tag_labels() -> Vec<TagLabel> {
    BUILTIN_TAG_LABELS
        .iter()
        .map(|(tag, label)| TagLabel::new(tag, label))
        .collect()
}

pub fn builtin_items() -> Vec<Item> {
    use CrowdType::{FatLoss, MuscleGain, Normal};

    vec![
        // Everyday staples
        Item::new("Malatang", "🍜", "Chinese hot pot bowl", false, &["spicy"]),
        Item::new("Braised pork trotter rice", "🍱", "Chinese set meal", false, &["pork"])
            .for_crowds(&[Normal, MuscleGain]),
        Item::new("Fried chicken bucket", "🍗", "Western fast food", false, &["dairy"])
            .for_crowds(&[Normal]),
        Item::new("Light salad", "🥗", "Healthy", true, &[]).for_crowds(&[Normal, FatLoss]),
        Item::new("Braised chicken rice", "🥘", "Chinese stew", false, &["chicken"]),
        Item::new("Luosifen snail noodles", "🥢", "Regional snack", false, &["spicy", "seafood"]),
        Item::new("Sushi platter", "🍣", "Japanese & Korean", false, &["seafood"]),
        Item::new("Beef ramen", "🍜", "Noodles", false, &["beef"]),
        Item::new("Italian pizza", "🍕", "Western", false, &["dairy"]).for_crowds(&[Normal]),
        Item::new("Cheeseburger", "🍔", "Western fast food", false, &["beef", "dairy"])
            .for_crowds(&[Normal, MuscleGain]),
        // Chinese set meals: meat + vegetable + staple
        Item::new("Red-braised pork + stir-fried greens + rice", "🍱", "Chinese set meal", false, &["pork"]),
        Item::new("Tomato and egg + pork stir-fry + rice", "🍛", "Chinese set meal", false, &["pork"]),
        Item::new("Yuxiang pork + torn cabbage + rice", "🥡", "Chinese set meal", false, &["pork", "spicy"]),
        Item::new("Taiwanese braised pork rice + greens + egg", "🍲", "Chinese set meal", false, &["pork"]),
        Item::new("Kung pao chicken + three delights + rice", "🍚", "Chinese set meal", false, &["chicken", "spicy"]),
        Item::new("Teriyaki chicken leg + broccoli + rice", "🍱", "Chinese set meal", false, &["chicken"])
            .for_crowds(&[Normal, FatLoss, MuscleGain]),
        Item::new("Pepper pork + mapo tofu + rice", "🍛", "Chinese set meal", false, &["pork", "spicy"]),
        Item::new("Beef brisket stew + sour potato + rice", "🍲", "Chinese set meal", false, &["beef", "spicy"])
            .for_crowds(&[Normal, MuscleGain]),
        Item::new("Cumin lamb + wood-ear salad + noodles", "🍜", "Chinese set meal", false, &["spicy"]),
        Item::new("Salted fish chicken tofu + green beans + rice", "🍱", "Chinese set meal", false, &["chicken", "seafood"]),
        // More variety
        Item::new("Sichuan hot pot", "🍲", "Hot pot", false, &["spicy", "beef", "pork"])
            .for_crowds(&[Normal]),
        Item::new("Shaanxi cold noodles", "🥣", "Regional snack", true, &["spicy"]),
        Item::new("Chaoshan beef offal", "🍢", "Chinese stew", false, &["beef"])
            .for_crowds(&[Normal, MuscleGain]),
        Item::new("Shrimp dumplings + rice rolls", "🥟", "Cantonese", false, &["seafood", "pork"]),
        Item::new("Stone-pot bibimbap", "🥘", "Japanese & Korean", false, &["beef", "spicy"]),
        Item::new("Three delights + rice", "🍚", "Northeastern", true, &[]),
        Item::new("Crossing-the-bridge noodles", "🍜", "Yunnan", false, &["chicken", "pork"]),
        Item::new("Peking duck wraps", "🦆", "Regional snack", false, &["duck"]),
        Item::new("Pineapple fried rice", "🍍", "Southeast Asian", false, &["seafood"]),
        Item::new("Vietnamese pho", "🍲", "Southeast Asian", false, &["beef"])
            .for_crowds(&[Normal, FatLoss, MuscleGain]),
    ]
}
