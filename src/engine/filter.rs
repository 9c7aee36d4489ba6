use crate::models::{CrowdType, Item, Preferences};

/// Whether a single item passes the crowd, vegetarian and tag predicates.
#[inline]
pub fn is_eligible(item: &Item, preferences: &Preferences, crowd: Option<CrowdType>) -> bool {
    let crowd_ok = crowd.map(|c| item.suits(c)).unwrap_or(true);
    let vegetarian_ok = !preferences.only_vegetarian || item.is_vegetarian;
    let tags_ok = !item.tags.iter().any(|t| preferences.is_excluded(t));

    crowd_ok && vegetarian_ok && tags_ok
}

/// Reduce the pool to eligible items.
///
/// Pure and order-preserving: the result follows catalog order.
pub fn filter<'a>(
    pool: &'a [Item],
    preferences: &Preferences,
    crowd: Option<CrowdType>,
) -> Vec<&'a Item> {
    pool.iter()
        .filter(|item| is_eligible(item, preferences, crowd))
        .collect()
}

/// Size of the eligible set without materializing it.
pub fn eligible_count(pool: &[Item], preferences: &Preferences, crowd: Option<CrowdType>) -> usize {
    pool.iter()
        .filter(|item| is_eligible(item, preferences, crowd))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> Vec<Item> {
        vec![
            Item::new("A", "🥗", "Healthy", true, &[]),
            Item::new("B", "🌶️", "Spicy", false, &["spicy"]),
            Item::new("C", "🍚", "Plain", false, &[]),
            Item::new("D", "🥩", "Grill", false, &["beef"]).for_crowds(&[CrowdType::MuscleGain]),
        ]
    }

    #[test]
    fn test_default_preferences_keep_everything() {
        let pool = pool();
        let eligible = filter(&pool, &Preferences::default(), None);
        assert_eq!(eligible.len(), 4);
    }

    #[test]
    fn test_only_vegetarian() {
        let pool = pool();
        let prefs = Preferences::new(true, &[]);
        let names: Vec<&str> = filter(&pool, &prefs, None).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_excluded_tags() {
        let pool = pool();
        let prefs = Preferences::new(false, &["spicy", "beef"]);
        let names: Vec<&str> = filter(&pool, &prefs, None).iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_crowd_type() {
        let pool = pool();
        let prefs = Preferences::default();

        let fat_loss = filter(&pool, &prefs, Some(CrowdType::FatLoss));
        assert!(fat_loss.iter().all(|i| i.name != "D"));

        let muscle = filter(&pool, &prefs, Some(CrowdType::MuscleGain));
        assert_eq!(muscle.len(), 4);
    }

    #[test]
    fn test_eligible_count_matches_filter() {
        let pool = pool();
        let prefs = Preferences::new(false, &["spicy"]);
        assert_eq!(
            eligible_count(&pool, &prefs, Some(CrowdType::Normal)),
            filter(&pool, &prefs, Some(CrowdType::Normal)).len()
        );
    }
}
