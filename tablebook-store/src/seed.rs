use rand::seq::SliceRandom;
use rand::Rng;

const VEGETABLES: &[&str] = &[
    "Artichoke", "Arugula", "Asparagus", "Beet", "Bok Choy", "Broccoli",
    "Brussels Sprout", "Cabbage", "Carrot", "Cauliflower", "Celery", "Chard",
    "Collard", "Cucumber", "Eggplant", "Endive", "Fennel", "Garlic", "Kale",
    "Kohlrabi", "Leek", "Lettuce", "Okra", "Onion", "Parsnip", "Pea", "Pepper",
    "Potato", "Pumpkin", "Radicchio", "Radish", "Rutabaga", "Shallot",
    "Spinach", "Squash", "Sweet Potato", "Tomatillo", "Turnip", "Watercress",
    "Yam", "Zucchini",
];

/// Picks `count` restaurant names, repeats allowed.
pub fn restaurant_names<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<String> {
    (0..count)
        .filter_map(|_| VEGETABLES.choose(&mut *rng))
        .map(|name| name.to_string())
        .collect()
}
