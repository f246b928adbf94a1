use crate::Category;

// (slug, display name, thumbnail)
const CUISINES: [(&str, &str, &str); 12] = [
    ("italian", "Italian", "https://images.unsplash.com/photo-1498579150354-977475b7ea0b?w=100&h=100&fit=crop"),
    ("mexican", "Mexican", "https://images.unsplash.com/photo-1565299585323-38d6b0865b47?w=100&h=100&fit=crop"),
    ("chinese", "Chinese", "https://images.unsplash.com/photo-1585032226651-759b368d7246?w=100&h=100&fit=crop"),
    ("indian", "Indian", "https://images.unsplash.com/photo-1585937421612-70a008356fbe?w=100&h=100&fit=crop"),
    ("japanese", "Japanese", "https://images.unsplash.com/photo-1580822184713-fc5400e7fe10?w=100&h=100&fit=crop"),
    ("thai", "Thai", "https://images.unsplash.com/photo-1562565652-a0d8f0c59eb4?w=100&h=100&fit=crop"),
    ("french", "French", "https://images.unsplash.com/photo-1608855238293-a8853e7f7c98?w=100&h=100&fit=crop"),
    ("greek", "Greek", "https://images.unsplash.com/photo-1594212699903-ec8a3eca50f5?w=100&h=100&fit=crop"),
    ("spanish", "Spanish", "https://images.unsplash.com/photo-1515443961218-a51367888e4b?w=100&h=100&fit=crop"),
    ("korean", "Korean", "https://images.unsplash.com/photo-1498654896293-37aacf113fd9?w=100&h=100&fit=crop"),
    ("vietnamese", "Vietnamese", "https://images.unsplash.com/photo-1576577445504-6af96477db52?w=100&h=100&fit=crop"),
    ("american", "American", "https://images.unsplash.com/photo-1550547660-d9450f859349?w=100&h=100&fit=crop"),
];

/// The fixed cuisine list, in display order.
pub fn cuisine_categories() -> Vec<Category> {
    CUISINES
        .iter()
        .map(|(id, name, image)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            image: (*image).to_string(),
        })
        .collect()
}
