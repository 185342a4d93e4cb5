//! Small hand-built catalogs shared by the unit tests

use crate::{Catalog, GameCategory, GameMetadata, GameRecord};

pub fn category(id: &str) -> GameCategory {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    GameCategory {
        id: id.to_string(),
        name,
        slug: id.to_string(),
        description: format!("{} games", id),
        icon: "star".to_string(),
        color: "blue".to_string(),
    }
}

pub fn record(id: &str, category_id: &str, popularity: u8) -> GameRecord {
    GameRecord {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        image: format!("/images/{}.png", id),
        url: format!("https://games.example.org/{}/", id),
        category_id: category_id.to_string(),
        tags: Vec::new(),
        featured: false,
        popularity,
        date_added: "2024-01-01T00:00:00Z".parse().unwrap(),
        metadata: None,
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// Two populated categories, two empty ones
pub fn mixed_catalog() -> Catalog {
    let categories = vec![
        category("platformer"),
        category("puzzle"),
        category("racing"),
        category("sports"),
    ];

    let games = vec![
        GameRecord {
            name: "Neon Jumper".to_string(),
            description: "Leap across glowing rooftops".to_string(),
            tags: tags(&["jump", "rhythm"]),
            featured: true,
            date_added: "2024-01-10T00:00:00Z".parse().unwrap(),
            metadata: Some(GameMetadata {
                developer: Some("Pixel Forge".to_string()),
                ..Default::default()
            }),
            ..record("p1", "platformer", 90)
        },
        GameRecord {
            name: "Beat Runner".to_string(),
            description: "Run to the music".to_string(),
            tags: tags(&["rhythm", "jump", "music"]),
            date_added: "2024-03-01T00:00:00Z".parse().unwrap(),
            ..record("p2", "platformer", 60)
        },
        GameRecord {
            name: "Cube Hopper".to_string(),
            description: "A relaxed hopping game".to_string(),
            tags: tags(&["jump", "casual"]),
            date_added: "2024-02-01T00:00:00Z".parse().unwrap(),
            ..record("p3", "platformer", 31)
        },
        GameRecord {
            name: "Block Logic".to_string(),
            description: "Slide blocks into place".to_string(),
            tags: tags(&["logic", "casual"]),
            featured: true,
            date_added: "2024-01-20T00:00:00Z".parse().unwrap(),
            metadata: Some(GameMetadata {
                developer: Some("Pixel Forge".to_string()),
                controls: Some("Mouse".to_string()),
                instructions: None,
            }),
            ..record("z1", "puzzle", 75)
        },
        GameRecord {
            name: "Tile Twister".to_string(),
            description: "Rotate tiles to complete the path".to_string(),
            tags: tags(&["tiles", "logic"]),
            date_added: "2024-04-01T00:00:00Z".parse().unwrap(),
            ..record("z2", "puzzle", 50)
        },
    ];

    Catalog::new(categories, games).unwrap()
}
