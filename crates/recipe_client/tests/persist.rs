use std::fs;

use pretty_assertions::assert_eq;
use recipe_client::{
    ensure_storage_dir, AtomicFileWriter, FavoritesStore, JsonFileStore, PersistError,
    FAVORITES_KEY,
};
use recipe_core::{ExtendedIngredient, Recipe};
use tempfile::TempDir;

fn favorite(id: u64) -> Recipe {
    Recipe {
        id,
        title: format!("Favorite {id}"),
        image: format!("https://img.example.com/{id}.jpg"),
        servings: 4,
        ready_in_minutes: 45,
        summary: "<b>Good</b> food".into(),
        instructions: Some("Mix. Bake.".into()),
        extended_ingredients: vec![ExtendedIngredient {
            id: 1,
            name: "flour".into(),
            original: "2 cups flour".into(),
            amount: 2.0,
            unit: "cups".into(),
            ..ExtendedIngredient::default()
        }],
        ..Recipe::default()
    }
}

#[test]
fn creates_missing_storage_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested").join("data");
    ensure_storage_dir(&dir).unwrap();
    assert!(dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("a.json", b"[1]").unwrap();
    let second = writer.write("a.json", b"[2]").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"[2]");
}

#[test]
fn missing_file_loads_empty() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().to_path_buf());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn favorites_round_trip_byte_for_byte() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().join("data"));
    assert_eq!(
        store.path().file_name().unwrap().to_str().unwrap(),
        format!("{FAVORITES_KEY}.json")
    );

    let favorites = vec![favorite(3), favorite(1)];
    store.save(&favorites).unwrap();
    let first_bytes = fs::read(store.path()).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded, favorites);

    store.save(&loaded).unwrap();
    assert_eq!(fs::read(store.path()).unwrap(), first_bytes);
}

#[test]
fn corrupt_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let store = JsonFileStore::new(temp.path().to_path_buf());
    fs::write(store.path(), "{not json").unwrap();

    assert!(matches!(store.load(), Err(PersistError::Corrupt(_))));
}

#[test]
fn save_into_file_path_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let store = JsonFileStore::new(blocker.clone());
    assert!(matches!(
        store.save(&[favorite(1)]),
        Err(PersistError::StorageDir(_))
    ));
}
