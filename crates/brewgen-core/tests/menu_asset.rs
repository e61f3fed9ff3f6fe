use std::path::Path;

use brewgen_core::{MenuCategory, MenuPriceIndex, PARTITION_IDS, load_menu_csv};

fn menu_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../brewgen-generate/assets/menu.csv")
}

#[test]
fn shipped_menu_covers_partition() {
    let index = MenuPriceIndex::load(&menu_path()).expect("load shipped menu");
    index
        .validate_partition()
        .expect("shipped menu should price every partition id");
    assert_eq!(index.len(), PARTITION_IDS.count());
}

#[test]
fn shipped_menu_categories_follow_partition() {
    let items = load_menu_csv(&menu_path()).expect("load shipped menu");
    for item in &items {
        let category = MenuCategory::for_id(item.id).expect("id inside partition");
        match category {
            MenuCategory::CupSize => assert_eq!(item.category, "Cup Size", "item {}", item.id),
            MenuCategory::Topping => assert_eq!(item.category, "Topping", "item {}", item.id),
            MenuCategory::SugarLevel => {
                assert_eq!(item.category, "Sugar Level", "item {}", item.id)
            }
            MenuCategory::IceAmount => assert_eq!(item.category, "Ice Amount", "item {}", item.id),
            MenuCategory::Drink => assert!(item.price > 0.0, "drink {} must cost money", item.id),
        }
    }
}
