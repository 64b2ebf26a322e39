use crate::models::{Category, Menu, MenuEntry, MenuItem, MenuSection};

/// Groups menu items under their owning category
///
/// Every category gets a section, possibly with no items. Items keep their input
/// order; items pointing at a category outside `categories` are dropped.
pub fn assemble_menu(categories: Vec<Category>, items: Vec<MenuItem>) -> Menu {
    let mut menu: Menu = categories
        .into_iter()
        .map(|category| {
            (
                category.id,
                MenuSection {
                    category_name: category.category_name,
                    items: Vec::new(),
                },
            )
        })
        .collect();

    for item in items {
        match menu.get_mut(&item.category_id) {
            Some(section) => section.items.push(MenuEntry::from(item)),
            None => tracing::debug!(
                "Dropping menu item {} with unknown category {}",
                item.id,
                item.category_id
            ),
        }
    }

    menu
}
