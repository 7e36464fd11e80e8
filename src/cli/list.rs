use crate::db::open;
use crate::error::Result;
use crate::settings::get_db_path;
use crate::shopping::add_items;
use crate::store;

pub fn add(items: &[String]) -> Result<()> {
    let conn = open(&get_db_path())?;
    let result = add_items(&conn, &items.join("\n"))?;
    if result.requested == 0 {
        println!("No items found. Usage: grocer list add Milk Bread");
    } else {
        println!("Added {} new item(s) to the shopping list.", result.added);
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let conn = open(&get_db_path())?;
    let items = store::list_items(&conn)?;
    if items.is_empty() {
        println!("All good! Nothing missing from the list.");
        return Ok(());
    }
    println!("--- Still to buy ---");
    for item in items {
        println!("  \u{2022} {}", item.product);
    }
    Ok(())
}

pub fn clear() -> Result<()> {
    let conn = open(&get_db_path())?;
    let removed = store::clear_list(&conn)?;
    println!("Shopping list cleared ({removed} item(s) removed).");
    Ok(())
}
