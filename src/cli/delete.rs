use crate::db::open;
use crate::error::{GrocerError, Result};
use crate::fmt::money;
use crate::settings::get_db_path;
use crate::store;

pub fn run(id: i64) -> Result<()> {
    let conn = open(&get_db_path())?;
    let purchase = store::get_purchase(&conn, id)?
        .ok_or_else(|| GrocerError::NotFound(format!("no purchase with ID {id}")))?;
    store::delete_purchase(&conn, id)?;
    println!(
        "Deleted purchase {id}: {} {}",
        purchase.product,
        money(purchase.price)
    );
    Ok(())
}
