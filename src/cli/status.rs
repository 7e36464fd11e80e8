use crate::db::open;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!(
        "Allowed:    {}",
        if settings.allowed_users.is_empty() {
            "everyone".to_string()
        } else {
            format!("{} user(s)", settings.allowed_users.len())
        }
    );

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = open(&db_path)?;
        let purchases: i64 = conn.query_row("SELECT count(*) FROM purchases", [], |r| r.get(0))?;
        let pending: i64 = conn.query_row("SELECT count(*) FROM shopping_list", [], |r| r.get(0))?;

        println!();
        println!("Purchases:  {purchases}");
        println!("Pending:    {pending}");
    } else {
        println!();
        println!("Database not found. Run `grocer init` to set up.");
    }

    Ok(())
}
