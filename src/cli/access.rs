use crate::error::Result;
use crate::settings::{load_stored_settings, save_settings};

pub fn allow(id: &str) -> Result<()> {
    let mut settings = load_stored_settings();
    if settings.allow_user(id) {
        save_settings(&settings)?;
        println!("Allowed user {}", id.trim());
    } else {
        println!("User {} is already allowed.", id.trim());
    }
    Ok(())
}

pub fn deny(id: &str) -> Result<()> {
    let mut settings = load_stored_settings();
    if settings.deny_user(id) {
        save_settings(&settings)?;
        println!("Removed user {}", id.trim());
    } else {
        println!("User {} was not on the allow-list.", id.trim());
    }
    Ok(())
}
