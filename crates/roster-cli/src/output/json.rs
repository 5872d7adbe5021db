use roster_core::error::RosterError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), RosterError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
