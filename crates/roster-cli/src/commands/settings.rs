use roster_core::settings::schema::ImportSettings;
use std::path::Path;

pub fn show(settings: &ImportSettings) -> Result<(), roster_core::error::RosterError> {
    println!("Settings '{}'\n", settings.name);
    println!("  delimiter           {}", settings.delimiter.escape_default());
    println!("  course upload limit {} bytes", settings.max_course_bytes);
    println!("  exam upload limit   {} bytes", settings.max_exam_bytes);
    let exts = if settings.allowed_extensions.is_empty() {
        "any".to_string()
    } else {
        settings.allowed_extensions.join(", ")
    };
    println!("  allowed extensions  {}", exts);
    println!("  auto-accept high    {}", settings.auto_accept_high);
    println!("  display limit       {}", settings.display_limit);
    println!(
        "  code normalizer     v{}",
        roster_core::NORMALIZER_VERSION
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), roster_core::error::RosterError> {
    let settings = roster_core::settings::load_settings(file)?;

    println!("Settings '{}' are valid.", settings.name);

    let mut warnings = Vec::new();
    if settings.allowed_extensions.is_empty() {
        warnings.push("no allowed_extensions: every file name is accepted".to_string());
    }
    if settings.delimiter != ';' {
        warnings.push(format!(
            "delimiter '{}' differs from the standard ';' bulk formats",
            settings.delimiter.escape_default()
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
