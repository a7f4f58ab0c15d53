use std::error::Error;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::scout::scout;
use crate::catalog::{CatalogSource, CharacterRecord};

pub async fn scout_once(source: &dyn CatalogSource, delay: Duration) -> Result<(), Box<dyn Error>> {
    if !delay.is_zero() {
        eprintln!("⚽ Scouting...");
    }
    let mut rng = StdRng::from_entropy();
    let record = scout(source, &mut rng, delay).await?;
    print!("{}", format_card(&record));
    Ok(())
}

/// Plain-text character card.
pub fn format_card(record: &CharacterRecord) -> String {
    let mut out = format!("{} \"{}\"\n", record.name, record.display_nickname());
    out.push_str(&format!(
        "{} | {} | {} | {}\n",
        record.position,
        record.element_kind().label(),
        record.gender,
        record.team
    ));

    for (label, value) in [
        ("School year", record.school_year.as_deref()),
        ("Age group", record.age_group.as_deref()),
        ("Role", record.character_role.as_deref()),
    ] {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }

    out.push('\n');
    for (label, value) in record.stats.entries() {
        out.push_str(&format!("  {label:<13}{value:>4}\n"));
    }
    out.push_str(&format!("  {:<13}{:>4}\n", "Total", record.stats.total()));

    if let Some(description) = record.description.as_deref().filter(|d| !d.trim().is_empty()) {
        out.push_str(&format!("\n{description}\n"));
    }
    if let Some(how) = record
        .how_to_obtain
        .as_deref()
        .filter(|h| !h.trim().is_empty())
    {
        out.push_str(&format!("\nHow to obtain: {how}\n"));
    }
    out
}
