use std::error::Error;

use crate::catalog::query::filter_options;
use crate::catalog::CatalogSource;

pub async fn list_teams(source: &dyn CatalogSource) -> Result<(), Box<dyn Error>> {
    let teams = source.fetch_teams().await?;
    if teams.is_empty() {
        println!("No teams found.");
        return Ok(());
    }
    for option in filter_options(teams) {
        println!("{option}");
    }
    Ok(())
}
