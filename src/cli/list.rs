use std::error::Error;

use clap::Args as ClapArgs;

use crate::catalog::{CatalogSource, Filter, PageRequest, PageResult, QuerySpec};

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive fragment of the name or nickname
    #[arg(long)]
    pub name: Option<String>,
    /// Element (Fire, Wind, Forest, Mountain, ...)
    #[arg(long)]
    pub element: Option<String>,
    /// Position (GK, DF, MF, FW)
    #[arg(long)]
    pub position: Option<String>,
    /// Gender (Male, Female)
    #[arg(long)]
    pub gender: Option<String>,
    /// Team name
    #[arg(long)]
    pub team: Option<String>,
    /// Character role
    #[arg(long)]
    pub role: Option<String>,
    /// School year
    #[arg(long)]
    pub school_year: Option<String>,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    pub page: u64,
    /// Records per page (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub size: Option<u64>,
}

impl ListArgs {
    pub fn query(&self) -> QuerySpec {
        QuerySpec {
            name: self.name.clone().unwrap_or_default(),
            element: Filter::from(self.element.clone()),
            position: Filter::from(self.position.clone()),
            gender: Filter::from(self.gender.clone()),
            team: Filter::from(self.team.clone()),
            role: Filter::from(self.role.clone()),
            school_year: Filter::from(self.school_year.clone()),
        }
    }

    /// The command line counts pages from 1; requests count from 0.
    pub fn page_request(&self, default_size: usize) -> PageRequest {
        let size = self.size.map_or(default_size, |size| size as usize);
        PageRequest::new(self.page.saturating_sub(1) as usize, size)
    }
}

pub async fn list_page(
    source: &dyn CatalogSource,
    args: &ListArgs,
    default_size: usize,
) -> Result<(), Box<dyn Error>> {
    let page = source
        .fetch_page(&args.query(), args.page_request(default_size))
        .await?;
    print!("{}", format_page(&page));
    Ok(())
}

pub fn format_page(page: &PageResult) -> String {
    let mut out = String::new();
    if page.content.is_empty() {
        out.push_str("No characters found.\n");
    } else {
        out.push_str(&format!(
            "{:<28} {:<20} {:<4} {:<9} {}\n",
            "Name", "Nickname", "Pos", "Element", "Team"
        ));
        for record in &page.content {
            out.push_str(&format!(
                "{:<28} {:<20} {:<4} {:<9} {}\n",
                record.name,
                record.display_nickname(),
                record.position,
                record.element,
                record.team
            ));
        }
    }
    out.push_str(&format!(
        "\nFound: {} | Page {}/{}\n",
        page.total_elements,
        page.number + 1,
        page.total_pages.max(1)
    ));
    out
}
