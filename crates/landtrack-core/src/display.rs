use crate::model::Listing;
use tabled::settings::{object::Columns, Modify, Style, Width};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct ListingTableRow {
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Acres", display_with = "display_right_7")]
    pub acres: String,
    #[tabled(rename = "Price", display_with = "display_right_10")]
    pub price: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Address")]
    pub address: String,
}

fn display_right_7(s: &str) -> String {
    format!("{:>7}", s)
}

fn display_right_10(s: &str) -> String {
    format!("{:>10}", s)
}

impl ListingTableRow {
    pub fn from_listing(listing: &Listing) -> Self {
        let acres_str = listing
            .acres
            .map(|a| format!("{a:.1}"))
            .unwrap_or_else(|| "N/A".to_string());

        let price_str = listing
            .price
            .map(|p| format!("${p}"))
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            source: listing.source.clone(),
            title: listing.title.clone(),
            acres: acres_str,
            price: price_str,
            status: if listing.active { "active" } else { "gone" }.to_string(),
            address: listing.address.clone(),
        }
    }
}

pub fn create_listing_table(listings: &[Listing]) -> String {
    let rows: Vec<ListingTableRow> = listings.iter().map(ListingTableRow::from_listing).collect();

    let mut table = Table::new(&rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::single(1)).with(Width::truncate(40)))
        .with(Modify::new(Columns::single(5)).with(Width::wrap(50)));

    table.to_string()
}
