//! Advisor CLI command

use crate::advisor::AdvisorClient;
use crate::config::settings::Settings;
use crate::error::MoneyTreeResult;
use crate::services::ItemService;
use crate::storage::Storage;

/// Ask the advisor about the current items and print its answer verbatim
pub fn handle_advise_command(storage: &Storage, settings: &Settings) -> MoneyTreeResult<()> {
    let service = ItemService::new(storage);
    let client = AdvisorClient::from_settings(&settings.advisor)?;

    println!("Analyzing...");
    let advice = client.advise(&service.list()?)?;

    println!();
    println!("Advice:");
    println!("{}", advice);
    Ok(())
}
