//! Setup and total CLI commands
//!
//! Implements initial setup, the totals summary, and total adjustments.

use crate::config::settings::Settings;
use crate::display::totals::format_totals;
use crate::error::MoneyTreeResult;
use crate::models::{Money, MoneyType};
use crate::services::ItemService;
use crate::storage::Storage;

/// Run initial setup
pub fn handle_init_command(
    storage: &Storage,
    settings: &Settings,
    wallet: Money,
    savings: Money,
) -> MoneyTreeResult<()> {
    let service = ItemService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    if !service.initialize(wallet, savings)? {
        println!("Setup has already been completed; nothing changed.");
        return Ok(());
    }

    println!("Setup complete!");
    println!("  Wallet:  {}", wallet.format_with_symbol(symbol));
    println!("  Savings: {}", savings.format_with_symbol(symbol));
    Ok(())
}

/// Print the totals summary
pub fn handle_totals_command(storage: &Storage, settings: &Settings) -> MoneyTreeResult<()> {
    let service = ItemService::new(storage);
    print!(
        "{}",
        format_totals(&service.totals()?, &settings.currency_symbol)
    );
    Ok(())
}

/// Set the wallet or savings total
pub fn handle_adjust_command(
    storage: &Storage,
    settings: &Settings,
    money_type: MoneyType,
    new_total: Money,
) -> MoneyTreeResult<()> {
    let service = ItemService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    let before = service.totals()?.for_type(money_type);
    let adjustment = service.adjust_total(money_type, new_total)?;

    if before == new_total {
        println!(
            "{} total is already {}",
            money_type,
            new_total.format_with_symbol(symbol)
        );
        return Ok(());
    }

    println!(
        "{} total: {} -> {}",
        money_type,
        before.format_with_symbol(symbol),
        new_total.format_with_symbol(symbol)
    );
    if let Some(item) = adjustment {
        println!(
            "  Recorded #{} {}  {}",
            item.id,
            item.label,
            item.amount.format_with_symbol(symbol)
        );
    }
    Ok(())
}
