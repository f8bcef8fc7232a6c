//! Money item CLI commands
//!
//! Implements CLI commands for recording, editing, splitting and deleting
//! money items.

use std::io::{self, BufRead, Write};

use clap::Subcommand;

use crate::aggregate::ItemTree;
use crate::config::settings::Settings;
use crate::display::item::{format_item_details, format_item_tree};
use crate::error::{MoneyTreeError, MoneyTreeResult};
use crate::models::{ItemId, Money, MoneyType, SplitPart, Tab};
use crate::services::ItemService;
use crate::storage::Storage;

/// Money item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Record a new money item
    Add {
        /// Label (e.g. "食費")
        label: String,
        /// Amount in whole units
        amount: Money,
        /// wallet or savings
        #[arg(short = 't', long = "type", default_value = "wallet")]
        money_type: MoneyType,
    },

    /// List items as a tree
    #[command(alias = "ls")]
    List {
        /// all, wallet or savings
        #[arg(long, default_value = "all")]
        tab: Tab,
    },

    /// Show item details
    Show {
        /// Item ID
        id: ItemId,
    },

    /// Edit an item's label, amount or type
    Edit {
        /// Item ID
        id: ItemId,
        /// New label
        #[arg(short, long)]
        label: Option<String>,
        /// New amount (leaf items only)
        #[arg(short, long)]
        amount: Option<Money>,
        /// New type
        #[arg(short = 't', long = "type")]
        money_type: Option<MoneyType>,
    },

    /// Overwrite a leaf item's amount
    #[command(name = "set-amount")]
    SetAmount {
        /// Item ID
        id: ItemId,
        /// New amount (zero allowed)
        amount: Money,
    },

    /// Split an item into sub-items that add up to its amount
    Split {
        /// Item ID
        id: ItemId,
        /// Sub-items as label=amount
        #[arg(required = true)]
        parts: Vec<SplitPart>,
    },

    /// Delete an item and all of its sub-items
    #[command(alias = "rm")]
    Delete {
        /// Item ID
        id: ItemId,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an item command
pub fn handle_item_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> MoneyTreeResult<()> {
    let service = ItemService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ItemCommands::Add {
            label,
            amount,
            money_type,
        } => {
            let item = service.add(&label, amount, money_type)?;
            println!("Added: {}", item.label);
            println!("  ID:     {}", item.id);
            println!("  Type:   {}", item.money_type);
            println!("  Amount: {}", item.amount.format_with_symbol(symbol));
        }

        ItemCommands::List { tab } => {
            let items = service.filtered_by_tab(tab)?;
            print!("{}", format_item_tree(&items, tab, symbol));
        }

        ItemCommands::Show { id } => {
            let item = service.require(id)?;
            let items = service.list()?;
            print!("{}", format_item_details(&item, &items, symbol));
        }

        ItemCommands::Edit {
            id,
            label,
            amount,
            money_type,
        } => {
            if label.is_none() && amount.is_none() && money_type.is_none() {
                println!("No changes specified. Use --label, --amount, or --type.");
                return Ok(());
            }

            let mut item = service.require(id)?;
            if let Some(label) = label {
                item.label = label;
            }
            if let Some(amount) = amount {
                item.amount = amount;
            }
            if let Some(money_type) = money_type {
                item.money_type = money_type;
            }

            let updated = service.update(item)?;
            println!("Updated item: {}", updated.label);
        }

        ItemCommands::SetAmount { id, amount } => {
            let updated = service.adjust_amount(id, amount)?;
            println!(
                "{}: {}",
                updated.label,
                updated.amount.format_with_symbol(symbol)
            );
        }

        ItemCommands::Split { id, parts } => {
            let parent = service.require(id)?;
            let children = service.split(id, &parts)?;
            println!("Split '{}' into {} sub-items:", parent.label, children.len());
            for child in &children {
                println!(
                    "  #{} {}  {}",
                    child.id,
                    child.label,
                    child.amount.format_with_symbol(symbol)
                );
            }
        }

        ItemCommands::Delete { id, force } => {
            let state = service.snapshot()?;
            let tree = ItemTree::new(&state.items);
            let item = tree
                .get(id)
                .cloned()
                .ok_or_else(|| MoneyTreeError::item_not_found(id))?;
            let sub_items = tree.descendants(id).len() - 1;

            if !force {
                let question = if sub_items > 0 {
                    format!(
                        "Delete '{}' and its {} sub-items? Type 'yes' to confirm: ",
                        item.label, sub_items
                    )
                } else {
                    format!("Delete '{}'? Type 'yes' to confirm: ", item.label)
                };

                if !confirm(&question)? {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let removed = service.delete(id)?;
            println!("Deleted '{}' ({} items removed)", item.label, removed);
        }
    }

    Ok(())
}

/// Ask a yes/no question on stdin
fn confirm(question: &str) -> MoneyTreeResult<bool> {
    print!("{}", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
