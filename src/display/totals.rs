//! Totals summary formatting

use crate::aggregate::Totals;

/// Format the headline totals
pub fn format_totals(totals: &Totals, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total:         {:>14}\n",
        totals.grand().format_with_symbol(symbol)
    ));
    output.push_str(&"-".repeat(29));
    output.push('\n');
    output.push_str(&format!(
        "Wallet:        {:>14}\n",
        totals.wallet_true.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Labeled:     {:>14}\n",
        totals.wallet_labeled.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Unlabeled:   {:>14}\n",
        totals.wallet_unlabeled().format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Savings:       {:>14}\n",
        totals.savings.format_with_symbol(symbol)
    ));

    output
}
