//! Money item display formatting
//!
//! Formats the item forest as an indented tree for terminal output.

use crate::aggregate::ItemTree;
use crate::models::{MoneyItem, Tab};

/// Format the visible items as a tree, each composite showing its rollup
pub fn format_item_tree(items: &[MoneyItem], tab: Tab, symbol: &str) -> String {
    let tree = ItemTree::new(items);
    let roots: Vec<_> = tree.roots().collect();

    if roots.is_empty() {
        return match tab {
            Tab::All => "No money items yet.\n\nRun 'moneytree add <label> <amount>' to record one.\n"
                .to_string(),
            Tab::Only(t) => format!("No {} items.\n", t.as_str()),
        };
    }

    // Labels go last: CJK text is wider than its char count.
    let mut output = String::new();
    for root in roots {
        output.push_str(&format!(
            "#{:<4} {:<8} {:>14}  {}\n",
            root.id,
            root.money_type.to_string(),
            tree.display_amount(root).format_with_symbol(symbol),
            root.label,
        ));
        push_children(&tree, root, "", symbol, &mut output);
    }

    output
}

fn push_children(tree: &ItemTree<'_>, parent: &MoneyItem, indent: &str, symbol: &str, output: &mut String) {
    let children = tree.children(parent.id);
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        let prefix = if is_last { "└── " } else { "├── " };

        output.push_str(&format!(
            "  {}{}#{} {}  {}\n",
            indent,
            prefix,
            child.id,
            child.label,
            tree.display_amount(child).format_with_symbol(symbol)
        ));

        let next_indent = format!("{}{}", indent, if is_last { "    " } else { "│   " });
        push_children(tree, child, &next_indent, symbol, output);
    }
}

/// Format a single item's details
pub fn format_item_details(item: &MoneyItem, items: &[MoneyItem], symbol: &str) -> String {
    let tree = ItemTree::new(items);
    let mut output = String::new();

    output.push_str(&format!("Item: {}\n", item.label));
    output.push_str(&format!("  ID:       {}\n", item.id));
    output.push_str(&format!("  Type:     {}\n", item.money_type));
    output.push_str(&format!(
        "  Amount:   {}\n",
        tree.display_amount(item).format_with_symbol(symbol)
    ));

    if let Some(parent) = item.parent_id.and_then(|p| tree.get(p)) {
        output.push_str(&format!("  Parent:   #{} {}\n", parent.id, parent.label));
    }

    let children = tree.children(item.id);
    if !children.is_empty() {
        output.push_str(&format!("  Sub-items: {}\n", children.len()));
    }

    output
}
