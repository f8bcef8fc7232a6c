//! Tree view over a flat list of money items
//!
//! Items only point upward through `parent_id`. `ItemTree` derives the
//! downward child index on demand and answers structural questions:
//! leaves, descendants, subtree totals and tab filtering.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{ItemId, Money, MoneyItem, MoneyType, Tab};

/// Borrowed index of parent/child relations
pub struct ItemTree<'a> {
    items: &'a [MoneyItem],
    by_id: HashMap<ItemId, &'a MoneyItem>,
    children: HashMap<ItemId, Vec<&'a MoneyItem>>,
}

impl<'a> ItemTree<'a> {
    /// Build the index. Children keep the order they have in `items`.
    pub fn new(items: &'a [MoneyItem]) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut children: HashMap<ItemId, Vec<&'a MoneyItem>> = HashMap::new();

        for item in items {
            by_id.insert(item.id, item);
            if let Some(parent) = item.parent_id {
                children.entry(parent).or_default().push(item);
            }
        }

        Self {
            items,
            by_id,
            children,
        }
    }

    /// Look up an item
    pub fn get(&self, id: ItemId) -> Option<&'a MoneyItem> {
        self.by_id.get(&id).copied()
    }

    /// Whether any item names `id` as its parent
    pub fn has_children(&self, id: ItemId) -> bool {
        self.children.get(&id).is_some_and(|c| !c.is_empty())
    }

    /// Direct children of `id`
    pub fn children(&self, id: ItemId) -> &[&'a MoneyItem] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items without a parent, in original order
    pub fn roots(&self) -> impl Iterator<Item = &'a MoneyItem> + '_ {
        self.items.iter().filter(|item| item.is_root())
    }

    /// Items no other item points at
    pub fn leaves(&self) -> impl Iterator<Item = &'a MoneyItem> + '_ {
        self.items
            .iter()
            .filter(move |item| !self.has_children(item.id))
    }

    /// Sum of leaf amounts of one type
    pub fn leaf_total(&self, money_type: MoneyType) -> Money {
        self.leaves()
            .filter(|item| item.money_type == money_type)
            .map(|item| item.amount)
            .sum()
    }

    /// `id` and every transitive descendant, breadth first.
    ///
    /// `id` is always the first element, whether or not it exists.
    pub fn descendants(&self, id: ItemId) -> Vec<ItemId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            order.push(current);
            for child in self.children(current) {
                queue.push_back(child.id);
            }
        }

        order
    }

    /// Sum of the leaf amounts under `id`.
    ///
    /// A leaf's subtree total is its own amount. Unknown ids total zero.
    pub fn subtree_total(&self, id: ItemId) -> Money {
        if self.get(id).is_none() {
            return Money::zero();
        }

        self.descendants(id)
            .into_iter()
            .filter(|d| !self.has_children(*d))
            .filter_map(|d| self.get(d))
            .map(|item| item.amount)
            .sum()
    }

    /// Amount shown for an item: own amount for leaves, rollup for composites
    pub fn display_amount(&self, item: &MoneyItem) -> Money {
        if self.has_children(item.id) {
            self.subtree_total(item.id)
        } else {
            item.amount
        }
    }

    /// Items visible under `tab`, in original order.
    ///
    /// A typed tab keeps every item of that type plus all of its ancestors,
    /// so the result is closed under "parent of".
    pub fn filter_by_tab(&self, tab: Tab) -> Vec<&'a MoneyItem> {
        let money_type = match tab {
            Tab::All => return self.items.iter().collect(),
            Tab::Only(t) => t,
        };

        let mut relevant: HashSet<ItemId> = HashSet::new();
        for item in self.items.iter().filter(|i| i.money_type == money_type) {
            let mut current = Some(item);
            while let Some(node) = current {
                if !relevant.insert(node.id) {
                    break;
                }
                current = node.parent_id.and_then(|p| self.get(p));
            }
        }

        self.items
            .iter()
            .filter(|item| relevant.contains(&item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, amount: i64, money_type: MoneyType, parent: Option<u64>) -> MoneyItem {
        MoneyItem {
            id: ItemId::new(id),
            label: format!("item-{}", id),
            amount: Money::new(amount),
            money_type,
            parent_id: parent.map(ItemId::new),
        }
    }

    /// 1 (wallet, composite) -> 2, 3 ; 3 -> 4 ; 5 savings root
    fn sample() -> Vec<MoneyItem> {
        vec![
            item(1, 0, MoneyType::Wallet, None),
            item(2, 3000, MoneyType::Wallet, Some(1)),
            item(3, 0, MoneyType::Wallet, Some(1)),
            item(4, 2000, MoneyType::Wallet, Some(3)),
            item(5, 5000, MoneyType::Savings, None),
        ]
    }

    #[test]
    fn test_leaves_and_children() {
        let items = sample();
        let tree = ItemTree::new(&items);

        let leaves: Vec<_> = tree.leaves().map(|i| i.id.value()).collect();
        assert_eq!(leaves, vec![2, 4, 5]);

        assert!(tree.has_children(ItemId::new(1)));
        assert!(!tree.has_children(ItemId::new(2)));
        assert_eq!(tree.children(ItemId::new(1)).len(), 2);
        assert!(tree.children(ItemId::new(99)).is_empty());

        let roots: Vec<_> = tree.roots().map(|i| i.id.value()).collect();
        assert_eq!(roots, vec![1, 5]);
    }

    #[test]
    fn test_descendants_breadth_first() {
        let items = sample();
        let tree = ItemTree::new(&items);

        let ids: Vec<_> = tree
            .descendants(ItemId::new(1))
            .into_iter()
            .map(|i| i.value())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        assert_eq!(tree.descendants(ItemId::new(5)), vec![ItemId::new(5)]);
        assert_eq!(tree.descendants(ItemId::new(42)), vec![ItemId::new(42)]);
    }

    #[test]
    fn test_subtree_totals_count_only_leaves() {
        let mut items = sample();
        // Stale amount on a composite must not be counted
        items[2].amount = Money::new(9999);
        let tree = ItemTree::new(&items);

        assert_eq!(tree.subtree_total(ItemId::new(1)), Money::new(5000));
        assert_eq!(tree.subtree_total(ItemId::new(3)), Money::new(2000));
        assert_eq!(tree.subtree_total(ItemId::new(5)), Money::new(5000));
        assert_eq!(tree.subtree_total(ItemId::new(77)), Money::zero());

        assert_eq!(tree.display_amount(&items[2]), Money::new(2000));
        assert_eq!(tree.display_amount(&items[1]), Money::new(3000));
    }

    #[test]
    fn test_leaf_total_by_type() {
        let items = sample();
        let tree = ItemTree::new(&items);
        assert_eq!(tree.leaf_total(MoneyType::Wallet), Money::new(5000));
        assert_eq!(tree.leaf_total(MoneyType::Savings), Money::new(5000));
    }

    #[test]
    fn test_filter_all_is_identity() {
        let items = sample();
        let tree = ItemTree::new(&items);
        assert_eq!(tree.filter_by_tab(Tab::All).len(), items.len());
    }

    #[test]
    fn test_filter_includes_ancestors() {
        // Savings child under a wallet parent (type edited after a split)
        let items = vec![
            item(1, 0, MoneyType::Wallet, None),
            item(2, 1000, MoneyType::Wallet, Some(1)),
            item(3, 0, MoneyType::Wallet, Some(1)),
            item(4, 500, MoneyType::Savings, Some(3)),
            item(5, 700, MoneyType::Wallet, None),
        ];
        let tree = ItemTree::new(&items);

        let savings: Vec<_> = tree
            .filter_by_tab(Tab::Only(MoneyType::Savings))
            .into_iter()
            .map(|i| i.id.value())
            .collect();
        assert_eq!(savings, vec![1, 3, 4]);

        // Closed under "parent of"
        let result = tree.filter_by_tab(Tab::Only(MoneyType::Savings));
        let ids: HashSet<_> = result.iter().map(|i| i.id).collect();
        for i in &result {
            if let Some(p) = i.parent_id {
                assert!(ids.contains(&p));
            }
        }

        let wallet: Vec<_> = tree
            .filter_by_tab(Tab::Only(MoneyType::Wallet))
            .into_iter()
            .map(|i| i.id.value())
            .collect();
        assert_eq!(wallet, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_cyclic_data_does_not_loop() {
        let items = vec![
            item(1, 100, MoneyType::Wallet, Some(2)),
            item(2, 100, MoneyType::Wallet, Some(1)),
        ];
        let tree = ItemTree::new(&items);
        assert_eq!(tree.descendants(ItemId::new(1)).len(), 2);
        assert_eq!(tree.filter_by_tab(Tab::Only(MoneyType::Wallet)).len(), 2);
    }
}
