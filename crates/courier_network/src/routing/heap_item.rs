use std::cmp::Ordering;

use jiff::SignedDuration;

use crate::node::NodeIdx;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct HeapItem<'a> {
    pub distance: SignedDuration,
    pub name: &'a str,
    pub node: NodeIdx,
}

impl PartialOrd for HeapItem<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip to make this a min-heap, equal distances pop in ascending name order
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.name.cmp(self.name))
            .then_with(|| other.node.cmp(&self.node))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn test_pop_order() {
        let mut heap = BinaryHeap::new();
        heap.push(HeapItem {
            distance: SignedDuration::from_mins(5),
            name: "Collegno",
            node: NodeIdx::new(0),
        });
        heap.push(HeapItem {
            distance: SignedDuration::from_mins(3),
            name: "Settimo",
            node: NodeIdx::new(1),
        });
        heap.push(HeapItem {
            distance: SignedDuration::from_mins(3),
            name: "Grugliasco",
            node: NodeIdx::new(2),
        });

        let order = std::iter::from_fn(|| heap.pop())
            .map(|item| item.name)
            .collect::<Vec<_>>();

        assert_eq!(order, vec!["Grugliasco", "Settimo", "Collegno"]);
    }
}
