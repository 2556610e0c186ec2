use std::collections::VecDeque;

use crate::partition::ClassIndex;

/// Sink for class indices produced by [crate::Partition::refine_all].
///
/// The partition only ever appends; draining is owned by the driving
/// algorithm, which is free to process classes in any discipline it likes.
pub trait Worklist {
    /// Append one class index.
    fn enqueue(&mut self, class: ClassIndex);
}

/// LIFO worklist when drained with [Vec::pop].
impl Worklist for Vec<ClassIndex> {
    fn enqueue(&mut self, class: ClassIndex) {
        self.push(class);
    }
}

/// FIFO worklist when drained with [VecDeque::pop_front].
impl Worklist for VecDeque<ClassIndex> {
    fn enqueue(&mut self, class: ClassIndex) {
        self.push_back(class);
    }
}

/// Discards every class index, for callers that do not reprocess splits.
impl Worklist for () {
    fn enqueue(&mut self, _class: ClassIndex) {}
}

#[cfg(test)]
mod test {
    use super::*;

    fn enqueue_all(worklist: &mut impl Worklist, classes: [u32; 3]) {
        for class in classes {
            worklist.enqueue(ClassIndex::from(class));
        }
    }

    #[test]
    fn vec_preserves_insertion_order() {
        let mut worklist: Vec<ClassIndex> = vec![];
        enqueue_all(&mut worklist, [2, 3, 5]);
        assert_eq!(worklist, [ClassIndex::from(2_u32), ClassIndex::from(3_u32), ClassIndex::from(5_u32)]);
        assert_eq!(worklist.pop(), Some(ClassIndex::from(5_u32)));
    }

    #[test]
    fn vec_deque_drains_fifo() {
        let mut worklist: VecDeque<ClassIndex> = VecDeque::new();
        enqueue_all(&mut worklist, [2, 3, 5]);
        assert_eq!(worklist.pop_front(), Some(ClassIndex::from(2_u32)));
        assert_eq!(worklist.pop_front(), Some(ClassIndex::from(3_u32)));
        assert_eq!(worklist.pop_front(), Some(ClassIndex::from(5_u32)));
        assert_eq!(worklist.pop_front(), None);
    }

    #[test]
    fn unit_discards() {
        enqueue_all(&mut (), [2, 3, 5]);
    }
}
