use crate::index::make_index;
use crate::worklist::Worklist;
use tracing::instrument;

make_index!(
    /// Identifies a partitioned element, typically an automaton state.
    pub ElementIndex
);

make_index!(
    /// Identifies an equivalence class of a [Partition].
    pub ClassIndex
);

/// Epoch counter interpreting the per-element distinguished tags.
///
/// An element is distinguished iff its tag equals the partition's current
/// epoch. Advancing the epoch clears every tag at once without touching
/// the elements. The counter is not expected to wrap: it advances once per
/// refine round, so a partition would need `u32::MAX` rounds before a
/// stale tag could be misread as distinguished.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
struct Epoch(u32);

#[derive(Copy, Clone, Debug, Default)]
struct Element {
    /// Owning class; invalid until the element is added.
    class: ClassIndex,
    epoch: Epoch,
    /// Neighbors in whichever sublist of the class currently holds the
    /// element; invalid marks a list end.
    next: ElementIndex,
    prev: ElementIndex,
}

#[derive(Copy, Clone, Debug, Default)]
struct Class {
    /// Total members, ordinary plus distinguished.
    size: u32,
    distinguished_size: u32,
    ordinary_head: ElementIndex,
    distinguished_head: ElementIndex,
}

/// A partition of elements `0..n` into disjoint equivalence classes.
///
/// Elements and classes are dense `u32` indices. Every element starts
/// unassigned; [Partition::add] places it into a class, [Partition::move_to]
/// reassigns it. Each class keeps its members in two intrusive doubly-linked
/// sublists, the ordinary one and the distinguished one, so that
/// [Partition::distinguish] and [Partition::refine_all] run in time bounded
/// by the elements actually touched. This is the splitting structure of
/// Hopcroft-style automaton minimization.
///
/// Precondition violations panic; see the per-operation docs.
#[derive(Clone, Debug)]
pub struct Partition {
    elements: Vec<Element>,
    classes: Vec<Class>,
    /// Classes with a non-empty distinguished sublist, in first-touch order.
    visited: Vec<ClassIndex>,
    epoch: Epoch,
}

impl Partition {
    /// Create a partition over `num_elements` unassigned elements and no
    /// classes.
    pub fn new(num_elements: usize) -> Self {
        let mut partition =
            Self { elements: Vec::new(), classes: Vec::new(), visited: Vec::new(), epoch: Epoch(1) };
        partition.initialize(num_elements);
        partition
    }

    /// Reset to `num_elements` unassigned elements and no classes.
    ///
    /// Discards all previous state, including pending distinguished marks.
    pub fn initialize(&mut self, num_elements: usize) {
        self.elements.clear();
        self.elements.resize(num_elements, Element::default());
        self.classes.clear();
        self.classes.reserve(num_elements);
        self.visited.clear();
        // Epoch 1 keeps the all-zeros default tag undistinguished.
        self.epoch = Epoch(1);
    }

    /// Append one empty class and return its index.
    pub fn add_class(&mut self) -> ClassIndex {
        let class = ClassIndex::new(self.classes.len());
        self.classes.push(Class::default());
        class
    }

    /// Append `num_classes` empty classes.
    pub fn allocate_classes(&mut self, num_classes: usize) {
        self.classes.resize(self.classes.len() + num_classes, Class::default());
    }

    /// Place an unassigned element into the ordinary sublist of `class`.
    ///
    /// Panics if the element is already owned by a class; use
    /// [Partition::move_to] for reassignment.
    pub fn add(&mut self, element: ElementIndex, class: ClassIndex) {
        assert!(
            !self.elements[element.index()].class.is_valid(),
            "element {element} is already owned by a class"
        );
        let head = self.classes[class.index()].ordinary_head;
        if head.is_valid() {
            self.elements[head.index()].prev = element;
        }
        let this = &mut self.elements[element.index()];
        this.class = class;
        this.epoch = Epoch(0);
        this.next = head;
        this.prev = ElementIndex::invalid();
        let this_class = &mut self.classes[class.index()];
        this_class.ordinary_head = element;
        this_class.size += 1;
    }

    /// Move an element from the ordinary sublist of its current class into
    /// the ordinary sublist of `class`.
    ///
    /// Panics if the element is distinguished or its current class has a
    /// split pending, i.e. between a [Partition::distinguish] touching the
    /// class and the next [Partition::refine_all].
    pub fn move_to(&mut self, element: ElementIndex, class: ClassIndex) {
        let Element { class: old_class, epoch, .. } = self.elements[element.index()];
        assert!(old_class.is_valid(), "element {element} has not been added to a class");
        assert_ne!(epoch, self.epoch, "element {element} is distinguished; refine before moving");
        assert_eq!(
            self.classes[old_class.index()].distinguished_size,
            0,
            "class {old_class} has a split pending; refine before moving"
        );
        self.unlink_ordinary(element);
        self.classes[old_class.index()].size -= 1;
        self.elements[element.index()].class = ClassIndex::invalid();
        self.add(element, class);
    }

    /// Mark an element as distinguished within its class.
    ///
    /// Moves the element from the ordinary to the distinguished sublist and
    /// records the class for the next [Partition::refine_all]. Idempotent
    /// until the next refine.
    pub fn distinguish(&mut self, element: ElementIndex) {
        let Element { class, epoch, .. } = self.elements[element.index()];
        if epoch == self.epoch {
            return;
        }
        assert!(class.is_valid(), "element {element} has not been added to a class");
        self.unlink_ordinary(element);
        let head = self.classes[class.index()].distinguished_head;
        if head.is_valid() {
            self.elements[head.index()].prev = element;
        } else {
            // First distinguished member; remember the class for refine_all.
            self.visited.push(class);
        }
        let this = &mut self.elements[element.index()];
        this.epoch = self.epoch;
        this.next = head;
        this.prev = ElementIndex::invalid();
        let this_class = &mut self.classes[class.index()];
        this_class.distinguished_head = element;
        this_class.distinguished_size += 1;
        debug_assert!(this_class.distinguished_size <= this_class.size);
    }

    /// Refine every class touched by [Partition::distinguish] since the last
    /// refine.
    ///
    /// A class whose members all became distinguished is left as one class.
    /// Any other touched class is split in two: the smaller of its two
    /// subsets moves into a freshly created class (on a tie, the
    /// distinguished subset moves) and the new class index is pushed onto
    /// `worklist`, in the order the classes were first touched. Afterwards
    /// all distinguished marks are cleared in O(1) by advancing the epoch.
    #[instrument(skip_all)]
    pub fn refine_all<W: Worklist>(&mut self, worklist: &mut W) {
        for i in 0..self.visited.len() {
            let class = self.visited[i];
            if let Some(new_class) = self.split(class) {
                worklist.enqueue(new_class);
            }
        }
        self.visited.clear();
        self.epoch.0 += 1;
    }

    /// Split one visited class; returns the created class, if any.
    fn split(&mut self, class: ClassIndex) -> Option<ClassIndex> {
        let Class { size, distinguished_size, ordinary_head, distinguished_head } =
            self.classes[class.index()];
        debug_assert!(distinguished_size > 0);
        let ordinary_size = size - distinguished_size;

        if ordinary_size == 0 {
            // Everything became distinguished; relabel instead of splitting.
            debug_assert!(!ordinary_head.is_valid());
            let this_class = &mut self.classes[class.index()];
            this_class.ordinary_head = distinguished_head;
            this_class.distinguished_head = ElementIndex::invalid();
            this_class.distinguished_size = 0;
            return None;
        }

        let new_class = self.add_class();
        if ordinary_size < distinguished_size {
            // The ordinary subset moves out; the distinguished subset stays
            // and becomes the ordinary sublist of the old class.
            let old = &mut self.classes[class.index()];
            old.ordinary_head = distinguished_head;
            old.distinguished_head = ElementIndex::invalid();
            old.size = distinguished_size;
            old.distinguished_size = 0;
            let new = &mut self.classes[new_class.index()];
            new.ordinary_head = ordinary_head;
            new.size = ordinary_size;
        } else {
            // The distinguished subset moves out, ties included.
            let old = &mut self.classes[class.index()];
            old.distinguished_head = ElementIndex::invalid();
            old.size = ordinary_size;
            old.distinguished_size = 0;
            let new = &mut self.classes[new_class.index()];
            new.ordinary_head = distinguished_head;
            new.size = distinguished_size;
        }

        // Only the moved subset is revisited, keeping the split cost
        // proportional to the smaller side.
        let mut element = self.classes[new_class.index()].ordinary_head;
        while element.is_valid() {
            self.elements[element.index()].class = new_class;
            element = self.elements[element.index()].next;
        }
        Some(new_class)
    }

    /// Unlink an element from the ordinary sublist of its class, leaving its
    /// own links and size bookkeeping to the caller.
    fn unlink_ordinary(&mut self, element: ElementIndex) {
        let Element { class, next, prev, .. } = self.elements[element.index()];
        if prev.is_valid() {
            self.elements[prev.index()].next = next;
        } else {
            debug_assert_eq!(self.classes[class.index()].ordinary_head, element);
            self.classes[class.index()].ordinary_head = next;
        }
        if next.is_valid() {
            self.elements[next.index()].prev = prev;
        }
    }

    /// The class currently owning `element`. Panics if it was never added.
    #[inline(always)]
    pub fn class_of(&self, element: ElementIndex) -> ClassIndex {
        let class = self.elements[element.index()].class;
        assert!(class.is_valid(), "element {element} has not been added to a class");
        class
    }

    /// Number of elements owned by `class`, both sublists combined.
    #[inline(always)]
    pub fn class_size(&self, class: ClassIndex) -> usize {
        self.classes[class.index()].size as usize
    }

    /// Number of classes created so far.
    #[inline(always)]
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of elements, assigned or not.
    #[inline(always)]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Iterate over the ordinary sublist of `class`.
    ///
    /// This is the full membership whenever no distinguish/refine cycle is
    /// in flight; mid-cycle it only covers the not-yet-distinguished
    /// members.
    pub fn class_elements(&self, class: ClassIndex) -> PartitionIterator<'_> {
        PartitionIterator::new(self, class)
    }
}

/// Restartable read-only cursor over the ordinary sublist of one class.
///
/// Created by [Partition::class_elements]. Besides [Iterator::next] it
/// offers [PartitionIterator::reset] to start over from the head of the
/// class.
#[derive(Clone, Debug)]
pub struct PartitionIterator<'a> {
    partition: &'a Partition,
    class: ClassIndex,
    element: ElementIndex,
}

impl<'a> PartitionIterator<'a> {
    fn new(partition: &'a Partition, class: ClassIndex) -> Self {
        let element = partition.classes[class.index()].ordinary_head;
        Self { partition, class, element }
    }

    /// Restart from the head of the class's ordinary sublist.
    pub fn reset(&mut self) {
        self.element = self.partition.classes[self.class.index()].ordinary_head;
    }
}

impl Iterator for PartitionIterator<'_> {
    type Item = ElementIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.element;
        if !element.is_valid() {
            return None;
        }
        self.element = self.partition.elements[element.index()].next;
        Some(element)
    }
}
