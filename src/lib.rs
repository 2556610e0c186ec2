//! This is a library providing the [partition refinement](https://en.wikipedia.org/wiki/Partition_refinement)
//! data structure at the core of Hopcroft-style minimization of finite-state
//! automata.
//!
//! A [Partition] maintains disjoint equivalence classes over elements
//! `0..n`, typically automaton state indices. The driving algorithm marks
//! individual elements as distinguishable with [Partition::distinguish] and
//! then splits every touched class with [Partition::refine_all], which
//! moves the smaller half of each split into a fresh class and reports the
//! new class indices to a [Worklist]. All operations are constant time or
//! bounded by the number of elements actually touched, which yields the
//! usual `O(n log n)` total cost over a run of repeated splits.
//!
//! # Examples
//!
//! Splitting a class of four states after two of them turn out to be
//! distinguishable.
//! ```rust
//! use partition_refinement::{ClassIndex, ElementIndex, Partition};
//!
//! let mut partition = Partition::new(4);
//! let class = partition.add_class();
//! for state in 0..4 {
//!     partition.add(ElementIndex::new(state), class);
//! }
//! assert_eq!(partition.class_size(class), 4);
//!
//! partition.distinguish(ElementIndex::new(1));
//! partition.distinguish(ElementIndex::new(2));
//!
//! let mut worklist: Vec<ClassIndex> = vec![];
//! partition.refine_all(&mut worklist);
//!
//! assert_eq!(partition.num_classes(), 2);
//! assert_eq!(worklist, [ClassIndex::new(1)]);
//! assert_eq!(partition.class_of(ElementIndex::new(1)), ClassIndex::new(1));
//! assert_eq!(partition.class_of(ElementIndex::new(0)), class);
//! ```
//!
//! Enumerating the members of a class once refinement has settled.
//! ```rust
//! use partition_refinement::{ElementIndex, Partition};
//!
//! let mut partition = Partition::new(3);
//! let class = partition.add_class();
//! for state in 0..3 {
//!     partition.add(ElementIndex::new(state), class);
//! }
//!
//! let mut members: Vec<usize> = partition.class_elements(class).map(|e| e.index()).collect();
//! members.sort_unstable();
//! assert_eq!(members, [0, 1, 2]);
//! ```
//!
//! # References
//! + \[Hop71\]: John Hopcroft. “An n log n algorithm for minimizing states in a finite automaton”. <https://doi.org/10.1016/B978-0-12-417750-5.50022-1>.
//! + \[PT87\]: Robert Paige and Robert E. Tarjan. “Three Partition Refinement Algorithms”. <https://doi.org/10.1137/0216062>.

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod index;
mod partition;
mod worklist;

pub use partition::{ClassIndex, ElementIndex, Partition, PartitionIterator};
pub use worklist::Worklist;
