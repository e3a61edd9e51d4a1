//! Re-export [`HashTable`] from [hashbrown] crate.
//!
//! Used for containers whose keys carry their own hashing rules,
//! e.g. dynamic values where the table cannot rely on `K: Hash + Eq`.

use hashbrown::hash_table as hb;

pub use hb::HashTable;

pub use hb::{AbsentEntry, Entry, OccupiedEntry, VacantEntry};
pub use hb::{IntoIter, Iter, IterMut};
