//! Persistent / transient classification.

use serde::Serialize;
use tracing::{debug, instrument};

use super::condense::LinkSet;
use super::scc::Partition;

/// Chain-level traits derived from the partition and its direct links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Characteristics {
    /// One flag per class, indexed like [`Partition::classes`].
    pub persistent: Vec<bool>,
    /// Vertices forming single-member persistent classes, in class order.
    pub absorbing_states: Vec<usize>,
    pub has_absorbing_state: bool,
    pub is_irreducible: bool,
}

impl Characteristics {
    #[must_use]
    pub fn is_persistent(&self, class: usize) -> bool {
        self.persistent.get(class).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn persistent_count(&self) -> usize {
        self.persistent.iter().filter(|&&p| p).count()
    }

    #[must_use]
    pub fn is_absorbing(&self, vertex: usize) -> bool {
        self.absorbing_states.contains(&vertex)
    }
}

/// Classify every class of `partition`.
///
/// `links` must be the *direct* link set: a class is transient as soon as it
/// has one outgoing link, persistent otherwise.
#[must_use]
#[instrument(skip(partition, links))]
pub fn classify(partition: &Partition, links: &LinkSet) -> Characteristics {
    let persistent: Vec<bool> = (0..partition.class_count())
        .map(|class| !links.has_outgoing(class))
        .collect();

    let absorbing_states: Vec<usize> = partition
        .classes()
        .iter()
        .zip(&persistent)
        .filter(|(class, persistent)| **persistent && class.len() == 1)
        .map(|(class, _)| class.members[0])
        .collect();

    let characteristics = Characteristics {
        has_absorbing_state: !absorbing_states.is_empty(),
        is_irreducible: partition.class_count() == 1,
        persistent,
        absorbing_states,
    };
    debug!(
        persistent = characteristics.persistent_count(),
        absorbing = characteristics.absorbing_states.len(),
        irreducible = characteristics.is_irreducible,
        "classification complete"
    );
    characteristics
}
