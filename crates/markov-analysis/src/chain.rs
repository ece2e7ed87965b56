//! Full-chain analysis: every stage in order, one owned report.

use markov_core::MarkovGraph;
use markov_core::config::AnalysisConfig;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::AnalysisError;
use crate::graph::{Characteristics, ClassId, LinkSet, classify, condense, decompose, reduce};
use crate::matrix::{
    self, PowerConfig, StationaryResult, power_to_convergence, stationary_distribution,
    sub_chain, transition_matrix,
};

/// Per-class section of a [`ChainReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassReport {
    pub id: ClassId,
    pub name: String,
    pub members: Vec<usize>,
    pub persistent: bool,
    /// Single-member persistent class.
    pub absorbing: bool,
    /// Only for persistent classes.
    pub stationary: Option<StationaryResult>,
    /// Only for persistent classes.
    pub period: Option<usize>,
}

/// Power iteration over the whole chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerSummary {
    pub iterations: usize,
    pub converged: bool,
    /// Final power, one vector per row.
    pub rows: Vec<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReport {
    pub vertex_count: usize,
    pub content_hash: String,
    pub classes: Vec<ClassReport>,
    /// Direct links between classes.
    pub links: LinkSet,
    /// Transitive reduction of `links`.
    pub hasse_links: LinkSet,
    pub characteristics: Characteristics,
    pub limit: PowerSummary,
}

impl ChainReport {
    pub fn persistent_classes(&self) -> impl Iterator<Item = &ClassReport> {
        self.classes.iter().filter(|c| c.persistent)
    }

    pub fn transient_classes(&self) -> impl Iterator<Item = &ClassReport> {
        self.classes.iter().filter(|c| !c.persistent)
    }

    /// Class containing a 1-based vertex.
    #[must_use]
    pub fn class_of(&self, vertex: usize) -> Option<&ClassReport> {
        self.classes
            .iter()
            .find(|c| c.members.binary_search(&vertex).is_ok())
    }

    #[must_use]
    pub const fn is_irreducible(&self) -> bool {
        self.characteristics.is_irreducible
    }
}

/// Run decomposition, condensation, reduction, classification and the
/// matrix engine over `graph`.
///
/// Stationary distributions and periods are computed for persistent classes
/// only. Non-convergence is recorded in the report, never returned as an
/// error.
///
/// # Errors
///
/// Propagates [`AnalysisError`] from decomposition and matrix construction.
#[instrument(skip(graph, config), fields(vertices = graph.vertex_count()))]
pub fn analyze(graph: &MarkovGraph, config: &AnalysisConfig) -> Result<ChainReport, AnalysisError> {
    let partition = decompose(graph)?;
    let links = condense(&partition, graph);
    let hasse_links = reduce(&links);
    let characteristics = classify(&partition, &links);

    let transition = transition_matrix(graph)?;
    let power = PowerConfig::from(config);
    let limit = power_to_convergence(&transition, &power);

    let classes: Vec<ClassReport> = partition
        .classes()
        .iter()
        .map(|class| {
            let persistent = characteristics.is_persistent(class.id.index());
            let (stationary, period) = if persistent {
                let sub = sub_chain(&transition, &class.members);
                (
                    Some(stationary_distribution(&sub, &power)),
                    Some(matrix::period(&sub)),
                )
            } else {
                (None, None)
            };
            ClassReport {
                id: class.id,
                name: class.name(),
                members: class.members.clone(),
                persistent,
                absorbing: persistent && class.len() == 1,
                stationary,
                period,
            }
        })
        .collect();

    info!(
        classes = classes.len(),
        persistent = characteristics.persistent_count(),
        links = links.len(),
        hasse_links = hasse_links.len(),
        converged = limit.converged,
        "chain analysis complete"
    );

    Ok(ChainReport {
        vertex_count: graph.vertex_count(),
        content_hash: graph.content_hash(),
        classes,
        links,
        hasse_links,
        characteristics,
        limit: PowerSummary {
            iterations: limit.iterations,
            converged: limit.converged,
            rows: matrix::rows(&limit.matrix),
        },
    })
}
