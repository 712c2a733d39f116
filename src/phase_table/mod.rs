// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Phase-cycling table.
//!
//! Every active TX pulse (amplitude > 0) declares a phase-cycle count, a
//! base phase and a group id. Pulses in the same group step through their
//! phases together; distinct groups nest, group 0 varying slowest. The
//! result is a matrix with one row per acquisition and one column per
//! active pulse.
//!
//! ```text
//! pulse A: group 0, phases [0, 180]
//! pulse B: group 1, phases [0, 120, 240]
//!
//!          A     B
//! row 0    0     0
//! row 1    0   120
//! row 2    0   240
//! row 3  180     0
//! row 4  180   120
//! row 5  180   240
//! ```
//!
//! Group ids are renumbered to dense indices in ascending order before
//! expansion, so ids `{0, 2}` behave like `{0, 1}`. Within a group the
//! shorter phase lists are tiled up to the longest; lengths that do not
//! divide evenly are rejected.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array2;
use tracing::{debug, info};

use crate::error::{Result, ValidationError};
use crate::parameters::{tx, ParameterKind};
use crate::sequence::Sequence;

/// Identifies one parameter of one event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterRef {
    pub event: String,
    pub parameter: String,
}

impl ParameterRef {
    pub fn new(event: &str, parameter: &str) -> Self {
        Self {
            event: event.to_string(),
            parameter: parameter.to_string(),
        }
    }
}

impl fmt::Display for ParameterRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event, self.parameter)
    }
}

/// One column of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseEntry {
    pub key: ParameterRef,
    /// Group id as declared on the pulse.
    pub declared_group: u32,
    /// Dense group index after renumbering.
    pub group: usize,
    /// Phases the pulse declares, before tiling.
    pub phases: Vec<f64>,
}

/// Phase-cycling table of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    entries: Vec<PhaseEntry>,
    group_lengths: Vec<usize>,
    matrix: Array2<f64>,
}

/// Largest number of acquisitions a table may describe.
pub const MAX_TABLE_ROWS: usize = 1 << 20;

/// Members of one dense group and their tiled phase lists.
struct Group {
    columns: Vec<usize>,
    tiled: Vec<Vec<f64>>,
    len: usize,
}

impl PhaseTable {
    /// Build the table for `sequence`.
    ///
    /// A sequence without active TX pulses yields one row and no columns.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PhaseCycle`] if a pulse declares an invalid count
    /// or group, if phase-list lengths in one group do not tile, or if the
    /// row count exceeds [`MAX_TABLE_ROWS`].
    pub fn new(sequence: &Sequence) -> Result<Self> {
        let discovered = discover(sequence)?;
        let entries = renumber(discovered);
        let groups = build_groups(&entries)?;

        let group_lengths: Vec<usize> = groups.iter().map(|g| g.len).collect();
        let n_rows = group_lengths
            .iter()
            .try_fold(1usize, |acc, &len| {
                acc.checked_mul(len).filter(|&n| n <= MAX_TABLE_ROWS)
            })
            .ok_or_else(|| {
                ValidationError::PhaseCycle(format!(
                    "table with group lengths {:?} exceeds {} rows",
                    group_lengths, MAX_TABLE_ROWS
                ))
            })?;

        let rows = expand(&groups, 0);
        debug_assert_eq!(rows.len(), n_rows);

        let mut matrix = Array2::<f64>::zeros((n_rows, entries.len()));
        for (i, row) in rows.iter().enumerate() {
            for &(column, phase) in row {
                matrix[[i, column]] = phase;
            }
        }

        info!(
            sequence = %sequence.name(),
            rows = n_rows,
            columns = entries.len(),
            groups = groups.len(),
            "Built phase table"
        );

        Ok(Self {
            entries,
            group_lengths,
            matrix,
        })
    }

    /// Columns in discovery order.
    pub fn entries(&self) -> &[PhaseEntry] {
        &self.entries
    }

    pub fn entry(&self, key: &ParameterRef) -> Option<&PhaseEntry> {
        self.entries.iter().find(|e| &e.key == key)
    }

    /// Column index of `key`.
    pub fn column(&self, key: &ParameterRef) -> Option<usize> {
        self.entries.iter().position(|e| &e.key == key)
    }

    /// Row count of each dense group, slowest first.
    pub fn group_lengths(&self) -> &[usize] {
        &self.group_lengths
    }

    pub fn n_rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Rows are acquisitions, columns follow [`entries`](Self::entries).
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Phases of one acquisition, keyed by pulse.
    pub fn row(&self, index: usize) -> Option<Vec<(&ParameterRef, f64)>> {
        if index >= self.n_rows() {
            return None;
        }
        Some(
            self.entries
                .iter()
                .zip(self.matrix.row(index).iter())
                .map(|(e, &phase)| (&e.key, phase))
                .collect(),
        )
    }
}

/// Active TX pulses in event order, with raw group ids.
fn discover(sequence: &Sequence) -> Result<Vec<PhaseEntry>> {
    let mut found = Vec::new();
    for event in sequence.events() {
        for parameter in event.parameters() {
            if parameter.kind() != ParameterKind::TxPulse {
                continue;
            }
            if tx::amplitude(parameter)? <= 0.0 {
                continue;
            }
            let declared_group = tx::phase_cycle_group(parameter)?;
            let phases = tx::phases(parameter)?;
            debug!(
                event = %event.name(),
                parameter = %parameter.name(),
                group = declared_group,
                ?phases,
                "Phase-cycled pulse"
            );
            found.push(PhaseEntry {
                key: ParameterRef::new(event.name(), parameter.name()),
                declared_group,
                group: 0,
                phases,
            });
        }
    }
    Ok(found)
}

/// Map declared ids to `0..k` preserving ascending order.
fn renumber(mut entries: Vec<PhaseEntry>) -> Vec<PhaseEntry> {
    let ids: Vec<u32> = entries
        .iter()
        .map(|e| e.declared_group)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    for entry in &mut entries {
        // ids holds every declared group, so the search always hits
        entry.group = ids.binary_search(&entry.declared_group).unwrap_or(0);
    }
    if ids.iter().enumerate().any(|(i, &id)| id as usize != i) {
        debug!(?ids, "Renumbered phase-cycle groups");
    }
    entries
}

fn build_groups(entries: &[PhaseEntry]) -> Result<Vec<Group>> {
    let n_groups = entries.iter().map(|e| e.group + 1).max().unwrap_or(0);
    let mut groups = Vec::with_capacity(n_groups);

    for g in 0..n_groups {
        let members: Vec<(usize, &PhaseEntry)> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.group == g)
            .collect();
        let len = members.iter().map(|(_, e)| e.phases.len()).max().unwrap_or(0);

        let mut columns = Vec::with_capacity(members.len());
        let mut tiled = Vec::with_capacity(members.len());
        for (column, entry) in members {
            let n = entry.phases.len();
            if n == 0 || len % n != 0 {
                return Err(ValidationError::PhaseCycle(format!(
                    "{} has {} phases, which does not tile the {} of group {}",
                    entry.key, n, len, entry.declared_group
                ))
                .into());
            }
            columns.push(column);
            tiled.push(entry.phases.iter().copied().cycle().take(len).collect());
        }
        groups.push(Group {
            columns,
            tiled,
            len,
        });
    }
    Ok(groups)
}

/// Rows for groups `g..`, each a list of `(column, phase)` cells.
///
/// Past the last group there is exactly one empty row.
fn expand(groups: &[Group], g: usize) -> Vec<Vec<(usize, f64)>> {
    let Some(group) = groups.get(g) else {
        return vec![Vec::new()];
    };
    let tail = expand(groups, g + 1);
    let mut rows = Vec::with_capacity(group.len * tail.len());
    for index in 0..group.len {
        for sub in &tail {
            let mut row: Vec<(usize, f64)> = group
                .columns
                .iter()
                .zip(&group.tiled)
                .map(|(&column, phases)| (column, phases[index]))
                .collect();
            row.extend_from_slice(sub);
            rows.push(row);
        }
    }
    rows
}
