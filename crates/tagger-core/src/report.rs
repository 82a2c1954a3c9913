// SPDX-License-Identifier: Apache-2.0

//! Area-owner report.
//!
//! Counts open work per area category and how much of it still lacks a type
//! label. Categories and label ids come from configuration; ids that the
//! repository does not know are ignored, and a category left with no known
//! id is reported as skipped.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::query::{find_label_by_id, has_any_label_id};
use crate::types::{Issue, Label};

/// A named group of labels that one owner is responsible for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCategory {
    /// Display name of the category.
    pub name: String,
    /// Label ids that put an issue in this category.
    pub label_ids: Vec<u64>,
}

/// Inputs of the area report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaReportSpec {
    /// Issues with any of these labels are left out entirely.
    pub ignore_label_ids: Vec<u64>,
    /// An issue with none of these labels counts as missing a type.
    pub type_label_ids: Vec<u64>,
    /// Categories to report, in order.
    pub areas: Vec<AreaCategory>,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AreaRow {
    /// The category resolved to at least one repository label.
    Counted {
        /// Category name.
        name: String,
        /// Included issues in the category.
        count: usize,
        /// Of those, issues without a type label.
        missing_types: usize,
    },
    /// None of the category's label ids exist in the repository.
    Skipped {
        /// Category name.
        name: String,
    },
}

impl fmt::Display for AreaRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaRow::Counted {
                name,
                count,
                missing_types,
            } => {
                write!(f, "{name}\t{count}")?;
                if *missing_types > 0 {
                    write!(f, " (Missing Types: {missing_types})")?;
                }
                Ok(())
            }
            AreaRow::Skipped { name } => write!(f, "{name}\tskipped (no known labels)"),
        }
    }
}

/// Resolves configured ids against the repository labels, warning on unknown ids.
fn resolve_ids(labels: &[Label], ids: &[u64], context: &str) -> Vec<u64> {
    ids.iter()
        .filter_map(|&id| {
            let found = find_label_by_id(labels, id).map(|l| l.id);
            if found.is_none() {
                warn!(label_id = id, context, "Label id not found in repository");
            }
            found
        })
        .collect()
}

/// Builds the area-owner report.
#[must_use]
pub fn area_report(issues: &[Issue], labels: &[Label], spec: &AreaReportSpec) -> Vec<AreaRow> {
    let ignore_ids = resolve_ids(labels, &spec.ignore_label_ids, "ignore");
    let type_ids = resolve_ids(labels, &spec.type_label_ids, "type");

    let included: Vec<&Issue> = issues
        .iter()
        .filter(|i| !has_any_label_id(i, &ignore_ids))
        .collect();

    spec.areas
        .iter()
        .map(|area| {
            let ids = resolve_ids(labels, &area.label_ids, &area.name);
            if ids.is_empty() {
                warn!(area = %area.name, "Skipping area with no known labels");
                return AreaRow::Skipped {
                    name: area.name.clone(),
                };
            }

            let in_area: Vec<&&Issue> = included
                .iter()
                .filter(|i| has_any_label_id(i, &ids))
                .collect();
            let missing_types = in_area
                .iter()
                .filter(|i| !has_any_label_id(i, &type_ids))
                .count();

            AreaRow::Counted {
                name: area.name.clone(),
                count: in_area.len(),
                missing_types,
            }
        })
        .collect()
}
