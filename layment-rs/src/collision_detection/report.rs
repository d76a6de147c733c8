use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::entities::{PlacementId, PrimitiveKey};

/// Number of offending entities per rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutIssues {
    pub out_of_bounds_contours: usize,
    pub collision_contours: usize,
    pub out_of_bounds_primitives: usize,
}

impl LayoutIssues {
    pub fn is_empty(&self) -> bool {
        self.out_of_bounds_contours == 0
            && self.collision_contours == 0
            && self.out_of_bounds_primitives == 0
    }

    /// Message presented to the user, one line per violated rule.
    pub fn message(&self) -> String {
        let mut lines = vec![];
        if self.out_of_bounds_contours + self.out_of_bounds_primitives > 0 {
            lines.push("An element is outside the layment bounds");
        }
        if self.collision_contours > 0 {
            lines.push("Tools are too close to each other");
        }
        match lines.is_empty() {
            true => "Layout is valid and ready to be ordered".to_string(),
            false => lines.join("\n"),
        }
    }
}

/// Outcome of a validation pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    /// Contours whose bounding box leaves the safe area
    pub out_of_bounds_contours: Vec<PlacementId>,
    /// Primitives whose bounding box leaves the safe area
    pub out_of_bounds_primitives: Vec<PrimitiveKey>,
    /// Pairs of contours closer to each other than the clearance
    pub colliding_pairs: Vec<(PlacementId, PlacementId)>,
    /// Contours without geometry, excluded from the silhouette test
    pub unchecked_contours: Vec<PlacementId>,
}

impl ValidationReport {
    /// Every contour involved in at least one collision, sorted and deduplicated
    pub fn colliding_contours(&self) -> Vec<PlacementId> {
        self.colliding_pairs
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .sorted()
            .dedup()
            .collect()
    }

    /// Every contour violating at least one rule
    pub fn offending_contours(&self) -> Vec<PlacementId> {
        self.colliding_contours()
            .into_iter()
            .chain(self.out_of_bounds_contours.iter().copied())
            .sorted()
            .dedup()
            .collect()
    }

    pub fn issues(&self) -> LayoutIssues {
        LayoutIssues {
            out_of_bounds_contours: self.out_of_bounds_contours.len(),
            collision_contours: self.colliding_contours().len(),
            out_of_bounds_primitives: self.out_of_bounds_primitives.len(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.issues().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_distinct_colliding_contours() {
        let report = ValidationReport {
            colliding_pairs: vec![
                (PlacementId(0), PlacementId(1)),
                (PlacementId(1), PlacementId(2)),
            ],
            out_of_bounds_contours: vec![PlacementId(1)],
            ..Default::default()
        };
        let issues = report.issues();
        assert_eq!(issues.collision_contours, 3);
        assert_eq!(issues.out_of_bounds_contours, 1);
        assert_eq!(report.offending_contours().len(), 3);
        assert!(!report.is_ok());
    }

    #[test]
    fn message_lists_violated_rules() {
        let issues = LayoutIssues {
            out_of_bounds_primitives: 1,
            collision_contours: 2,
            ..Default::default()
        };
        assert_eq!(issues.message().lines().count(), 2);
        assert!(LayoutIssues::default().message().contains("valid"));
    }
}
