use std::path::PathBuf;

use crate::app_config::{Config, RoutingConfig, RoutingLayout, SemesterLabels};
use crate::validation::ClassificationRecord;

// @module: Target folder computation for accepted documents

/// Maps classification records to folders below the output root
#[derive(Debug, Clone)]
pub struct Router {
    // @field: Root and layout
    routing: RoutingConfig,
    // @field: Labels used in semester folder names
    semester_labels: SemesterLabels,
}

impl Router {
    pub fn new(routing: RoutingConfig, semester_labels: SemesterLabels) -> Self {
        Self {
            routing,
            semester_labels,
        }
    }

    // @creates: Router for the configured routing and template labels
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.routing.clone(), config.template.semester_labels.clone())
    }

    /// Folder an accepted document belongs in
    ///
    /// Only resolved names and labels become path segments; the result
    /// depends on nothing but the record and the configuration.
    pub fn route(&self, record: ClassificationRecord) -> PathBuf {
        let mut target = self.routing.output_root.clone();
        let department = record.branch().name.as_str();
        let year = record.year().label.as_str();

        match self.routing.layout {
            RoutingLayout::YearBranch => {
                target.push(year);
                target.push(department);
            }
            RoutingLayout::BranchYearSemester => {
                let semester = record.semester().label(&self.semester_labels);
                target.push(department);
                target.push(year);
                target.push(format!("{}{}", self.routing.semester_folder_prefix, semester));
            }
        }

        target
    }
}
