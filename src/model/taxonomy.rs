// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Class display colors and canonical class/cluster ordering.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Fill used for classes the table does not know about.
pub const DEFAULT_CLASS_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyClass {
    name: SmolStr,
    color: SmolStr,
    #[serde(default)]
    clusters: Vec<SmolStr>,
}

impl TaxonomyClass {
    pub fn new(name: impl Into<SmolStr>, color: impl Into<SmolStr>) -> Self {
        Self { name: name.into(), color: color.into(), clusters: Vec::new() }
    }

    pub fn with_clusters<I, S>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.clusters = clusters.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn clusters(&self) -> &[SmolStr] {
        &self.clusters
    }
}

/// Ordered class table.
///
/// Table order is the canonical class order; each class may also list its known clusters in
/// canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    classes: Vec<TaxonomyClass>,
}

impl Taxonomy {
    pub fn new(classes: Vec<TaxonomyClass>) -> Self {
        Self { classes }
    }

    /// The pipeline-stage table shipped with the labeler.
    pub fn builtin() -> &'static Taxonomy {
        static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
        BUILTIN.get_or_init(builtin_taxonomy)
    }

    pub fn classes(&self) -> &[TaxonomyClass] {
        &self.classes
    }

    fn class(&self, class_name: &str) -> Option<&TaxonomyClass> {
        self.classes.iter().find(|class| class.name == class_name)
    }

    pub fn class_color(&self, class_name: &str) -> &str {
        self.class(class_name).map(TaxonomyClass::color).unwrap_or(DEFAULT_CLASS_COLOR)
    }

    pub fn class_rank(&self, class_name: &str) -> Option<usize> {
        self.classes.iter().position(|class| class.name == class_name)
    }

    pub fn cluster_rank(&self, class_name: &str, cluster_name: &str) -> Option<usize> {
        self.class(class_name)?.clusters.iter().position(|cluster| cluster == cluster_name)
    }

    /// Sort key placing known classes in table order and unknown ones after them by name.
    pub fn class_sort_key<'a>(&self, class_name: &'a str) -> (usize, &'a str) {
        match self.class_rank(class_name) {
            Some(rank) => (rank, ""),
            None => (self.classes.len(), class_name),
        }
    }
}

/// Color lookup against the built-in table.
pub fn class_color(class_name: &str) -> &'static str {
    Taxonomy::builtin().class_color(class_name)
}

fn builtin_taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        TaxonomyClass::new("Data_Extraction", "#4e79a7").with_clusters([
            "load_from_url",
            "load_from_sql",
            "load_from_disk",
            "load_from_csv",
            "load_from_zip",
            "prepare_data_loader",
        ]),
        TaxonomyClass::new("Data_Transform", "#f28e2b").with_clusters([
            "feature_engineering",
            "sort_values",
            "drop_column",
            "concatenate",
            "create_dataframe",
            "split",
            "filter",
            "randomize_order",
            "data_type_conversions",
            "correct_missing_values",
            "normalization",
            "remove_duplicates",
            "categorify",
            "prepare_x_and_y",
            "augment",
            "merge",
            "groupby",
            "rename_columns",
            "string_transform",
        ]),
        TaxonomyClass::new("Visualization", "#59a14f").with_clusters([
            "distribution",
            "missing_values",
            "learning_history",
            "wandb",
            "plot_predictions",
            "time_series",
            "model_coefficients",
            "heatmap",
            "relationship",
            "plot_metrics",
            "images",
        ]),
        TaxonomyClass::new("Model_Evaluation", "#9c755f").with_clusters([
            "statistical_test",
            "predict_on_test",
            "compute_test_metric",
        ]),
        TaxonomyClass::new("Environment", "#f28e2b").with_clusters([
            "import_modules",
            "set_options",
            "install_modules",
        ]),
        TaxonomyClass::new("Exploratory_Data_Analysis", "#edc948").with_clusters([
            "count_data_types",
            "count_duplicates",
            "count_missing_values",
            "count_unique_values",
            "count_values",
        ]),
        TaxonomyClass::new("Model_Interpretation", "#bab0ac").with_clusters(["features_selection"]),
        TaxonomyClass::new("Data_Export", "#e15759")
            .with_clusters(["save_to_csv", "prepare_output"]),
        TaxonomyClass::new("Hyperparam_Tuning", "#b07aa1").with_clusters([
            "find_best_score",
            "find_best_params",
            "find_best_model_class",
            "define_search_space",
            "train_on_grid",
            "define_search_model",
        ]),
        TaxonomyClass::new("Debug", "#76b7b2").with_clusters([
            "show_table_attributes",
            "show_table",
            "show_unique_values",
            "show_shape",
            "show_data_types",
            "show_columns",
            "commented_code",
            "list_files",
        ]),
        TaxonomyClass::new("Model_Train", "#ff9da7").with_clusters([
            "choose_model_class",
            "train_model",
            "predict_on_train",
            "compute_train_metric",
            "load_pretrained",
            "save_model",
            "init_hyperparams",
            "build_layers",
        ]),
        TaxonomyClass::new("Other", DEFAULT_CLASS_COLOR).with_clusters([
            "something_strange",
            "define_variables",
            "not_enough_vertices",
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::{class_color, Taxonomy, TaxonomyClass, DEFAULT_CLASS_COLOR};

    #[test]
    fn known_class_has_its_color() {
        assert_eq!(class_color("Data_Extraction"), "#4e79a7");
        assert_eq!(class_color("Model_Train"), "#ff9da7");
    }

    #[test]
    fn unknown_class_falls_back_to_neutral() {
        assert_eq!(class_color("Astrology"), DEFAULT_CLASS_COLOR);
    }

    #[test]
    fn unknown_classes_sort_after_known_by_name() {
        let taxonomy = Taxonomy::builtin();
        let mut names = vec!["Zeta", "Debug", "Alpha", "Data_Extraction"];
        names.sort_by_key(|name| taxonomy.class_sort_key(name));
        assert_eq!(names, vec!["Data_Extraction", "Debug", "Alpha", "Zeta"]);
    }

    #[test]
    fn cluster_rank_is_scoped_to_class() {
        let taxonomy = Taxonomy::new(vec![
            TaxonomyClass::new("A", "#000").with_clusters(["x", "y"]),
            TaxonomyClass::new("B", "#111").with_clusters(["y"]),
        ]);
        assert_eq!(taxonomy.cluster_rank("A", "y"), Some(1));
        assert_eq!(taxonomy.cluster_rank("B", "y"), Some(0));
        assert_eq!(taxonomy.cluster_rank("B", "x"), None);
        assert_eq!(taxonomy.cluster_rank("C", "x"), None);
    }

    #[test]
    fn custom_table_deserializes_from_json() {
        let taxonomy: Taxonomy =
            serde_json::from_str(r##"[{"name":"Load","color":"#123456"}]"##).unwrap();
        assert_eq!(taxonomy.class_color("Load"), "#123456");
        assert_eq!(taxonomy.class_rank("Load"), Some(0));
    }
}
