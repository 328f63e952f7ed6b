// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Cellgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Cellgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;
use serde_json::json;

use super::{input_schema, normalize, CellInput, MissingTitleWarning, NotebookInput, VizDocument};
use crate::model::{CellId, DocumentId};
use crate::query::group;

fn parse(value: serde_json::Value) -> VizDocument {
    serde_json::from_value(value).expect("viz document")
}

#[test]
fn preserves_per_document_order_and_tags_document_ids() {
    let doc = parse(json!({
        "notebooks": [
            { "notebook_id": 2, "cells": [
                { "cell_id": 1, "code": "a", "class": "Extract", "cluster": "c1" },
                { "cell_id": 4, "code": "b", "class": "Transform", "cluster": "c2" }
            ]},
            { "notebook_id": 1, "cells": [
                { "cell_id": 1, "code": "c", "class": "Extract", "cluster": "c1" }
            ]}
        ]
    }));

    let normalized = normalize(&doc.notebooks, doc.cluster_titles()).unwrap();
    let keys = normalized
        .records()
        .iter()
        .map(|record| (record.document_id().get(), record.cell_id().get(), record.code()))
        .collect::<Vec<_>>();
    assert_eq!(keys, vec![(2, 1, "a"), (2, 4, "b"), (1, 1, "c")]);
    assert!(normalized.warnings().is_empty());
    assert_eq!(doc.document_ids(), vec![DocumentId::new(2), DocumentId::new(1)]);
}

#[test]
fn empty_notebook_list_is_no_data_not_an_error() {
    let doc = parse(json!({ "notebooks": [] }));
    let normalized = normalize(&doc.notebooks, None).unwrap();
    assert!(normalized.records().is_empty());
}

#[rstest]
#[case::object(json!({ "cell_id": 1 }), "an object")]
#[case::string(json!("cells"), "a string")]
#[case::null(json!(null), "null")]
fn non_array_cells_are_malformed(#[case] cells: serde_json::Value, #[case] kind: &str) {
    let doc = parse(json!({ "notebooks": [ { "notebook_id": 7, "cells": cells } ] }));
    let err = normalize(&doc.notebooks, None).unwrap_err();
    assert_eq!(err.document_id, Some(DocumentId::new(7)));
    assert_eq!(err.document_index, Some(0));
    assert_eq!(err.cell_index, None);
    assert!(err.reason.contains(kind), "unexpected reason: {}", err.reason);
}

#[rstest]
#[case::missing_class(json!({ "cell_id": 1, "code": "x", "cluster": "c" }))]
#[case::cell_id_not_integer(json!({ "cell_id": "one", "code": "x", "class": "A" }))]
#[case::not_an_object(json!(3))]
fn bad_cell_shape_is_malformed(#[case] cell: serde_json::Value) {
    let doc = parse(json!({
        "notebooks": [ { "notebook_id": 1, "cells": [
            { "cell_id": 0, "code": "ok", "class": "A", "cluster": "c" },
            cell
        ] } ]
    }));
    let err = normalize(&doc.notebooks, None).unwrap_err();
    assert_eq!(err.cell_index, Some(1));
}

#[test]
fn non_increasing_cell_ids_are_malformed() {
    let doc = parse(json!({
        "notebooks": [ { "notebook_id": 1, "cells": [
            { "cell_id": 3, "code": "a", "class": "A", "cluster": "c" },
            { "cell_id": 3, "code": "b", "class": "A", "cluster": "c" }
        ] } ]
    }));
    let err = normalize(&doc.notebooks, None).unwrap_err();
    assert_eq!(err.cell_index, Some(1));
    assert!(err.to_string().contains("does not increase"));
}

#[test]
fn repeated_notebook_entry_with_same_cells_is_malformed() {
    let cells = vec![CellInput::new(1, "a", "A", "c")];
    let notebooks = vec![
        NotebookInput::new(DocumentId::new(5), cells.clone()),
        NotebookInput::new(DocumentId::new(5), cells),
    ];
    let err = normalize(&notebooks, None).unwrap_err();
    assert_eq!(err.document_index, Some(1));
    assert!(err.reason.contains("appears twice"));
}

#[test]
fn resolves_titles_in_wrapped_and_bare_forms() {
    let doc = parse(json!({
        "notebooks": [ { "notebook_id": 1, "cells": [
            { "cell_id": 1, "code": "a", "class": "Data_Extraction", "cluster": 0 },
            { "cell_id": 2, "code": "b", "class": "Visualization", "cluster": "3" },
            { "cell_id": 3, "code": "c", "class": "Visualization", "cluster": 9 }
        ] } ],
        "metadata": { "clusters": {
            "Data_Extraction": { "titles": { "0": "Load CSV" } },
            "Visualization": { "3": ["Histograms", "Plots value distributions"] }
        } }
    }));

    let normalized = normalize(&doc.notebooks, doc.cluster_titles()).unwrap();
    let records = normalized.records();
    assert_eq!(records[0].cluster_name(), "Load CSV");
    assert_eq!(records[0].cluster_key(), "0");
    assert_eq!(records[1].cluster_name(), "Histograms");
    assert_eq!(records[2].cluster_name(), "9");
    assert_eq!(records[0].cluster_description(), None);
    assert_eq!(records[1].cluster_description(), Some("Plots value distributions"));
    assert_eq!(records[2].cluster_description(), None);

    let groups = group(records);
    let visualization = groups.class("Visualization").unwrap();
    assert_eq!(
        visualization.cluster("Histograms").unwrap().description(),
        Some("Plots value distributions")
    );
    assert_eq!(visualization.cluster("9").unwrap().description(), None);
    assert_eq!(
        normalized.warnings(),
        &[MissingTitleWarning { class_name: "Visualization".into(), cluster_key: "9".into() }]
    );
}

#[test]
fn missing_title_is_reported_once_per_cluster() {
    let doc = parse(json!({
        "notebooks": [
            { "notebook_id": 1, "cells": [ { "cell_id": 1, "code": "a", "class": "A", "cluster": 1 } ] },
            { "notebook_id": 2, "cells": [ { "cell_id": 1, "code": "b", "class": "A", "cluster": 1 } ] }
        ],
        "metadata": { "clusters": { "A": { "titles": { "1": "" } } } }
    }));
    let normalized = normalize(&doc.notebooks, doc.cluster_titles()).unwrap();
    assert_eq!(normalized.warnings().len(), 1);
    assert!(normalized.records().iter().all(|record| record.cluster_name() == "1"));
}

#[test]
fn legacy_input_without_metadata_uses_raw_ids_silently() {
    let doc = parse(json!({
        "notebooks": [ { "notebook_id": 1, "cells": [
            { "cell_id": 1, "code": "a", "class": "A", "cluster": "raw" },
            { "cell_id": 2, "code": "b", "class": "A" }
        ] } ]
    }));
    let normalized = normalize(&doc.notebooks, doc.cluster_titles()).unwrap();
    assert!(normalized.warnings().is_empty());
    assert_eq!(normalized.records()[0].cluster_name(), "raw");
    assert_eq!(normalized.records()[1].cluster_name(), super::UNCLUSTERED_KEY);
    assert_eq!(normalized.records()[1].cell_id(), CellId::new(2));
}

#[test]
fn schema_describes_notebook_cells() {
    let schema = serde_json::to_value(input_schema()).unwrap();
    let text = schema.to_string();
    assert!(text.contains("notebook_id"));
    assert!(text.contains("cell_id"));
}
