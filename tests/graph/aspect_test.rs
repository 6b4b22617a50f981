#[cfg(test)]
mod tests {
    use mica::config::TargetConfig;
    use mica::graph::aspect::{build_aspects, NodeRecord};
    use mica::graph::{GraphError, NameBuilder, SCHEMA_ASPECT_KEY};
    use mica::source::types::{ColumnRecord, DatabaseRecord, DatasetKind, DatasetRecord};
    use mica::system::{NodeType, Oracle};
    use serde_json::json;

    fn target() -> TargetConfig {
        TargetConfig {
            project: "p".into(),
            location: "l".into(),
            entry_group: "g".into(),
        }
    }

    fn column(name: &str, native: &str) -> ColumnRecord {
        ColumnRecord {
            name: Some(name.into()),
            native_type: Some(native.into()),
            ..Default::default()
        }
    }

    #[test]
    fn keys_match_map_for_every_node_type() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let (aspects, keys) =
            build_aspects(&names, NodeType::Instance, NodeRecord::Instance).unwrap();
        assert_eq!(keys, vec!["p.l.oracle-instance".to_string()]);
        assert_eq!(
            aspects.keys().cloned().collect::<Vec<_>>(),
            keys,
            "aspect_keys must be a pure projection of the map"
        );

        let dataset = DatasetRecord {
            name: Some("ORDERS".into()),
            columns: vec![column("ID", "NUMBER")],
            ..Default::default()
        };
        let (aspects, keys) =
            build_aspects(&names, NodeType::Table, NodeRecord::Dataset(&dataset)).unwrap();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(
            keys,
            vec![SCHEMA_ASPECT_KEY.to_string(), "p.l.oracle-table".to_string()]
        );
        assert!(aspects.contains_key(SCHEMA_ASPECT_KEY));
        assert!(aspects.contains_key("p.l.oracle-table"));
    }

    #[test]
    fn schema_field_shape() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let dataset = DatasetRecord {
            name: Some("T".into()),
            columns: vec![column("id", "NUMBER")],
            ..Default::default()
        };
        let (aspects, _) =
            build_aspects(&names, NodeType::Table, NodeRecord::Dataset(&dataset)).unwrap();

        let fields = &aspects[SCHEMA_ASPECT_KEY].data["fields"];
        assert_eq!(
            fields[0],
            json!({
                "name": "id",
                "dataType": "NUMBER",
                "metadataType": "NUMBER",
                "mode": "NULLABLE",
                "description": "",
            })
        );
    }

    #[test]
    fn explicit_nullability_sets_mode() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let dataset = DatasetRecord {
            name: Some("T".into()),
            columns: vec![
                ColumnRecord {
                    name: Some("pk".into()),
                    native_type: Some("NUMBER".into()),
                    nullable: Some(false),
                    ..Default::default()
                },
                ColumnRecord {
                    name: Some("note".into()),
                    native_type: Some("CLOB".into()),
                    nullable: Some(true),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let (aspects, _) =
            build_aspects(&names, NodeType::Table, NodeRecord::Dataset(&dataset)).unwrap();

        let fields = aspects[SCHEMA_ASPECT_KEY].data["fields"].as_array().unwrap();
        assert_eq!(fields[0]["mode"], "REQUIRED");
        assert_eq!(fields[1]["mode"], "NULLABLE");
    }

    #[test]
    fn column_order_is_preserved() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let dataset = DatasetRecord {
            name: Some("T".into()),
            columns: vec![column("z", "NUMBER"), column("a", "NUMBER")],
            ..Default::default()
        };
        let (aspects, _) =
            build_aspects(&names, NodeType::Table, NodeRecord::Dataset(&dataset)).unwrap();

        let fields = aspects[SCHEMA_ASPECT_KEY].data["fields"].as_array().unwrap();
        assert_eq!(fields[0]["name"], "z");
        assert_eq!(fields[1]["name"], "a");
    }

    #[test]
    fn database_aspect_defaults_missing_fields_to_empty() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let record = DatabaseRecord {
            name: Some("ORCL".into()),
            ..Default::default()
        };
        let (aspects, keys) =
            build_aspects(&names, NodeType::Database, NodeRecord::Database(&record)).unwrap();

        let data = &aspects["p.l.oracle-database"].data;
        assert_eq!(data["description"], "");
        assert_eq!(data["location_uri"], "");
        assert_eq!(data["parameters"], json!({}));
        assert_eq!(keys, vec!["p.l.oracle-database".to_string()]);
    }

    #[test]
    fn unnamed_column_is_fatal() {
        let target = target();
        let names = NameBuilder::new(&target, &Oracle, "db01");

        let dataset = DatasetRecord {
            name: Some("BROKEN".into()),
            kind: DatasetKind::Table,
            columns: vec![ColumnRecord {
                native_type: Some("NUMBER".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let err = build_aspects(&names, NodeType::Table, NodeRecord::Dataset(&dataset))
            .unwrap_err();
        assert!(matches!(
            err,
            GraphError::SourceSchema {
                node: "column",
                field: "name",
                ..
            }
        ));
    }
}
