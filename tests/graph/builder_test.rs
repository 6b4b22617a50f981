#[cfg(test)]
mod tests {
    use mica::config::TargetConfig;
    use mica::graph::{DatabaseFilter, GraphBuilder, GraphError};
    use mica::output::jsonl;
    use mica::source::types::{
        ColumnRecord, DatabaseNode, DatabaseRecord, DatasetKind, DatasetRecord, SchemaNode,
        SchemaRecord, SourceTree,
    };
    use mica::system::{AwsGlue, Oracle};
    use std::collections::HashSet;

    fn target() -> TargetConfig {
        TargetConfig {
            project: "p".into(),
            location: "l".into(),
            entry_group: "g".into(),
        }
    }

    fn column(name: &str) -> ColumnRecord {
        ColumnRecord {
            name: Some(name.into()),
            native_type: Some("NUMBER".into()),
            ..Default::default()
        }
    }

    fn dataset(name: &str, kind: DatasetKind) -> DatasetRecord {
        DatasetRecord {
            name: Some(name.into()),
            kind,
            columns: vec![column("id")],
            ..Default::default()
        }
    }

    fn oracle_tree() -> SourceTree {
        SourceTree {
            databases: vec![DatabaseNode {
                record: DatabaseRecord {
                    name: Some("ORCL".into()),
                    ..Default::default()
                },
                schemas: vec![
                    SchemaNode {
                        record: SchemaRecord {
                            name: Some("SALES".into()),
                            ..Default::default()
                        },
                        datasets: vec![
                            dataset("ORDERS", DatasetKind::Table),
                            dataset("V_ORDERS", DatasetKind::View),
                        ],
                    },
                    SchemaNode {
                        record: SchemaRecord {
                            name: Some("HR".into()),
                            ..Default::default()
                        },
                        datasets: vec![dataset("PEOPLE", DatasetKind::Table)],
                    },
                ],
                datasets: vec![],
            }],
            ..Default::default()
        }
    }

    #[test]
    fn traversal_is_root_first_in_listing_order() {
        let target = target();
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let items = builder.build(&oracle_tree()).unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.entry.name.as_str()).collect();
        assert_eq!(names.len(), 7);
        assert!(names[0].ends_with("/entries/db01"));
        assert!(names[1].ends_with("/databases/ORCL"));
        assert!(names[2].ends_with("/database_schemas/SALES"));
        assert!(names[3].ends_with("/tables/ORDERS"));
        assert!(names[4].ends_with("/views/V_ORDERS"));
        assert!(names[5].ends_with("/database_schemas/HR"));
        assert!(names[6].ends_with("/tables/PEOPLE"));
    }

    #[test]
    fn parent_entry_agrees_with_parent_item_name() {
        let target = target();
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let items = builder.build(&oracle_tree()).unwrap();

        let names: HashSet<&str> = items.iter().map(|i| i.entry.name.as_str()).collect();
        for item in &items {
            if item.entry.parent_entry.is_empty() {
                assert!(item.entry.name.ends_with("/entries/db01"));
            } else {
                assert!(
                    names.contains(item.entry.parent_entry.as_str()),
                    "parent of {} not built: {}",
                    item.entry.name,
                    item.entry.parent_entry
                );
            }
        }
    }

    #[test]
    fn aspect_keys_in_sync_for_all_items() {
        let target = target();
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let items = builder.build(&oracle_tree()).unwrap();
        for item in &items {
            assert!(item.aspect_keys_in_sync(), "{} out of sync", item.entry.name);
        }
    }

    #[test]
    fn rebuild_produces_identical_output() {
        let target = target();
        let tree = oracle_tree();

        let serialize = |items: &[mica::graph::ImportItem]| -> Vec<String> {
            items.iter().map(|i| jsonl::to_line(i).unwrap()).collect()
        };

        let mut first = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let mut second = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        assert_eq!(
            serialize(&first.build(&tree).unwrap()),
            serialize(&second.build(&tree).unwrap())
        );
    }

    #[test]
    fn excluded_database_contributes_nothing() {
        let target = target();
        let mut tree = oracle_tree();
        tree.databases[0].record.name = Some("Sales".into());

        let filter = DatabaseFilter::new(vec![], vec!["Sales".into()]);
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", filter);
        let items = builder.build(&tree).unwrap();

        // Only the instance survives; no database node, no descendants.
        assert_eq!(items.len(), 1);
        assert!(items[0].entry.name.ends_with("/entries/db01"));
    }

    #[test]
    fn include_list_is_restrictive_and_exclude_wins() {
        let target = target();
        let mut tree = oracle_tree();
        tree.databases.push(DatabaseNode {
            record: DatabaseRecord {
                name: Some("SCRATCH".into()),
                ..Default::default()
            },
            ..Default::default()
        });

        let filter = DatabaseFilter::new(vec!["ORCL".into()], vec![]);
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", filter);
        assert_eq!(builder.build(&tree).unwrap().len(), 7);

        let filter = DatabaseFilter::new(vec!["ORCL".into()], vec!["ORCL".into()]);
        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", filter);
        assert_eq!(builder.build(&tree).unwrap().len(), 1);
    }

    #[test]
    fn filter_is_case_sensitive_on_raw_names() {
        let filter = DatabaseFilter::new(vec![], vec!["sales".into()]);
        assert!(filter.admits("Sales"));
        assert!(!filter.admits("sales"));
    }

    #[test]
    fn matching_sanitized_schemas_in_different_databases_both_build() {
        let target = target();
        let schema_node = |name: &str| SchemaNode {
            record: SchemaRecord {
                name: Some(name.into()),
                ..Default::default()
            },
            datasets: vec![dataset("T", DatasetKind::Table)],
        };
        let db_node = |db: &str, schema: &str| DatabaseNode {
            record: DatabaseRecord {
                name: Some(db.into()),
                ..Default::default()
            },
            schemas: vec![schema_node(schema)],
            datasets: vec![],
        };
        let tree = SourceTree {
            databases: vec![db_node("DB1", "C##X"), db_node("DB2", "C!!X")],
            ..Default::default()
        };

        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let items = builder.build(&tree).unwrap();

        let schema_names: Vec<&str> = items
            .iter()
            .map(|i| i.entry.name.as_str())
            .filter(|n| n.ends_with("/database_schemas/C!!X"))
            .collect();
        assert_eq!(schema_names.len(), 2);
        assert!(schema_names[0].ends_with("/databases/DB1/database_schemas/C!!X"));
        assert!(schema_names[1].ends_with("/databases/DB2/database_schemas/C!!X"));
    }

    #[test]
    fn missing_database_name_is_fatal() {
        let target = target();
        let mut tree = oracle_tree();
        tree.databases[0].record.name = None;

        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let err = builder.build(&tree).unwrap_err();
        assert!(matches!(
            err,
            GraphError::SourceSchema {
                node: "database",
                field: "name",
                ..
            }
        ));
    }

    #[test]
    fn missing_column_name_fails_the_run() {
        let target = target();
        let mut tree = oracle_tree();
        tree.databases[0].schemas[0].datasets[0]
            .columns
            .push(ColumnRecord::default());

        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let err = builder.build(&tree).unwrap_err();
        assert!(matches!(err, GraphError::SourceSchema { node: "column", .. }));
    }

    #[test]
    fn glue_tree_without_schema_level() {
        let target = target();
        let tree = SourceTree {
            databases: vec![DatabaseNode {
                record: DatabaseRecord {
                    name: Some("analytics".into()),
                    description: Some("events lake".into()),
                    location_uri: Some("s3://lake/analytics".into()),
                    ..Default::default()
                },
                schemas: vec![],
                datasets: vec![dataset("events", DatasetKind::Table)],
            }],
            ..Default::default()
        };

        let mut builder =
            GraphBuilder::new(&target, &AwsGlue, "eu-west-1", DatabaseFilter::default());
        let items = builder.build(&tree).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].entry.entry_source.display_name, "AWS Glue Data Catalog");
        assert_eq!(items[0].entry.entry_source.system, "aws_glue");
        assert!(items[2].entry.parent_entry.ends_with("/databases/analytics"));
        assert_eq!(
            items[2].entry.fully_qualified_name,
            "aws_glue:`eu-west-1`.analytics.events"
        );

        let db_aspect = &items[1].entry.aspects["p.l.aws-glue-database"];
        assert_eq!(db_aspect.data["description"], "events lake");
        assert_eq!(db_aspect.data["location_uri"], "s3://lake/analytics");
    }

    #[test]
    fn entry_source_uses_raw_display_name() {
        let target = target();
        let mut tree = oracle_tree();
        tree.databases[0].schemas[0].record.name = Some("C##APP".into());

        let mut builder = GraphBuilder::new(&target, &Oracle, "db01", DatabaseFilter::default());
        let items = builder.build(&tree).unwrap();

        let schema_item = items
            .iter()
            .find(|i| i.entry.name.ends_with("/database_schemas/C!!APP"))
            .unwrap();
        // Display name keeps the raw spelling; only identifiers sanitize.
        assert_eq!(schema_item.entry.entry_source.display_name, "C##APP");
    }
}
