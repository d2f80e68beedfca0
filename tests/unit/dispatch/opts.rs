use super::*;

#[test]
fn defaults_match_reference_behaviour() {
    let opts = DebandOpts::default();
    assert_eq!(opts.threads, 1);
    assert_eq!(opts.passes, Passes::Both);
    assert_eq!(opts.column_extent, ColumnExtent::Strip);
    assert!(opts.validate().is_ok());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let opts = DebandOpts::from_json_str(r#"{ "threads": 4 }"#).unwrap();
    assert_eq!(
        opts,
        DebandOpts {
            threads: 4,
            ..DebandOpts::default()
        }
    );

    let opts =
        DebandOpts::from_json_str(r#"{ "passes": "rows_only", "column_extent": "window" }"#)
            .unwrap();
    assert_eq!(opts.passes, Passes::RowsOnly);
    assert_eq!(opts.column_extent, ColumnExtent::Window);
}

#[test]
fn json_rejects_zero_threads_and_unknown_fields() {
    let err = DebandOpts::from_json_str(r#"{ "threads": 0 }"#).unwrap_err();
    assert!(err.to_string().contains("threads"));
    assert!(DebandOpts::from_json_str(r#"{ "strength": 2 }"#).is_err());
    assert!(DebandOpts::from_json_str(r#"{ "passes": "diagonal" }"#).is_err());
}

#[test]
fn opts_round_trip_through_json() {
    let opts = DebandOpts {
        threads: 3,
        passes: Passes::ColumnsOnly,
        column_extent: ColumnExtent::Window,
    };
    let json = serde_json::to_string(&opts).unwrap();
    assert!(json.contains("\"columns_only\""));
    assert_eq!(DebandOpts::from_json_str(&json).unwrap(), opts);
}
