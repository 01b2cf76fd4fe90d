use std::collections::HashMap;
use std::io::{self, Read};

use colframe_columnar::{ColumnSchema, ColumnType, Value};
use colframe_ingest::{
    load_csv, CsvDataFrameLoader, CsvOptions, CsvTextEncoding, DataFrameLoader, LoadError,
    LoaderConfig, MemoryRecordSource,
};
use pretty_assertions::assert_eq;

/// Serves `data`, then fails every later read.
struct FailingReader {
    data: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::Other, "device went away"));
        }
        self.data.read(buf)
    }
}

fn column(name: &str, column_type: ColumnType) -> ColumnSchema {
    ColumnSchema {
        name: name.to_owned(),
        column_type,
    }
}

#[test]
fn projects_required_columns_and_coerces_numbers() {
    let source = MemoryRecordSource::from_rows(vec![
        vec!["id", "name", "score"],
        vec!["1", "alice", "3.5"],
        vec!["2", "bob", "x"],
    ]);
    let frame = CsvDataFrameLoader::new(source, ["name", "score"])
        .set_column_types(HashMap::from([("score".to_owned(), ColumnType::Numeric)]))
        .load()
        .unwrap();

    assert_eq!(
        frame.schema().columns(),
        &[
            column("name", ColumnType::Text),
            column("score", ColumnType::Numeric)
        ]
    );
    assert_eq!(
        frame.text_lanes(),
        &[vec!["alice".to_owned(), "bob".to_owned()]]
    );
    assert_eq!(frame.numeric_lanes().len(), 1);
    assert_eq!(frame.numeric_lanes()[0][0], 3.5);
    assert!(frame.numeric_lanes()[0][1].is_nan());
}

#[test]
fn output_order_follows_header_not_required_list() {
    let csv = "b,a\n1,2\n";
    let frame = CsvDataFrameLoader::from_reader(csv.as_bytes(), ["a", "b"], &CsvOptions::default())
        .load()
        .unwrap();

    assert_eq!(frame.schema().column_names().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(
        frame.row(0).unwrap().values(),
        vec![Value::Text("1"), Value::Text("2")]
    );
}

#[test]
fn missing_required_column_is_omitted() {
    let csv = "a,b\nx,y\n";
    let config = LoaderConfig::new(["b", "not-there"])
        .with_column_type("not-there", ColumnType::Numeric);
    let frame = load_csv(csv.as_bytes(), &config, &CsvOptions::default()).unwrap();

    assert_eq!(frame.schema().columns(), &[column("b", ColumnType::Text)]);
    assert!(frame.numeric_lanes().is_empty());
    assert_eq!(frame.text_column("b").unwrap(), &["y".to_owned()]);
}

#[test]
fn type_map_entries_for_unrequired_columns_are_ignored() {
    let csv = "a,b\n1,2\n";
    let config = LoaderConfig::new(["b"]).with_column_type("a", ColumnType::Numeric);
    let frame = load_csv(csv.as_bytes(), &config, &CsvOptions::default()).unwrap();

    assert_eq!(frame.schema().columns(), &[column("b", ColumnType::Text)]);
}

#[test]
fn interleaved_types_keep_rows_aligned() {
    let csv = "\
host,region,latency,status,bytes
h1,eu,12.5,ok,100
h2,us,n/a,fail,
h3,ap,7,ok,300
";
    let frame = CsvDataFrameLoader::from_reader(
        csv.as_bytes(),
        ["bytes", "status", "latency", "host"],
        &CsvOptions::default(),
    )
    .column_type("latency", ColumnType::Numeric)
    .column_type("bytes", ColumnType::Numeric)
    .load()
    .unwrap();

    assert_eq!(
        frame.schema().column_names().collect::<Vec<_>>(),
        vec!["host", "latency", "status", "bytes"]
    );
    assert_eq!(frame.num_rows(), 3);

    let row = frame.row(2).unwrap();
    assert_eq!(
        row.values(),
        vec![
            Value::Text("h3"),
            Value::Numeric(7.0),
            Value::Text("ok"),
            Value::Numeric(300.0)
        ]
    );

    let row = frame.row(1).unwrap();
    assert_eq!(row.get_by_name("status"), Some(Value::Text("fail")));
    assert!(frame.numeric_column("latency").unwrap()[1].is_nan());
    assert!(frame.numeric_column("bytes").unwrap()[1].is_nan());
}

#[test]
fn header_only_input_yields_empty_columns() {
    let frame = CsvDataFrameLoader::from_reader(
        "a,b\n".as_bytes(),
        ["a", "b"],
        &CsvOptions::default(),
    )
    .column_type("b", ColumnType::Numeric)
    .load()
    .unwrap();

    assert_eq!(frame.num_rows(), 0);
    assert_eq!(frame.text_lanes(), &[Vec::<String>::new()]);
    assert_eq!(frame.numeric_lanes(), &[Vec::<f64>::new()]);
}

#[test]
fn empty_input_is_an_error() {
    let err = CsvDataFrameLoader::from_reader("".as_bytes(), ["a"], &CsvOptions::default())
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::EmptyInput));
}

#[test]
fn malformed_record_aborts_the_load() {
    let csv = "a,b\n1,2\n3\n";
    let err = CsvDataFrameLoader::from_reader(csv.as_bytes(), ["a"], &CsvOptions::default())
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
}

#[test]
fn duplicate_required_header_aborts_the_load() {
    let csv = "a,a\n1,2\n";
    let err = CsvDataFrameLoader::from_reader(csv.as_bytes(), ["a"], &CsvOptions::default())
        .load()
        .unwrap_err();
    assert!(matches!(err, LoadError::DuplicateColumn { first: 0, second: 1, .. }));
}

#[test]
fn quoted_fields_and_custom_delimiter() {
    let csv = "name;note\n\"Smith; J\";\"said \"\"hi\"\"\"\n";
    let options = CsvOptions {
        delimiter: b';',
        ..CsvOptions::default()
    };
    let frame = CsvDataFrameLoader::from_reader(csv.as_bytes(), ["note", "name"], &options)
        .load()
        .unwrap();

    assert_eq!(frame.text_column("name").unwrap(), &["Smith; J".to_owned()]);
    assert_eq!(frame.text_column("note").unwrap(), &["said \"hi\"".to_owned()]);
}

#[test]
fn windows_1252_input_is_decoded() {
    let options = CsvOptions {
        encoding: CsvTextEncoding::Windows1252,
        ..CsvOptions::default()
    };
    let frame = CsvDataFrameLoader::from_reader(&b"city\nM\xfcnchen\n"[..], ["city"], &options)
        .load()
        .unwrap();
    assert_eq!(frame.text_column("city").unwrap(), &["München".to_owned()]);
}

#[test]
fn loads_from_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "id,value\n1,0.5\n2,-2\n").expect("write csv");

    let frame = CsvDataFrameLoader::from_path(&path, ["value"])
        .unwrap()
        .column_type("value", ColumnType::Numeric)
        .load()
        .unwrap();

    assert_eq!(frame.numeric_column("value").unwrap(), &[0.5, -2.0]);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = CsvDataFrameLoader::from_path(dir.path().join("nope.csv"), ["a"]).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn config_loaded_from_json_drives_the_load() {
    let config: LoaderConfig = serde_json::from_str(
        r#"{ "required_columns": ["score", "name"], "column_types": { "score": "numeric" } }"#,
    )
    .unwrap();
    let frame = load_csv(
        "id,name,score\n1,alice,3.5\n".as_bytes(),
        &config,
        &CsvOptions::default(),
    )
    .unwrap();

    assert_eq!(
        frame.schema().columns(),
        &[
            column("name", ColumnType::Text),
            column("score", ColumnType::Numeric)
        ]
    );
}

#[test]
fn io_error_mid_stream_aborts_the_load() {
    let reader = FailingReader {
        data: b"a,b\n1,2\n3,4\n",
    };
    let err = CsvDataFrameLoader::from_reader(reader, ["a", "b"], &CsvOptions::default())
        .column_type("b", ColumnType::Numeric)
        .load()
        .unwrap_err();

    match err {
        LoadError::Io(e) => {
            assert_eq!(e.kind(), io::ErrorKind::Other);
            assert_eq!(e.to_string(), "device went away");
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn numeric_cells_use_jvm_literal_rules() {
    let csv = "v\ninf\n1.5d\nInfinity\n0x1p3\n";
    let frame = CsvDataFrameLoader::from_reader(csv.as_bytes(), ["v"], &CsvOptions::default())
        .column_type("v", ColumnType::Numeric)
        .load()
        .unwrap();

    let values = frame.numeric_column("v").unwrap();
    assert!(values[0].is_nan());
    assert_eq!(&values[1..], &[1.5, f64::INFINITY, 8.0]);
}
