use acr_dump::cli::Cli;
use acr_dump::config::Config;
use acr_nema::Status;
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

/// Implicit little-endian record
fn record(group: u16, element: u16, value: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&group.to_le_bytes());
    out.extend_from_slice(&element.to_le_bytes());
    out.extend_from_slice(&(value.len() as u32).to_le_bytes());
    out.extend_from_slice(value);
    out
}

fn message_file(records: &[Vec<u8>]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    for r in records {
        file.write_all(r).expect("write record");
    }
    file.flush().expect("flush");
    file
}

fn dump(args: &[&str], config: &Config) -> (anyhow::Result<Status>, String, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("valid arguments");
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = acr_dump::run(&cli, config, &mut out, &mut err);
    (
        result,
        String::from_utf8(out).expect("utf8 stdout"),
        String::from_utf8(err).expect("utf8 stderr"),
    )
}

fn sample() -> Vec<Vec<u8>> {
    vec![
        record(0x0008, 0x0060, b"MR"),
        record(0x0010, 0x0010, b"DOE^JANE"),
        record(0x0028, 0x0010, &512u16.to_le_bytes()),
    ]
}

#[test]
fn test_dumps_file_with_quiet_status() {
    let file = message_file(&sample());
    let path = file.path().to_str().unwrap();

    let (result, out, err) = dump(&["acr-dump", path], &Config::default());

    assert_eq!(result.unwrap(), Status::Ok);
    assert!(err.is_empty());
    let expected = "\
Group 0x0008 (1 element)
    0x0008  0x0060  cs  length = 2     : \"MR\"
Group 0x0010 (1 element)
    0x0010  0x0010  pn  length = 8     : \"DOE^JANE\"
Group 0x0028 (1 element)
    0x0028  0x0010  us  length = 2     : 512
";
    assert_eq!(out, expected);
}

#[test]
fn test_max_group_argument_bounds_the_dump() {
    let file = message_file(&sample());
    let path = file.path().to_str().unwrap();

    let (result, out, err) = dump(&["acr-dump", path, "0x10"], &Config::default());

    assert_eq!(result.unwrap(), Status::Ok);
    assert!(err.is_empty());
    assert!(out.contains("Group 0x0010"));
    assert!(!out.contains("Group 0x0028"));
}

#[test]
fn test_truncated_input_still_dumps_and_reports_status() {
    let mut records = sample();
    let last = records.pop().unwrap();
    records.push(last[..5].to_vec());
    let file = message_file(&records);
    let path = file.path().to_str().unwrap();

    let (result, out, err) = dump(&["acr-dump", path], &Config::default());

    assert_eq!(result.unwrap(), Status::AbnormalEndOfInput);
    assert!(out.contains("\"DOE^JANE\""));
    assert_eq!(err, "Finished with status 'Abnormal end of input'\n");
}

#[test]
fn test_ignore_errors_flag_skips_bad_record() {
    let records = vec![
        record(0x0008, 0x0060, b"MR"),
        record(0x0009, 0x1001, b"ODD"),
        record(0x0010, 0x0010, b"DOE^JANE"),
    ];
    let file = message_file(&records);
    let path = file.path().to_str().unwrap();

    let (strict, strict_out, strict_err) = dump(&["acr-dump", path], &Config::default());
    assert_eq!(strict.unwrap(), Status::ProtocolError);
    assert!(!strict_out.contains("DOE^JANE"));
    assert_eq!(strict_err, "Finished with status 'Protocol error'\n");

    let (tolerant, tolerant_out, tolerant_err) =
        dump(&["acr-dump", "-i", path], &Config::default());
    assert_eq!(tolerant.unwrap(), Status::Ok);
    assert!(tolerant_out.contains("DOE^JANE"));
    assert!(!tolerant_out.contains("Group 0x0009"));
    assert!(tolerant_err.is_empty());
}

#[test]
fn test_config_policy_applies_without_flag() {
    let records = vec![
        record(0x0008, 0x0060, b"MR"),
        record(0x0009, 0x1001, b"ODD"),
        record(0x0010, 0x0010, b"DOE^JANE"),
    ];
    let file = message_file(&records);
    let path = file.path().to_str().unwrap();

    let config = Config::from_toml(
        r#"
        [decode]
        policy = "tolerant"
        "#,
    )
    .expect("config");
    let (result, out, _) = dump(&["acr-dump", path], &config);
    assert_eq!(result.unwrap(), Status::Ok);
    assert!(out.contains("DOE^JANE"));
}

#[test]
fn test_names_flag_adds_keywords() {
    let file = message_file(&sample());
    let path = file.path().to_str().unwrap();

    let (_, out, _) = dump(&["acr-dump", "-n", path], &Config::default());
    assert!(out.contains("[PatientName]"));
    assert!(out.contains("[Rows]"));
}

#[test]
fn test_forced_big_endian_on_little_data_does_not_fail_the_run() {
    let file = message_file(&sample());
    let path = file.path().to_str().unwrap();

    let (result, _, err) = dump(&["acr-dump", "-b", path], &Config::default());
    let status = result.expect("decode errors are not operational errors");
    assert!(!status.is_quiet());
    assert!(err.starts_with("Finished with status '"));
}

#[test]
fn test_empty_file_produces_no_output() {
    let file = message_file(&[]);
    let path = file.path().to_str().unwrap();

    let (result, out, err) = dump(&["acr-dump", path], &Config::default());
    assert_eq!(result.unwrap(), Status::Ok);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_missing_file_is_an_operational_error() {
    let (result, out, err) = dump(
        &["acr-dump", "/nonexistent/dir/message.acr"],
        &Config::default(),
    );
    let error = result.unwrap_err();
    assert!(error.to_string().contains("Error opening file"));
    assert!(out.is_empty());
    assert!(err.is_empty());
}
