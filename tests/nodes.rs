use clap::{error::ErrorKind, Parser};

use crate::helper::Workspace;

mod helper;

#[test]
fn test_node_list_is_inserted() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    ws.file("in", "#header\n3 2\n1 2\n2 3\nanswer: 5\n")?;
    ws.casebench(&["nodes", &ws.join("in"), &ws.join("out")])?;
    let out = ws.read("out")?;
    let lines = out.split_inclusive('\n').collect::<Vec<_>>();
    assert_eq!(lines.len(), 6);
    assert_eq!(&lines[..2], &["#header\n", "3 2\n"]);
    let mut nodes = lines[2].split_whitespace().collect::<Vec<_>>();
    nodes.sort();
    assert_eq!(nodes, vec!["1", "2", "3"]);
    assert_eq!(&lines[3..], &["1 2\n", "2 3\n", "answer: 5\n"]);
    // The input is left alone.
    assert_eq!(ws.read("in")?, "#header\n3 2\n1 2\n2 3\nanswer: 5\n");
    Ok(())
}

#[test]
fn test_in_place_transform() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    ws.file("case", "17\n5 3\n5 4\n4 5\n1 4\n")?;
    let path = ws.join("case");
    ws.casebench(&["nodes", &path, &path])?;
    assert_eq!(ws.read("case")?, "17\n5 3\n1 4 5 \n5 4\n4 5\n1 4\n");
    Ok(())
}

#[test]
fn test_short_file_is_rejected() -> anyhow::Result<()> {
    let ws = Workspace::new()?;
    ws.file("in", "17\n5 3\n5 4\n")?;
    let err = ws
        .casebench(&["nodes", &ws.join("in"), &ws.join("out")])
        .unwrap_err();
    assert!(format!("{:#}", err).contains("declares 3 edges but only 1"));
    assert!(!ws.exists("out"));
    Ok(())
}

#[test]
fn test_missing_arguments() {
    let err = casebench::Cli::try_parse_from(["casebench", "nodes", "in"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    let err = casebench::Cli::try_parse_from(["casebench", "nodes"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}
