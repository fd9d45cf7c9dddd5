//! Tests for TreeBuilder

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use riverine::domain::{DomainError, TreeBuilder, TributaryRecord};
use riverine::util::testing::init_test_setup;

fn create_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write csv file");
    path
}

fn parse_all(lines: &[&str]) -> Vec<TributaryRecord> {
    lines
        .iter()
        .map(|line| TributaryRecord::parse(line).unwrap())
        .collect()
}

#[test]
fn given_valid_records_when_building_then_all_nodes_reachable() {
    init_test_setup();
    let records = parse_all(&[
        "Main,,100.0,Hoover (1936)",
        "Branch1,Main,40.0,",
        "Branch2,Main,30.0,",
        "Branch3,Branch1,10.0,",
    ]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert!(builder.skipped().is_empty());
    assert_eq!(tree.len(), 4);

    let root = tree.root().unwrap();
    let root_node = tree.get(root).unwrap();
    assert_eq!(root_node.data.name, "Main");
    assert_eq!(root_node.data.dams[0].name, "Hoover");

    let left = tree.get(root_node.left.unwrap()).unwrap();
    let right = tree.get(root_node.right.unwrap()).unwrap();
    assert_eq!(left.data.name, "Branch1");
    assert_eq!(right.data.name, "Branch2");

    let grandchild = tree.get(left.left.unwrap()).unwrap();
    assert_eq!(grandchild.data.name, "Branch3");
}

#[test]
fn given_fourth_record_under_parent_with_one_child_when_building_then_takes_right_slot() {
    // Branch1 has only Branch3 on the left, so a further child still fits
    let records = parse_all(&[
        "Main,,100.0,",
        "Branch1,Main,40.0,",
        "Branch2,Main,30.0,",
        "Branch3,Branch1,10.0,",
        "Branch4,Branch1,5.0,",
    ]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert!(builder.skipped().is_empty());
    let root = tree.root().unwrap();
    let b1 = tree.find_by_name(root, "Branch1").unwrap();
    let b1_node = tree.get(b1).unwrap();
    assert_eq!(tree.get(b1_node.right.unwrap()).unwrap().data.name, "Branch4");
}

#[test]
fn given_third_child_record_when_building_then_skips_with_capacity_diagnostic() {
    let records = parse_all(&[
        "Main,,100.0,",
        "Branch1,Main,40.0,",
        "Branch2,Main,30.0,",
        "Branch3,Main,10.0,",
    ]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(builder.skipped().len(), 1);
    let skipped = &builder.skipped()[0];
    assert_eq!(skipped.line, 4);
    assert!(matches!(
        skipped.reason,
        DomainError::CapacityExceeded(ref name) if name == "Main"
    ));
}

#[test]
fn given_orphan_record_when_building_then_skips_and_never_registers_it() {
    let records = parse_all(&[
        "Main,,100.0,",
        "Lost,Ghost,5.0,",
        // references the skipped orphan, so it must be skipped too
        "Lost2,Lost,2.0,",
    ]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(builder.skipped().len(), 2);
    assert!(matches!(
        builder.skipped()[0].reason,
        DomainError::OrphanRecord(ref name) if name == "Ghost"
    ));
    assert!(matches!(
        builder.skipped()[1].reason,
        DomainError::OrphanRecord(ref name) if name == "Lost"
    ));
}

#[test]
fn given_duplicate_name_when_building_then_skips_second_record() {
    let records = parse_all(&[
        "Main,,100.0,",
        "Branch1,Main,40.0,",
        "Branch1,Main,99.0,",
    ]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert_eq!(tree.len(), 2);
    assert!(matches!(
        builder.skipped()[0].reason,
        DomainError::DuplicateName(ref name) if name == "Branch1"
    ));
    // The first Branch1 is untouched
    let root = tree.root().unwrap();
    let b1 = tree.find_by_name(root, "Branch1").unwrap();
    assert_eq!(tree.get(b1).unwrap().data.flow_rate, 40.0);
}

#[test]
fn given_second_root_record_when_building_then_first_root_stands() {
    let records = parse_all(&["Main,,100.0,", "Usurper,,50.0,"]);

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_records(records).unwrap();

    assert_eq!(tree.get(tree.root().unwrap()).unwrap().data.name, "Main");
    assert!(matches!(
        builder.skipped()[0].reason,
        DomainError::DuplicateRoot(ref name) if name == "Usurper"
    ));
}

#[test]
fn given_csv_file_when_building_then_skips_header_and_blank_lines() {
    let temp = TempDir::new().unwrap();
    let path = create_csv(
        &temp,
        "rivers.csv",
        "name,parent,flow_rate,dams\n\
         Main,,100.0,Hoover (1936)\n\
         \n\
         Branch1,Main,40.0,\n",
    );

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_csv(&path).unwrap();

    assert!(builder.skipped().is_empty());
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_csv_with_malformed_flow_rate_when_building_then_skips_that_line_only() {
    let temp = TempDir::new().unwrap();
    let path = create_csv(
        &temp,
        "rivers.csv",
        "name,parent,flow_rate,dams\n\
         Main,,100.0,\n\
         Broken,Main,not-a-number,\n\
         Branch1,Main,40.0,\n",
    );

    let mut builder = TreeBuilder::new();
    let tree = builder.build_from_csv(&path).unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(builder.skipped().len(), 1);
    assert_eq!(builder.skipped()[0].line, 3);
    assert!(matches!(
        builder.skipped()[0].reason,
        DomainError::MalformedNumber { .. }
    ));
}

#[test]
fn given_missing_file_when_building_then_reports_source_unavailable() {
    let mut builder = TreeBuilder::new();

    let result = builder.build_from_csv(Path::new("/nonexistent/rivers.csv"));

    assert!(matches!(result, Err(DomainError::SourceUnavailable(_))));
}

#[test]
fn given_source_without_root_record_when_building_then_reports_no_root() {
    let temp = TempDir::new().unwrap();
    let path = create_csv(
        &temp,
        "rivers.csv",
        "name,parent,flow_rate,dams\nBranch1,Main,40.0,\n",
    );

    let mut builder = TreeBuilder::new();
    let result = builder.build_from_csv(&path);

    assert!(matches!(result, Err(DomainError::NoRoot)));
    // The orphan diagnostic is still available
    assert_eq!(builder.skipped().len(), 1);
}

#[test]
fn given_empty_source_when_building_then_reports_no_root() {
    let temp = TempDir::new().unwrap();
    let path = create_csv(&temp, "rivers.csv", "name,parent,flow_rate,dams\n");

    let mut builder = TreeBuilder::new();
    let result = builder.build_from_csv(&path);

    assert!(matches!(result, Err(DomainError::NoRoot)));
}
