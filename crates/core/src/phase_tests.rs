// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn default_order_is_fifty() {
    assert_eq!(PhaseOrder::default(), PhaseOrder(50));
}

#[test]
fn empty_where_matches_all_guests() {
    assert!(Where::any().matches_all_guests());
    assert!(!Where(vec!["client".into()]).matches_all_guests());
}

#[test]
fn sort_phases_orders_by_order_then_source_then_id() {
    let mut phases = vec![
        Phase::new("prepare/b", StepKind::Prepare, "shell", 1).with_order(50),
        Phase::new("prepare/a", StepKind::Prepare, "shell", 0).with_order(50),
        Phase::new("prepare/z", StepKind::Prepare, "install", 2).with_order(10),
    ];
    sort_phases(&mut phases);
    let ids: Vec<&str> = phases.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prepare/z", "prepare/a", "prepare/b"]);
}

#[test]
fn sort_phases_breaks_ties_on_id_when_order_and_source_index_match() {
    let mut phases = vec![
        Phase::new("prepare/zzz", StepKind::Prepare, "shell", 0).with_order(50),
        Phase::new("prepare/aaa", StepKind::Prepare, "shell", 0).with_order(50),
    ];
    sort_phases(&mut phases);
    let ids: Vec<&str> = phases.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["prepare/aaa", "prepare/zzz"]);
}
