//! Tests for the editing session: edits, validation, mode and stale replies

use hungaro::pipeline::{
    AssignType, CostMatrix, MatrixError, Session, SessionError,
};

#[path = "common/mod.rs"]
mod common;

fn payroll_session() -> Session {
    let (matrix, rows, cols) = common::payroll_fixture();
    Session::from_matrix(&matrix, &rows, &cols).unwrap()
}

#[test]
fn test_new_session_is_blank() {
    let session = Session::new(2, 3).unwrap();

    assert_eq!(session.rows(), 2);
    assert_eq!(session.cols(), 3);
    assert_eq!(session.cell(1, 2), Some(""));
    assert_eq!(session.row_labels(), &["", ""]);
    assert_eq!(session.mode(), AssignType::Min);
    assert!(session.result().is_none());
    assert!(!session.is_pending());
}

#[test]
fn test_new_session_rejects_zero_dimensions() {
    assert_eq!(
        Session::new(0, 3).unwrap_err(),
        SessionError::InvalidDimensions { rows: 0, cols: 3 }
    );
    assert!(Session::new(2, 0).is_err());
}

#[test]
fn test_from_matrix_rejects_ragged_input() {
    let ragged = CostMatrix::new(vec![vec![1.0, 2.0], vec![3.0]]);
    let err = Session::from_matrix(&ragged, &[], &[]).unwrap_err();
    assert!(matches!(
        err,
        SessionError::InvalidMatrix(MatrixError::Ragged { row: 2, .. })
    ));
}

#[test]
fn test_edits_flow_into_cost_matrix() {
    let mut session = Session::new(2, 2).unwrap();

    assert!(session.set_cell(0, 0, "12.5"));
    assert!(session.set_cell(0, 1, "abc"));
    assert!(session.set_cell(1, 0, "-3"));
    assert!(session.set_cell(1, 1, "7"));
    assert!(!session.set_cell(2, 0, "1"));

    assert_eq!(
        session.cost_matrix().rows(),
        &[vec![12.5, 0.0], vec![0.0, 7.0]]
    );
}

#[test]
fn test_label_edits() {
    let mut session = Session::new(2, 2).unwrap();

    assert!(session.set_row_label(1, "Luis"));
    assert!(session.set_col_label(0, "Cashier"));
    assert!(!session.set_col_label(5, "Nope"));

    assert_eq!(session.row_labels(), &["", "Luis"]);
    assert_eq!(session.col_labels(), &["Cashier", ""]);
}

#[test]
fn test_begin_calculation_builds_request_and_preview() {
    let mut session = payroll_session();
    session.set_mode(AssignType::Max);

    let calculation = session.begin_calculation().unwrap();

    assert_eq!(calculation.id, 1);
    assert_eq!(calculation.request.assign_type, AssignType::Max);
    assert_eq!(
        calculation.request.cost_matrix.rows(),
        &[vec![10.0, 20.0], vec![30.0, 5.0]]
    );
    assert!(session.is_pending());

    let preview = session.displayed_reduced().unwrap();
    assert_eq!(preview.rows(), &[vec![0.0, 10.0], vec![25.0, 0.0]]);
}

#[test]
fn test_apply_response_updates_derived_views() {
    let mut session = payroll_session();
    session.set_mode(AssignType::Max);
    let calculation = session.begin_calculation().unwrap();

    assert!(session.apply_response(calculation, common::payroll_response()));
    assert!(!session.is_pending());

    assert_eq!(
        session.report().lines(),
        vec![
            "Ana va a trabajar como Clerk, cobrando Q20.00",
            "Luis va a trabajar como Cashier, cobrando Q30.00",
        ]
    );
    assert_eq!(session.total_cost(), 50.0);
    assert_eq!(session.chart().len(), 2);
}

#[test]
fn test_mode_switch_reads_other_result() {
    let mut session = payroll_session();
    let calculation = session.begin_calculation().unwrap();
    session.apply_response(calculation, common::payroll_response());

    assert_eq!(session.total_cost(), 15.0);
    session.set_mode(AssignType::Max);
    assert_eq!(session.total_cost(), 50.0);
}

#[test]
fn test_missing_result_degrades_to_empty_report() {
    let mut session = payroll_session();
    session.set_mode(AssignType::Max);
    let calculation = session.begin_calculation().unwrap();

    let reply = common::response(serde_json::json!({
        "reducedMatrix": [[0, 10], [25, 0]],
        "minResult": { "assignments": [0, 1] }
    }));
    assert!(session.apply_response(calculation, reply));

    assert!(session.active_assignment().is_none());
    assert!(session.report().is_empty());
    assert!(session.chart().is_empty());
    assert_eq!(session.total_cost(), 0.0);
}

#[test]
fn test_stale_reply_is_discarded() {
    let mut session = payroll_session();
    let first = session.begin_calculation().unwrap();

    session.set_cell(0, 0, "1");
    let second = session.begin_calculation().unwrap();
    assert!(second.id > first.id);

    let fresh = common::response(serde_json::json!({
        "reducedMatrix": [[0, 19], [25, 0]],
        "minResult": { "assignments": [0, 1] }
    }));
    assert!(session.apply_response(second, fresh));
    assert!(!session.apply_response(first, common::payroll_response()));

    // The fresh reply and the matrix it was computed for are still shown
    let result = session.result().unwrap();
    assert_eq!(result.id, 2);
    assert_eq!(result.matrix.get(0, 0), Some(1.0));
    assert_eq!(session.total_cost(), 6.0);
    assert_eq!(
        session.displayed_reduced().unwrap().rows(),
        &[vec![0.0, 19.0], vec![25.0, 0.0]]
    );
}

#[test]
fn test_out_of_order_replies_last_issued_wins() {
    let mut session = payroll_session();
    let first = session.begin_calculation().unwrap();
    let second = session.begin_calculation().unwrap();

    assert!(session.apply_response(first, common::payroll_response()));
    assert!(session.is_pending());
    assert!(session.apply_response(second, common::payroll_response()));
    assert!(!session.is_pending());
    assert_eq!(session.result().unwrap().id, 2);
}

#[test]
fn test_failure_keeps_state() {
    let mut session = payroll_session();
    let calculation = session.begin_calculation().unwrap();
    session.apply_response(calculation, common::payroll_response());

    let retry = session.begin_calculation().unwrap();
    assert!(session.fail_calculation(&retry));
    assert!(!session.is_pending());

    // Earlier result and the edited cells are untouched
    assert_eq!(session.result().unwrap().id, 1);
    assert_eq!(session.cell(1, 0), Some("30"));
}

#[test]
fn test_failure_of_superseded_request_is_ignored() {
    let mut session = payroll_session();
    let first = session.begin_calculation().unwrap();
    let _second = session.begin_calculation().unwrap();

    assert!(!session.fail_calculation(&first));
    assert!(session.is_pending());
}

#[test]
fn test_matrix_validation_errors() {
    let ragged = CostMatrix::new(vec![vec![1.0, 2.0], vec![]]);
    assert_eq!(
        ragged.validate().unwrap_err(),
        MatrixError::Ragged {
            row: 2,
            expected: 2,
            found: 0
        }
    );
    assert_eq!(
        CostMatrix::default().validate().unwrap_err(),
        MatrixError::Empty
    );
}

#[test]
fn test_blank_cells_do_not_block_calculation() {
    let mut session = Session::new(2, 2).unwrap();
    session.set_cell(0, 1, "4");

    let calculation = session.begin_calculation().unwrap();
    assert_eq!(
        calculation.request.cost_matrix.rows(),
        &[vec![0.0, 4.0], vec![0.0, 0.0]]
    );
}

#[test]
fn test_reset_clears_everything_and_stales_in_flight_replies() {
    let mut session = payroll_session();
    session.set_mode(AssignType::Max);
    let done = session.begin_calculation().unwrap();
    session.apply_response(done, common::payroll_response());
    let in_flight = session.begin_calculation().unwrap();

    session.reset();

    assert_eq!(session.rows(), 2);
    assert_eq!(session.cell(0, 0), Some(""));
    assert_eq!(session.row_labels(), &["", ""]);
    assert_eq!(session.mode(), AssignType::Min);
    assert!(session.result().is_none());
    assert!(session.displayed_reduced().is_none());
    assert!(!session.is_pending());

    assert!(!session.apply_response(in_flight, common::payroll_response()));
    assert!(session.result().is_none());
}
