//! Integration tests for error reporting

use sealtable_foundation::{Error, ErrorContext, ErrorKind, RowId};

#[test]
fn errors_display_their_kind() {
    let err = Error::missing_reference("country", RowId(4));
    assert_eq!(
        err.to_string(),
        "missing reference: country of row #4 is required"
    );
}

#[test]
fn context_travels_with_the_error() {
    let err = Error::missing_variant("subject", RowId(2)).with_context(
        ErrorContext::new()
            .with_table("statement")
            .with_column("subject")
            .with_frame("variant.build"),
    );
    let context = err.context.as_ref().unwrap();
    let rendered = context.to_string();
    assert!(rendered.starts_with("at statement.subject"));
    assert!(rendered.contains("in variant.build"));
}

#[test]
fn unknown_variant_carries_tag() {
    let err = Error::new(ErrorKind::UnknownVariant {
        column: "subject".into(),
        row: RowId(0),
        tag: "Planet".into(),
    });
    assert!(err.to_string().contains("Planet"));
}

#[test]
fn labels_report_both_failure_modes() {
    assert!(matches!(
        Error::unlabeled("element", 7).kind,
        ErrorKind::Unlabeled { position: 7, .. }
    ));
    assert!(matches!(
        Error::label_mismatch("element", "duplicate").kind,
        ErrorKind::LabelMismatch { .. }
    ));
}

#[test]
fn errors_are_std_errors() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&Error::out_of_range("t", 1, 0));
}
