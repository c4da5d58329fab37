use super::*;

#[test]
fn alert_class_carries_severity_modifier() {
    assert_eq!(alert_class(Severity::Error), "alert alert--error");
    assert_eq!(alert_class(Severity::Success), "alert alert--success");
}
