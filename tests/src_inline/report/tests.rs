use super::*;

#[test]
fn test_format_gap_sign() {
    assert_eq!(format_gap(1.234), "+1.23");
    assert_eq!(format_gap(-0.5), "-0.50");
    assert_eq!(format_gap(0.0), "0.00");
    assert_eq!(format_gap(-0.0), "0.00");
}

#[test]
fn test_tiny_gap_matches_statement() {
    for gap in [-0.001, 0.001, -0.0049, 0.0049] {
        assert_eq!(format_gap(gap), "0.00");
        assert_eq!(gap_statement(gap), "at mission average");
    }
    assert_eq!(format_gap(-0.006), "-0.01");
    assert_eq!(gap_statement(-0.006), "below mission average");
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html("<b>\"Al\" & 'Ex'</b>"),
        "&lt;b&gt;&quot;Al&quot; &amp; &#39;Ex&#39;&lt;/b&gt;"
    );
}

#[test]
fn test_gap_statement() {
    assert_eq!(gap_statement(0.001), "at mission average");
    assert_eq!(gap_statement(3.0), "above mission average");
    assert_eq!(gap_statement(-3.0), "below mission average");
}
