use super::*;

#[test]
fn application_error_shows_server_text_verbatim() {
    let err = ClientError::Application { status: 500, message: "hardware fault".into() };
    assert_eq!(err.user_message(), "hardware fault");
    assert_eq!(err.status(), Some(500));
}

#[test]
fn transport_error_is_prefixed() {
    let err = ClientError::Transport("connection refused".into());
    assert_eq!(err.user_message(), "Network error: connection refused");
    assert_eq!(err.status(), None);
}

#[test]
fn malformed_error_reads_like_transport() {
    let err = ClientError::Malformed("expected value at line 1 column 1".into());
    assert_eq!(err.user_message(), "Network error: expected value at line 1 column 1");
}

#[test]
fn construction_errors_use_display() {
    let err = ClientError::InvalidBaseUrl("ftp://pi".into());
    assert_eq!(err.user_message(), "invalid base URL: ftp://pi");
}
