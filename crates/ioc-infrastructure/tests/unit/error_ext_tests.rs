//! Unit tests for error context extensions

use ioc_domain::Error;
use ioc_infrastructure::error_ext::ErrorContext;
use std::io;

fn failing_io() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
}

#[test]
fn test_context_produces_infrastructure_error() {
    let error = failing_io().context("Reading state").expect_err("fails");
    match error {
        Error::Infrastructure { message, source } => {
            assert!(message.starts_with("Reading state: "));
            assert!(source.is_some());
        }
        other => panic!("Expected Infrastructure error, got {other:?}"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .expect("ok");
    assert_eq!(value, 1);
}

#[test]
fn test_io_and_config_context() {
    assert!(matches!(
        failing_io().io_context("Opening file"),
        Err(Error::Io { .. })
    ));
    assert!(matches!(
        "x".parse::<u32>().config_context("Parsing capacity"),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_creation_context_names_the_singleton() {
    let error = failing_io()
        .creation_context("repository", "Opening the data file")
        .expect_err("fails");
    assert!(error.is_creation_failed());
    assert!(error.to_string().contains("repository"));
}
