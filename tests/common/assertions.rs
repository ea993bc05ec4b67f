//! Custom assertion macros with descriptive failure messages.

/// Assert the CLI exited with `code`, printing both streams otherwise.
///
/// # Example
/// ```ignore
/// assert_exit_code!(result, 0);
/// ```
#[macro_export]
macro_rules! assert_exit_code {
    ($result:expr, $code:expr) => {
        assert_eq!(
            $result.exit_code,
            $code,
            "unexpected exit code.\nstdout:\n{}\nstderr:\n{}",
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert a scenario result carries exactly `failures`, in order.
///
/// # Example
/// ```ignore
/// assert_failures!(result, [Failure::missing_file("backend/app_rbac/urls.py")]);
/// ```
#[macro_export]
macro_rules! assert_failures {
    ($result:expr, [$($failure:expr),* $(,)?]) => {
        let expected: Vec<genesis3_conformance::Failure> = vec![$($failure),*];
        assert_eq!(
            $result.failures, expected,
            "scenario '{}' ended {} with unexpected failures",
            $result.scenario, $result.status
        );
    };
}
