/// Combines both output streams the way the parser expects them.
pub(super) fn join_output(stdout: &str, stderr: &str) -> String {
    format!("{stdout}\n{stderr}").trim().to_string()
}
