//! Tests for tool resolution and the sanity probe.

use super::*;
use crate::test_utils::{ExpectedCall, StubExecutor, failure_output, output_with, success_output};
use rstest::{fixture, rstest};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[fixture]
fn bin_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

#[cfg(unix)]
fn write_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, "#!/bin/sh\nexit 0\n").expect("failed to write tool");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))
        .expect("failed to set permissions");
    path
}

fn search_path(dirs: &[&Path]) -> OsString {
    std::env::join_paths(dirs).expect("paths should join")
}

#[cfg(unix)]
#[rstest]
fn resolve_finds_executable_on_search_path(bin_dir: TempDir) {
    let expected = write_tool(bin_dir.path(), GEXT, 0o755);
    let resolver = SearchPathResolver::new(search_path(&[bin_dir.path()]));

    let resolved = resolver.resolve(GEXT).expect("gext should resolve");

    assert!(resolved.is_absolute());
    assert_eq!(resolved.as_std_path(), expected);
}

#[cfg(unix)]
#[rstest]
#[case::read_write(0o644)]
#[case::owner_only(0o600)]
fn resolve_skips_non_executable_files(bin_dir: TempDir, #[case] mode: u32) {
    let shadowed = TempDir::new().expect("failed to create temp dir");
    write_tool(shadowed.path(), GEXT, mode);
    let expected = write_tool(bin_dir.path(), GEXT, 0o755);
    let resolver = SearchPathResolver::new(search_path(&[shadowed.path(), bin_dir.path()]));

    let resolved = resolver.resolve(GEXT).expect("gext should resolve");

    assert_eq!(resolved.as_std_path(), expected);
}

#[cfg(unix)]
#[rstest]
fn resolve_skips_files_only_others_may_execute(bin_dir: TempDir) {
    use std::os::unix::fs::MetadataExt;

    let path = write_tool(bin_dir.path(), GEXT, 0o011);
    let owner = std::fs::metadata(&path).expect("tool metadata").uid();
    if owner == 0 {
        // Root may execute any file with an execute bit set.
        return;
    }
    let resolver = SearchPathResolver::new(search_path(&[bin_dir.path()]));

    let err = resolver
        .resolve(GEXT)
        .expect_err("the owner cannot execute this file");

    assert!(matches!(err, PublishError::ToolNotFound { ref tool } if tool == GEXT));
}

#[cfg(unix)]
#[rstest]
fn resolve_prefers_earlier_search_path_entries(bin_dir: TempDir) {
    let later = TempDir::new().expect("failed to create temp dir");
    let expected = write_tool(bin_dir.path(), GEXT, 0o755);
    write_tool(later.path(), GEXT, 0o755);
    let resolver = SearchPathResolver::new(search_path(&[bin_dir.path(), later.path()]));

    let resolved = resolver.resolve(GEXT).expect("gext should resolve");

    assert_eq!(resolved.as_std_path(), expected);
}

#[rstest]
fn resolve_ignores_directories_named_like_the_tool(bin_dir: TempDir) {
    std::fs::create_dir(bin_dir.path().join(GEXT)).expect("failed to create dir");
    let resolver = SearchPathResolver::new(search_path(&[bin_dir.path()]));

    let err = resolver.resolve(GEXT).expect_err("a directory is not a tool");

    assert!(matches!(err, PublishError::ToolNotFound { tool } if tool == GEXT));
}

#[rstest]
#[case::empty_search_path(Some(""))]
#[case::unset_search_path(None)]
fn resolve_reports_missing_tool(#[case] path: Option<&str>) {
    let resolver = path.map_or_else(SearchPathResolver::default, SearchPathResolver::new);

    let err = resolver.resolve(GEXT).expect_err("gext should not resolve");

    assert!(matches!(err, PublishError::ToolNotFound { ref tool } if tool == GEXT));
    assert!(err.to_string().contains("'gext'"));
}

#[cfg(unix)]
#[rstest]
fn from_env_reads_path_variable(bin_dir: TempDir) {
    let expected = write_tool(bin_dir.path(), GEXT, 0o755);
    let path = search_path(&[bin_dir.path()]);

    let resolved = temp_env::with_var("PATH", Some(&path), || {
        SearchPathResolver::from_env().resolve(GEXT)
    })
    .expect("gext should resolve");

    assert_eq!(resolved.as_std_path(), expected);
}

#[test]
fn external_tool_resolve_uses_resolver() {
    let mut resolver = MockToolResolver::new();
    resolver
        .expect_resolve()
        .withf(|name| name == GEXT)
        .times(1)
        .returning(|_| Ok(Utf8PathBuf::from("/opt/bin/gext")));

    let tool = ExternalTool::resolve(&resolver, GEXT).expect("gext should resolve");

    assert_eq!(tool.name(), GEXT);
    assert_eq!(tool.path(), Utf8Path::new("/opt/bin/gext"));
}

fn gext_at(path: &str) -> ExternalTool {
    ExternalTool {
        name: GEXT,
        path: Utf8PathBuf::from(path),
    }
}

#[test]
fn probe_succeeds_when_help_exits_zero() {
    let executor = StubExecutor::new(vec![ExpectedCall::new(
        "/opt/bin/gext",
        &["--help"],
        Ok(output_with(0, "usage: gext [-h] ...", "")),
    )]);

    gext_at("/opt/bin/gext")
        .probe(&executor)
        .expect("probe should succeed");
    executor.assert_finished();
}

#[test]
fn probe_failure_carries_captured_stderr() {
    let executor = StubExecutor::new(vec![ExpectedCall::new(
        "/opt/bin/gext",
        &["--help"],
        Ok(failure_output("ModuleNotFoundError: No module named 'gi'\n")),
    )]);

    let err = gext_at("/opt/bin/gext")
        .probe(&executor)
        .expect_err("probe should fail");

    match err {
        PublishError::ToolProbeFailed { tool, reason } => {
            assert_eq!(tool, GEXT);
            assert!(reason.contains("No module named 'gi'"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn probe_failure_falls_back_to_stdout() {
    let executor = StubExecutor::new(vec![ExpectedCall::new(
        "/opt/bin/gext",
        &["--help"],
        Ok(output_with(2, "bad install\n", "  \n")),
    )]);

    let err = gext_at("/opt/bin/gext")
        .probe(&executor)
        .expect_err("probe should fail");

    assert!(err.to_string().contains("bad install"));
}

#[test]
fn probe_launch_failure_is_reported_as_probe_failure() {
    let mut executor = crate::executor::MockCommandExecutor::new();
    executor
        .expect_run()
        .withf(|cmd, args| cmd == "/opt/bin/gext" && args == ["--help"])
        .times(1)
        .returning(|_, _| Err(std::io::Error::other("exec format error").into()));

    let err = gext_at("/opt/bin/gext")
        .probe(&executor)
        .expect_err("probe should fail");

    match err {
        PublishError::ToolProbeFailed { reason, .. } => {
            assert!(reason.contains("exec format error"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn probe_does_not_spawn_anything_else() {
    let executor = StubExecutor::new(vec![ExpectedCall::new(
        "/opt/bin/gext",
        &["--help"],
        Ok(success_output()),
    )]);

    gext_at("/opt/bin/gext")
        .probe(&executor)
        .expect("probe should succeed");

    assert_eq!(
        executor.invocations(),
        vec![vec!["/opt/bin/gext".to_owned(), "--help".to_owned()]]
    );
}
