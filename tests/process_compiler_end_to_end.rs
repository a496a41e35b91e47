// tests/process_compiler_end_to_end.rs
//
// Drives the real binary pipeline (RealFileSystem + ProcessCompiler) with a
// small shell script standing in for glslc.

#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use clap::Parser;
use tempfile::TempDir;

use shaderbuild::cli::CliArgs;
use shaderbuild::engine::{BuildStatus, BuildSummary};
use shaderbuild::store::{STATE_FILE_NAME, TimestampRecord};
use shaderbuild::types::ModTime;
use shaderbuild_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

// Writing an executable while another test forks can fail with ETXTBSY, so
// these tests run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct Workspace {
    _root: TempDir,
    compiler: PathBuf,
    input: PathBuf,
    output: PathBuf,
    log: PathBuf,
}

/// Fake compiler: copies `$1` to `$3`, appends `$1`'s file name to a log,
/// and fails for any source containing the word `error`.
fn workspace() -> Result<Workspace, Box<dyn Error>> {
    let root = tempfile::tempdir()?;
    let input = root.path().join("shaders");
    let output = root.path().join("out");
    let log = root.path().join("invocations.log");
    fs::create_dir(&input)?;

    let compiler = root.path().join("fake-glslc");
    let script = format!(
        "#!/bin/sh\n\
         basename \"$1\" >> '{log}'\n\
         if grep -q error \"$1\"; then echo \"$1: error: bad token\" >&2; exit 1; fi\n\
         [ \"$2\" = \"-o\" ] || exit 2\n\
         cp \"$1\" \"$3\"\n",
        log = log.display()
    );
    fs::write(&compiler, script)?;
    fs::set_permissions(&compiler, fs::Permissions::from_mode(0o755))?;

    Ok(Workspace {
        _root: root,
        compiler,
        input,
        output,
        log,
    })
}

impl Workspace {
    fn write_shader(&self, name: &str, body: &str, mtime_secs: u64) -> TestResult {
        let path = self.input.join(name);
        fs::write(&path, body)?;
        let file = fs::File::options().write(true).open(&path)?;
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))?;
        Ok(())
    }

    fn invocations(&self) -> Vec<String> {
        let mut lines: Vec<String> = fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    fn clear_log(&self) {
        let _ = fs::remove_file(&self.log);
    }

    fn state_path(&self) -> PathBuf {
        self.output.join(STATE_FILE_NAME)
    }

    fn read_state(&self) -> Result<TimestampRecord, Box<dyn Error>> {
        let text = fs::read_to_string(self.state_path())?;
        Ok(serde_json::from_str(&text)?)
    }

    fn run(&self, extra: &[&str]) -> shaderbuild::errors::Result<BuildSummary> {
        let mut argv: Vec<String> = vec![
            "shaderbuild".into(),
            self.compiler.display().to_string(),
            self.input.display().to_string(),
            self.output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        let args = CliArgs::try_parse_from(argv).expect("valid args");

        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        rt.block_on(shaderbuild::run(args))
    }
}

fn exists(path: &Path) -> bool {
    path.exists()
}

#[test]
fn incremental_build_with_real_processes() -> TestResult {
    let _guard = serial();
    init_tracing();
    let ws = workspace()?;
    ws.write_shader("a.frag", "void main() {}", 1_000)?;
    ws.write_shader("b.vert", "void main() {}", 2_000)?;
    ws.write_shader("README.txt", "docs", 3_000)?;
    fs::create_dir(ws.input.join("build"))?;

    let summary = ws.run(&[])?;
    assert_eq!(summary.status(), BuildStatus::CompletedAndPersisted);
    assert_eq!(ws.invocations(), vec!["a.frag", "b.vert"]);
    assert!(exists(&ws.output.join("a.frag.spv")));
    assert!(exists(&ws.output.join("b.vert.spv")));

    let state = ws.read_state()?;
    assert_eq!(state.get("a.frag"), Some(ModTime::from_millis(1_000_000)));
    assert_eq!(state.get("b.vert"), Some(ModTime::from_millis(2_000_000)));

    // Nothing changed: no compiler processes at all.
    ws.clear_log();
    let summary = ws.run(&[])?;
    assert_eq!(summary.status(), BuildStatus::NoChanges);
    assert!(ws.invocations().is_empty());

    // Touch one shader.
    ws.write_shader("b.vert", "void main() { }", 2_001)?;
    let summary = ws.run(&[])?;
    assert_eq!(summary.compiled, vec!["b.vert"]);
    assert_eq!(ws.invocations(), vec!["b.vert"]);
    assert_eq!(
        ws.read_state()?.get("b.vert"),
        Some(ModTime::from_millis(2_001_000))
    );
    Ok(())
}

#[test]
fn compiler_error_is_reported_and_retried() -> TestResult {
    let _guard = serial();
    let ws = workspace()?;
    ws.write_shader("bad.frag", "error here", 10)?;
    ws.write_shader("good.comp", "void main() {}", 20)?;

    let summary = ws.run(&[])?;
    assert!(summary.has_failures());
    assert_eq!(summary.failed[0].0, "bad.frag");
    assert!(summary.failed[0].1.contains("error: bad token"));
    assert_eq!(summary.compiled, vec!["good.comp"]);

    let state = ws.read_state()?;
    assert!(!state.contains("bad.frag"));
    assert!(state.contains("good.comp"));

    ws.clear_log();
    ws.run(&[])?;
    assert_eq!(ws.invocations(), vec!["bad.frag"]);
    Ok(())
}

#[test]
fn no_timestamps_flag_never_creates_state_file() -> TestResult {
    let _guard = serial();
    let ws = workspace()?;
    ws.write_shader("a.frag", "void main() {}", 10)?;

    for _ in 0..2 {
        ws.clear_log();
        let summary = ws.run(&["--noTimestamps"])?;
        assert_eq!(summary.status(), BuildStatus::Completed);
        assert_eq!(ws.invocations(), vec!["a.frag"]);
    }
    assert!(!exists(&ws.state_path()));
    Ok(())
}

#[test]
fn garbage_state_file_is_replaced() -> TestResult {
    let _guard = serial();
    let ws = workspace()?;
    ws.write_shader("a.frag", "void main() {}", 10)?;
    fs::create_dir_all(&ws.output)?;
    fs::write(ws.state_path(), "]]]")?;

    ws.run(&[])?;

    assert_eq!(ws.invocations(), vec!["a.frag"]);
    assert!(ws.read_state()?.contains("a.frag"));
    Ok(())
}
