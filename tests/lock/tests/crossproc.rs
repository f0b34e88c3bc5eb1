//! Cross-process determinism: spawns the `traversal_fixture` binary under
//! several environment variants and asserts byte-identical stdout. Proves
//! the run is not influenced by cwd, locale, or unrelated env vars.

use std::path::Path;
use std::process::Command;

use bfstep_harness::fixtures::reference_config;

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

/// `cargo test` puts test binaries in `target/<profile>/deps/`; the
/// fixture binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("traversal_fixture");
    path.to_string_lossy().to_string()
}

fn run_variant(work_dir: &str, args: &[&str], env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();
    let mut command = Command::new(&bin);
    command.args(args).current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {bin} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });
    assert!(
        output.status.success(),
        "traversal_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

#[test]
fn crossproc_determinism_env_variants() {
    let root = workspace_root();
    let baseline = run_variant(&root, &[], &[]);
    assert!(baseline.contains("graph_digest=sha256:"));
    assert!(baseline.contains("transcript_digest=sha256:"));

    let alt_cwd = if cfg!(target_os = "windows") {
        "C:\\"
    } else {
        "/tmp"
    };
    assert_eq!(baseline, run_variant(alt_cwd, &[], &[]), "cwd changed output");

    assert_eq!(
        baseline,
        run_variant(&root, &[], &[("LC_ALL", "C"), ("LANG", "C")]),
        "locale changed output"
    );

    assert_eq!(
        baseline,
        run_variant(
            &root,
            &[],
            &[
                ("BFSTEP_NOISE", "should_not_matter"),
                ("TZ", "America/New_York"),
                ("HOME", "/nonexistent"),
            ],
        ),
        "spurious env vars changed output"
    );

    // Logging goes to stderr only.
    assert_eq!(
        baseline,
        run_variant(&root, &[], &[("RUST_LOG", "debug")]),
        "RUST_LOG changed stdout"
    );
}

#[test]
fn crossproc_output_matches_in_process_run() {
    let output = run_variant(&workspace_root(), &["A"], &[]);
    let report = bfstep_harness::runner::run_config(&reference_config("A")).unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6, "unexpected output: {output}");
    assert_eq!(lines[0], format!("graph_digest={}", report.graph_digest));
    assert_eq!(lines[1], format!("transcript_digest={}", report.transcript_digest));
    assert_eq!(
        lines[2],
        format!("final_state_digest={}", report.final_state.digest().unwrap())
    );
    assert_eq!(lines[3], "visit_order=A → B → C → D → E → F");
    assert_eq!(lines[4], "steps=7");
    assert_eq!(lines[5], "termination=complete");
}

#[test]
fn crossproc_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(
        &path,
        r#"{
            "graph": {"nodes": ["A", "B", "C"], "edges": [["A", "B"], ["B", "C"]]},
            "start_node": "A",
            "policy": {"max_steps": 2}
        }"#,
    )
    .unwrap();

    let path_arg = path.to_string_lossy().to_string();
    let output = run_variant(&workspace_root(), &["A", path_arg.as_str()], &[]);
    assert!(output.contains("visit_order=A → B\n"), "{output}");
    assert!(output.contains("steps=2\n"));
    assert!(output.contains("termination=step_budget_exceeded\n"));
}
